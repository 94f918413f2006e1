//! Behavioral specifications for `cppconform run`.

use tempfile::TempDir;

use crate::prelude::*;

const PAIRED_MISS_SUITE: &str = r#"
[suite]
name = "paired file finder"
family = "paired-file-finder"

[[suite.scenario]]
name = "reports a missing pair"
files = [{ path = "dir/file1.hpp" }]
invoke = { query = "dir/file1.cpp" }
expect = [
    "nonzero_exit",
    { stderr_prefix = "ERROR: No paired C++ file found" },
]
"#;

/// > a missing tool path is a configuration error with exit code 2
#[test]
fn missing_tool_path_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let suite = write_suite(tmp.path(), "suite.toml", PAIRED_MISS_SUITE);

    cppconform_cmd()
        .arg("run")
        .arg(&suite)
        .env_remove("CPPCONFORM_TOOL_PATH")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("tool under test"));
}

/// > a passing suite exits 0 and prints PASS per scenario
#[test]
fn passing_suite_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let suite = write_suite(tmp.path(), "suite.toml", PAIRED_MISS_SUITE);
    let tool = stub_tool(
        tmp.path(),
        "finder",
        "",
        "ERROR: No paired C++ file found for dir/file1.cpp\n",
        1,
    );

    cppconform_cmd()
        .arg("run")
        .arg(&suite)
        .arg("--tool-path")
        .arg(&tool)
        .arg("--sandbox-root")
        .arg(tmp.path().join("sandboxes"))
        .arg("--color")
        .arg("never")
        .assert()
        .success()
        .stdout(predicates::str::contains("PASS reports a missing pair"))
        .stdout(predicates::str::contains("1 passed, 0 failed, 0 errored"));
}

/// > a failing expectation exits 1 and reports expected and actual
#[test]
fn failing_suite_exits_one_with_diagnostics() {
    let tmp = TempDir::new().unwrap();
    let suite = write_suite(tmp.path(), "suite.toml", PAIRED_MISS_SUITE);
    // Tool succeeds, so the nonzero-exit expectation fails.
    let tool = stub_tool(tmp.path(), "finder", "dir/file1.hpp\n", "", 0);

    cppconform_cmd()
        .arg("run")
        .arg(&suite)
        .arg("--tool-path")
        .arg(&tool)
        .arg("--sandbox-root")
        .arg(tmp.path().join("sandboxes"))
        .arg("--color")
        .arg("never")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("FAIL reports a missing pair"))
        .stdout(predicates::str::contains("expected:"))
        .stdout(predicates::str::contains("actual:"));
}

/// > --output json emits a machine-readable report
#[test]
fn json_output_is_machine_readable() {
    let tmp = TempDir::new().unwrap();
    let suite = write_suite(tmp.path(), "suite.toml", PAIRED_MISS_SUITE);
    let tool = stub_tool(
        tmp.path(),
        "finder",
        "",
        "ERROR: No paired C++ file found\n",
        1,
    );

    let assertion = cppconform_cmd()
        .arg("run")
        .arg(&suite)
        .arg("--tool-path")
        .arg(&tool)
        .arg("--sandbox-root")
        .arg(tmp.path().join("sandboxes"))
        .arg("--output")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8(assertion.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["family"], "paired-file-finder");
    assert_eq!(report["outcomes"][0]["status"], "passed");
}

/// > a sandbox-scoped family runs against a database captured in its sandbox
#[test]
fn extractor_suite_with_stub_capture_tool() {
    let tmp = TempDir::new().unwrap();
    let suite = write_suite(
        tmp.path(),
        "extractor.toml",
        r#"
[suite]
name = "pure virtual extraction"
family = "pure-virtual-extractor"

[[suite.scenario]]
name = "extracts a single pure virtual function"
files = [{ path = "header.hpp", content = "struct Foo { virtual void bar() = 0; };" }]
invoke = { class_name = "Foo" }
expect = [{ trimmed_stdout = "virtual void bar() = 0;" }, "clean_success"]
"#,
    );
    let tool = stub_tool(tmp.path(), "extractor", "virtual void bar() = 0;\n", "", 0);
    let capture = stub_capture_tool(tmp.path(), "stub-bear");

    cppconform_cmd()
        .arg("run")
        .arg(&suite)
        .arg("--tool-path")
        .arg(&tool)
        .arg("--capture-tool")
        .arg(&capture)
        .arg("--sandbox-root")
        .arg(tmp.path().join("sandboxes"))
        .arg("--color")
        .arg("never")
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "PASS extracts a single pure virtual function",
        ));
}

/// > the shipped paired-file-finder fixture suite passes against a faithful stub
#[test]
fn paired_file_finder_fixture_suite() {
    let tmp = TempDir::new().unwrap();
    // Finds the counterpart by extension swap; reports the frozen error
    // message when either side of the pair is missing.
    let tool = write_script(
        tmp.path(),
        "finder",
        concat!(
            "root=\"$1\"\n",
            "query=\"$2\"\n",
            "case \"$query\" in\n",
            "  *.hpp) counterpart=\"${query%.hpp}.cpp\" ;;\n",
            "  *.cpp) counterpart=\"${query%.cpp}.hpp\" ;;\n",
            "esac\n",
            "if [ -e \"$root/$query\" ] && [ -e \"$root/$counterpart\" ]; then\n",
            "  printf '%s\\n%s\\n' \"$root/$query\" \"$root/$counterpart\"\n",
            "  exit 0\n",
            "fi\n",
            "echo \"ERROR: No paired C++ file found for $query\" >&2\n",
            "exit 1\n",
        ),
    );

    cppconform_cmd()
        .arg("run")
        .arg(fixture("suites/paired_file_finder.toml"))
        .arg("--tool-path")
        .arg(&tool)
        .arg("--sandbox-root")
        .arg(tmp.path().join("sandboxes"))
        .arg("--color")
        .arg("never")
        .assert()
        .success()
        .stdout(predicates::str::contains("2 passed, 0 failed, 0 errored"));
}

/// > the insertion-point fixture suite distinguishes flagged line numbers
#[test]
fn insertion_point_fixture_suite() {
    let tmp = TempDir::new().unwrap();
    // The header path is the second positional argument for this family.
    let tool = write_script(
        tmp.path(),
        "place-finder",
        "if grep -q 'public:' \"$2\"; then printf '4p\\n'; else printf '2\\n'; fi\n",
    );
    let capture = stub_capture_tool(tmp.path(), "stub-bear");

    cppconform_cmd()
        .arg("run")
        .arg(fixture("suites/insertion_point_finder.toml"))
        .arg("--tool-path")
        .arg(&tool)
        .arg("--capture-tool")
        .arg(&capture)
        .arg("--sandbox-root")
        .arg(tmp.path().join("sandboxes"))
        .arg("--color")
        .arg("never")
        .assert()
        .success()
        .stdout(predicates::str::contains("2 passed, 0 failed, 0 errored"));
}

/// > a missing suite file is a configuration error
#[test]
fn missing_suite_file_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let tool = stub_tool(tmp.path(), "finder", "", "", 0);

    cppconform_cmd()
        .arg("run")
        .arg(tmp.path().join("absent.toml"))
        .arg("--tool-path")
        .arg(&tool)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("suite file"));
}

/// > sandboxes are removed after the run
#[test]
fn sandboxes_do_not_outlive_the_run() {
    let tmp = TempDir::new().unwrap();
    let suite = write_suite(tmp.path(), "suite.toml", PAIRED_MISS_SUITE);
    let tool = stub_tool(tmp.path(), "finder", "", "ERROR: No paired C++ file found\n", 1);
    let sandbox_root = tmp.path().join("sandboxes");

    cppconform_cmd()
        .arg("run")
        .arg(&suite)
        .arg("--tool-path")
        .arg(&tool)
        .arg("--sandbox-root")
        .arg(&sandbox_root)
        .assert()
        .success();

    let leftovers: Vec<_> = std::fs::read_dir(&sandbox_root).unwrap().collect();
    assert!(leftovers.is_empty(), "leftovers: {leftovers:?}");
}

/// > --keep-sandboxes leaves scenario sandboxes for inspection
#[test]
fn keep_sandboxes_flag_preserves_directories() {
    let tmp = TempDir::new().unwrap();
    let suite = write_suite(tmp.path(), "suite.toml", PAIRED_MISS_SUITE);
    let tool = stub_tool(tmp.path(), "finder", "", "ERROR: No paired C++ file found\n", 1);
    let sandbox_root = tmp.path().join("sandboxes");

    cppconform_cmd()
        .arg("run")
        .arg(&suite)
        .arg("--tool-path")
        .arg(&tool)
        .arg("--sandbox-root")
        .arg(&sandbox_root)
        .arg("--keep-sandboxes")
        .assert()
        .success();

    let kept: Vec<_> = std::fs::read_dir(&sandbox_root).unwrap().collect();
    assert!(!kept.is_empty());
}
