//! Behavioral specifications for `cppconform families`.

use crate::prelude::*;

/// > families lists every tool family identifier
#[test]
fn lists_every_family() {
    let assertion = cppconform_cmd().arg("families").assert().success();
    let output = String::from_utf8(assertion.get_output().stdout.clone()).unwrap();

    for id in [
        "definition-scan",
        "definition-inline",
        "pure-virtual-extractor",
        "class-name-expander",
        "insertion-point-finder",
        "abstract-class-finder",
        "paired-file-finder",
    ] {
        assert!(output.contains(id), "missing {id} in:\n{output}");
    }
}

/// > the listing shows the frozen argument vectors
#[test]
fn shows_argument_templates() {
    cppconform_cmd()
        .arg("families")
        .assert()
        .success()
        .stdout(predicates::str::contains("-p <db_dir> <header>"))
        .stdout(predicates::str::contains(
            "<db_dir> <header> <header_content> <line>",
        ))
        .stdout(predicates::str::contains("<search_root> <start_root> <class_name>"))
        .stdout(predicates::str::contains("<project_root> <relative_path>"));
}

/// > the listing shows each family's database scope
#[test]
fn shows_database_scopes() {
    cppconform_cmd()
        .arg("families")
        .assert()
        .success()
        .stdout(predicates::str::contains("run-scoped database"))
        .stdout(predicates::str::contains("sandbox-scoped database"))
        .stdout(predicates::str::contains("no database"));
}
