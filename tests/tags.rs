// tests/tags.rs

//! Integration tests for importing symbolic names from SCCS/VC-names.

mod common;

use common::{Call, FakeBackend, delta, setup_workspace};
use sccs2rcs::progress::SilentProgress;
use sccs2rcs::{Converter, Error};
use std::fs;

fn three_deltas() -> Vec<common::FakeDelta> {
    vec![
        delta("1.1", "01 06 95 10:00:00 kim", "created", "v1\n"),
        delta("1.2", "02 06 95 10:00:00 kim", "second", "v2\n"),
        delta("1.3", "03 06 95 10:00:00 kim", "third", "v3\n"),
    ]
}

#[test]
fn test_tags_applied_after_all_checkins() {
    let (dir, config) = setup_workspace(&["myfile.c"]);
    fs::write(
        dir.path().join("SCCS").join("VC-names"),
        "REL1_0 : myfile.c 1.3\n\nBETA : src/myfile.c 1.2\n",
    )
    .unwrap();
    let backend = FakeBackend::new(dir.path()).with_master("myfile.c", three_deltas());
    let mut converter = Converter::new(config, backend);

    let report = converter.run(&SilentProgress::new()).unwrap();

    assert_eq!(report.tags_applied, 2);
    let backend = converter.backend();
    let archive = backend.archive("myfile.c").unwrap();
    assert_eq!(archive.tags.get("REL1_0").map(String::as_str), Some("1.3"));
    assert_eq!(archive.tags.get("BETA").map(String::as_str), Some("1.2"));

    let last_checkin = backend
        .calls
        .iter()
        .rposition(|c| matches!(c, Call::Checkin { .. }))
        .unwrap();
    let first_tag = backend
        .calls
        .iter()
        .position(|c| matches!(c, Call::Tag { .. }))
        .unwrap();
    assert!(first_tag > last_checkin);
    assert_eq!(
        backend.calls[first_tag],
        Call::Tag {
            file: "myfile.c".to_string(),
            name: "REL1_0".to_string(),
            revision: "1.3".to_string(),
        }
    );
    assert!(converter.transcript().commands().any(|c| c == "rcs -nREL1_0:1.3 myfile.c"));
}

#[test]
fn test_no_tag_table_means_no_tags() {
    let (dir, config) = setup_workspace(&["myfile.c"]);
    let backend = FakeBackend::new(dir.path()).with_master("myfile.c", three_deltas());
    let mut converter = Converter::new(config, backend);

    let report = converter.run(&SilentProgress::new()).unwrap();

    assert_eq!(report.tags_applied, 0);
    assert!(converter.backend().tags().is_empty());
}

#[test]
fn test_malformed_tag_table_applies_nothing() {
    let (dir, config) = setup_workspace(&["myfile.c"]);
    fs::write(
        dir.path().join("SCCS").join("VC-names"),
        "REL1_0 : myfile.c 1.3\nREL1_1 myfile.c\n",
    )
    .unwrap();
    let backend = FakeBackend::new(dir.path()).with_master("myfile.c", three_deltas());
    let mut converter = Converter::new(config, backend);

    let err = converter.run(&SilentProgress::new()).unwrap_err();

    assert!(matches!(err, Error::MalformedTagLine(ref line) if line == "REL1_1 myfile.c"));
    assert!(converter.backend().tags().is_empty());
    // The history itself was fully replayed
    assert_eq!(
        converter.backend().archive("myfile.c").unwrap().revision_ids(),
        vec!["1.1", "1.2", "1.3"]
    );
}

#[test]
fn test_tag_for_missing_revision_is_fatal() {
    let (dir, config) = setup_workspace(&["myfile.c"]);
    fs::write(
        dir.path().join("SCCS").join("VC-names"),
        "REL9 : myfile.c 1.9\n",
    )
    .unwrap();
    let backend = FakeBackend::new(dir.path()).with_master("myfile.c", three_deltas());
    let mut converter = Converter::new(config, backend);

    let err = converter.run(&SilentProgress::new()).unwrap_err();

    assert_eq!(err.command(), Some("rcs -nREL9:1.9 myfile.c"));
}
