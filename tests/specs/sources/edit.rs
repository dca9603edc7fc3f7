//! Source list editing specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn empty_list() {
    let temp = Project::empty();

    temp.cw()
        .args(&["sources", "list"])
        .passes()
        .stdout_eq("No sources\n");
}

#[test]
fn added_sources_are_listed_in_order() {
    let temp = Project::empty();
    temp.cw()
        .args(&["sources", "add-remote", "https://example.com/live.pgn"])
        .passes()
        .stdout_has("Added remote https://example.com/live.pgn");
    temp.cw()
        .args(&["sources", "add-local", "games/local.pgn"])
        .passes();

    let listed = temp.cw().args(&["sources", "list"]).passes();
    let lines: Vec<&str> = listed.stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "remote https://example.com/live.pgn");
    assert!(lines[1].starts_with("local  /"));
    assert!(lines[1].ends_with("local.pgn"));
}

#[test]
fn list_as_json_uses_kind_and_value() {
    let temp = Project::empty();
    temp.cw()
        .args(&["sources", "add-remote", "https://example.com/live.pgn"])
        .passes();

    temp.cw()
        .args(&["sources", "list", "--format", "json"])
        .passes()
        .stdout_has(r#""kind": "remote""#)
        .stdout_has(r#""value": "https://example.com/live.pgn""#);
}

#[test]
fn duplicate_source_is_rejected() {
    let temp = Project::empty();
    temp.cw()
        .args(&["sources", "add-remote", "https://example.com/live.pgn"])
        .passes();

    temp.cw()
        .args(&["sources", "add-remote", "https://example.com/live.pgn"])
        .fails()
        .stderr_has("already configured");
}

#[test]
fn remove_source() {
    let temp = Project::empty();
    temp.cw()
        .args(&["sources", "add-remote", "https://example.com/live.pgn"])
        .passes();

    temp.cw()
        .args(&["sources", "remove", "https://example.com/live.pgn"])
        .passes()
        .stdout_has("Removed remote");
    temp.cw()
        .args(&["sources", "list"])
        .passes()
        .stdout_eq("No sources\n");
}

#[test]
fn removing_unknown_source_fails() {
    let temp = Project::empty();

    temp.cw()
        .args(&["sources", "remove", "https://example.com/none.pgn"])
        .fails()
        .stderr_has("is not configured");
}

#[test]
fn corrupt_source_file_reads_as_empty() {
    let temp = Project::empty();
    temp.file("data/sources.json", "{ not json");

    temp.cw()
        .args(&["sources", "list"])
        .passes()
        .stdout_eq("No sources\n");
}
