//! Error reporting specs

use crate::prelude::*;

#[test]
fn scan_without_sources_suggests_adding_one() {
    let temp = Project::empty();

    temp.cw()
        .args(&["scan", "--once"])
        .fails()
        .stderr_has("No sources configured")
        .stderr_has("cw sources add-remote");
}

#[test]
fn scan_with_only_missing_files_fails() {
    let temp = Project::empty();
    temp.cw()
        .args(&["sources", "add-local", "nowhere.pgn"])
        .passes();

    temp.cw()
        .args(&["scan", "--once"])
        .fails()
        .stdout_has("source error")
        .stderr_has("None of the configured sources is usable");
}

#[test]
fn check_rejects_non_pgn_url() {
    let temp = Project::empty();

    temp.cw()
        .args(&["check", "https://example.com/games.zip"])
        .fails()
        .stdout_eq("error\n");
}

#[test]
fn invalid_interval_is_rejected() {
    let temp = Project::empty();

    temp.cw()
        .args(&["scan", "--interval", "soon"])
        .fails()
        .stderr_has("--interval");
}
