//! Single-pass scan specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn once_reports_repetition_claim() {
    let temp = Project::empty();
    temp.file("round1.pgn", SHUFFLE_GAME);
    temp.cw()
        .args(&["sources", "add-local", "round1.pgn"])
        .passes();

    temp.cw()
        .args(&["scan", "--once"])
        .passes()
        .stdout_has("source ok")
        .stdout_has("3 Fold Repetition")
        .stdout_has("A - B")
        .stdout_has("4...Ng8")
        .stdout_has("1 games read, 1 checked, 1 claims");

    assert!(temp.data_dir().join("games.pgn").is_file());
}

#[test]
fn once_merges_sources_in_order() {
    let temp = Project::empty();
    temp.file("a.pgn", "1. e4 *");
    temp.file("b.pgn", "1. d4 *");
    temp.cw().args(&["sources", "add-local", "a.pgn"]).passes();
    temp.cw().args(&["sources", "add-local", "b.pgn"]).passes();

    temp.cw()
        .args(&["scan", "--once"])
        .passes()
        .stdout_has("2 games read, 2 checked, 0 claims");

    let combined = std::fs::read_to_string(temp.data_dir().join("games.pgn")).unwrap();
    assert_eq!(combined, "1. e4 *\n\n1. d4 *");
}

#[test]
fn live_only_skips_finished_games() {
    let temp = Project::empty();
    temp.file("round1.pgn", &format!("{SHUFFLE_GAME}\n{FINISHED_SHUFFLE_GAME}"));
    temp.cw()
        .args(&["sources", "add-local", "round1.pgn"])
        .passes();

    temp.cw()
        .args(&["scan", "--once", "--live"])
        .passes()
        .stdout_has("A - B")
        .stdout_lacks("C - D")
        .stdout_has("2 games read, 1 checked, 1 claims");
}

#[test]
fn settings_file_enables_live_only() {
    let temp = Project::empty();
    temp.file("round1.pgn", FINISHED_SHUFFLE_GAME);
    temp.file("data/claimwatch.toml", "live_only = true\n");
    temp.cw()
        .args(&["sources", "add-local", "round1.pgn"])
        .passes();

    temp.cw()
        .args(&["scan", "--once"])
        .passes()
        .stdout_has("1 games read, 0 checked, 0 claims");
}

#[test]
fn invalid_settings_file_is_reported() {
    let temp = Project::empty();
    temp.file("data/claimwatch.toml", "poll_interval = \"soon\"\n");

    temp.cw()
        .args(&["sources", "list"])
        .fails()
        .stderr_has("claimwatch.toml");
}
