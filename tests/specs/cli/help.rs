//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();

    temp.cw()
        .args(&["--help"])
        .passes()
        .stdout_has("sources")
        .stdout_has("check")
        .stdout_has("scan");
}

#[test]
fn scan_help_lists_flags() {
    let temp = Project::empty();

    temp.cw()
        .args(&["scan", "--help"])
        .passes()
        .stdout_has("--live")
        .stdout_has("--interval")
        .stdout_has("--once");
}
