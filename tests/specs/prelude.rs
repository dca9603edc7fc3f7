//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use similar_asserts::assert_eq;

/// A game whose knight shuffle reaches a threefold repetition at 4...Ng8
pub const SHUFFLE_GAME: &str = r#"[Event "Spec Open"]
[White "A"]
[Black "B"]
[Board "1"]
[Result "*"]

1. Nf3 Nf6 2. Ng1 Ng8 3. Nf3 Nf6 4. Ng1 Ng8 *
"#;

/// A finished game with the same repetition
pub const FINISHED_SHUFFLE_GAME: &str = r#"[Event "Spec Open"]
[White "C"]
[Black "D"]
[Board "2"]
[Result "1/2-1/2"]

1. Nf3 Nf6 2. Ng1 Ng8 3. Nf3 Nf6 4. Ng1 Ng8 1/2-1/2
"#;

/// A scratch working directory with its own data directory
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn cw(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("cw").unwrap();
        cmd.current_dir(self.path())
            .env("CLAIMWATCH_DATA_DIR", self.data_dir())
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and expect exit code 0
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(
            run.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }

    /// Run and expect a non-zero exit code
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(
            !run.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }
}

pub struct RunAssert {
    success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout, expected);
        self
    }
}
