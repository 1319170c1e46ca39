//! Utility helpers shared across integration tests.
#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const START: &str = "18:30";
pub const URL: &str = "https://video.test/watch?v=abc";

/// Build a `String` from lines, joining them with `\n` and ending with a
/// newline.
#[allow(unused_macros)]
macro_rules! minutes {
    ($($line:expr),* $(,)?) => {
        {
            let mut s = String::new();
            $( s.push_str($line); s.push('\n'); )*
            s
        }
    };
}

/// A command for the `mdminutes` binary with the start and URL
/// environment variables cleared.
pub fn mdminutes() -> Command {
    let mut cmd =
        Command::cargo_bin("mdminutes").expect("Failed to create cargo command for mdminutes");
    cmd.env_remove("MDMINUTES_START_TIME")
        .env_remove("MDMINUTES_RECORDING_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `content` to `name` inside a fresh temporary directory.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temporary directory");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write test file");
    (dir, path)
}
