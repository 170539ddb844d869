//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, CodecArgs, Command, ExecutionSummary, run_cli};

pub(super) const TRIANGLE: &str = "\
---
title: triangle
zad: 3
src: 0
mst: Prim
---
graph
0(\"A\")
1(\"B\")
2(\"C\")
0 ---|1| 1
1 ---|2| 2
0 ---|3| 2
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_graph(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Err(err) = std::fs::write(&path, contents) {
        panic!("failed to write {}: {err}", path.display());
    }
    path
}

pub(super) fn cli(command: Command) -> Cli {
    Cli {
        codec: CodecArgs::default(),
        command,
    }
}

pub(super) fn run_expecting_error(command: Command, panic_msg: &str) -> CliError {
    match run_cli(cli(command)) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_expecting_success(command: Command) -> ExecutionSummary {
    match run_cli(cli(command)) {
        Ok(summary) => summary,
        Err(err) => panic!("command failed: {err}"),
    }
}
