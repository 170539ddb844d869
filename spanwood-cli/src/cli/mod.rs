//! Command-line interface for computing and converting `.graph.mmd` files.
//!
//! `mst` prints a spanning tree, `inspect` reports what a file contains and
//! what went wrong while reading it, and `convert` re-saves a file under a
//! new title, optionally reduced to its spanning forest.

mod commands;

pub use commands::{
    Cli, CliError, CodecArgs, Command, ConvertArgs, ConvertSummary, ExecutionSummary, InspectArgs,
    InspectSummary, MethodArg, MstArgs, MstSummary, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
