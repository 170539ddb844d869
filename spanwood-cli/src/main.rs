//! Entry point for the `spanwood` binary.
//!
//! Initialises logging, runs the parsed command, prints its summary to
//! stdout and turns failures into a non-zero exit code with the error's
//! stable code attached to the log record.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use spanwood_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, detail_code) = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => {
                    let detail = core
                        .graph_code()
                        .map(|code| code.as_str())
                        .or_else(|| core.codec_code().map(|code| code.as_str()));
                    Some((Some(core.code().as_str()), detail))
                }
                CliError::Rejected { .. } => None,
            })
            .unwrap_or((None, None));

        error!(
            error = %err,
            code = code.map(field::display),
            detail_code = detail_code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
