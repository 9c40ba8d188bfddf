//! Entry point for the `prefscore` command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use prefscore_cli::{CliError, EXIT_SUCCESS, ScoreSummary, run};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run() {
        Ok(summary) => {
            report_success(&summary);
            ExitCode::from(EXIT_SUCCESS)
        }
        // Help and version requests print to stdout and exit cleanly.
        Err(CliError::ArgumentParsing(err)) if !err.use_stderr() => err.exit(),
        Err(err) => {
            report_failure(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

#[expect(
    clippy::print_stdout,
    reason = "the binary confirms where the scored table went"
)]
fn report_success(summary: &ScoreSummary) {
    println!(
        "Scored {} rows ({} labelled); wrote {}",
        summary.rows, summary.training_rows, summary.output
    );
}

#[expect(clippy::print_stderr, reason = "the binary reports failures on stderr")]
fn report_failure(err: &CliError) {
    eprintln!("prefscore: {err}");
}
