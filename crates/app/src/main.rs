//! Music API smoke-test runner - Main Entry Point
//!
//! Loads settings, runs the music API suite once and prints the report to
//! stdout. Test failures do not change the exit status; only startup errors
//! (bad settings, client construction) or an unwritable stdout do.

mod cli;

use std::error::Error;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use music_smoke_application::{RunSmokeSuite, music_api_suite};
use music_smoke_infrastructure::{ConsoleReporter, ReqwestHttpClient, SmokeSettings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nothing left to report to if stderr is gone
            let _ = write_startup_error(&mut io::stderr().lock(), e.as_ref());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings =
        SmokeSettings::load(cli.config.as_deref())?.with_overrides(cli.base_url, cli.timeout_secs);
    let base_url = settings.base_url()?;

    let mut suite = music_api_suite();
    if let Some(timeout) = settings.timeout()? {
        suite = suite.with_timeout(timeout);
    }

    tracing::debug!(?settings, "Settings loaded");

    let client = Arc::new(ReqwestHttpClient::new()?);
    let use_case = RunSmokeSuite::new(client, base_url);
    let mut reporter = ConsoleReporter::stdout();

    let summary = use_case.run(&suite, &mut reporter).await?;
    if !summary.all_passed() {
        tracing::warn!(
            failed = summary.failed(),
            total = summary.total(),
            "Smoke run finished with failures"
        );
    }

    Ok(())
}

/// Writes the human-readable form of a startup error.
fn write_startup_error(out: &mut impl Write, err: &dyn Error) -> io::Result<()> {
    writeln!(out, "error: {err}")
}
