//! kindpush - load images into every node of a kind cluster

use std::process::ExitCode;

use clap::Parser;
use kindpush_cli::cli::Cli;
use kindpush_cli::infra::logging::init_tracing;
use kindpush_cli::output::json::format_error;
use tokio_util::sync::CancellationToken;

/// Conventional exit status for a SIGINT-terminated command.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling node commands");
            interrupt.cancel();
        }
    });

    match cli.run(cancel.clone()).await {
        Ok(code) => code,
        Err(e) => {
            let interrupted = cancel.is_cancelled();
            match format_error(&e, interrupted) {
                Ok(doc) if json => println!("{doc}"),
                _ => eprintln!("Error: {e:#}"),
            }
            if interrupted {
                ExitCode::from(EXIT_INTERRUPTED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
