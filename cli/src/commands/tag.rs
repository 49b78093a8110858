//! `kindpush tag`: retag an image already present on every node.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use kindpush_common::{ImageRef, Operation};

use crate::app::AppContext;
use crate::application::services::Publisher;
use crate::output::reporter::TerminalReporter;

/// Arguments for the tag command.
#[derive(Args)]
pub struct TagArgs {
    /// Reference already imported on the nodes
    pub old: ImageRef,
    /// New reference to point at the same image
    pub new: ImageRef,
}

/// Run the tag command.
///
/// # Errors
///
/// Returns the rollout's `PublishError` (wrapped) on failure.
pub async fn run(app: &AppContext, args: TagArgs) -> Result<ExitCode> {
    let source = app.node_source();
    let reporter = TerminalReporter::new(&app.output);
    let result = Publisher::new(&source, app.cluster.clone())
        .with_max_concurrency(app.config.exec.max_concurrency)
        .with_reporter(&reporter)
        .tag(&args.old, &args.new, &app.cancel)
        .await;

    match result {
        Ok(rollout) => {
            reporter.finish(true, &format!("Tagged {} as {}", args.old, args.new));
            let out = rollout.to_output(Operation::Tag, args.new.as_str(), Some(args.old.as_str()));
            super::render_rollout(app, &out)
        }
        Err(e) => {
            reporter.finish(false, &format!("Tagging {} failed", args.old));
            Err(e.into())
        }
    }
}
