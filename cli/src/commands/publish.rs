//! `kindpush publish`: import an image into every node of the cluster.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{ArgGroup, Args};
use kindpush_common::{ImageRef, Operation};

use crate::app::AppContext;
use crate::application::ports::ImageExporter;
use crate::application::services::Publisher;
use crate::domain::Rollout;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::engine::EngineNodeSource;
use crate::infra::image::{ArchiveExporter, EngineSaveExporter};
use crate::output::reporter::TerminalReporter;

/// Arguments for the publish command.
#[derive(Args)]
#[command(group(ArgGroup::new("image").required(true).args(["archive", "from_engine"])))]
pub struct PublishArgs {
    /// Reference the image is imported as on every node
    pub target: ImageRef,

    /// docker-archive tarball to publish (as written by `docker save`)
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Image held by the host engine, exported with `<engine> save`
    #[arg(long, value_name = "REF")]
    pub from_engine: Option<ImageRef>,
}

/// Run the publish command.
///
/// # Errors
///
/// Returns the rollout's `PublishError` (wrapped) on failure.
pub async fn run(app: &AppContext, args: PublishArgs) -> Result<ExitCode> {
    let source = app.node_source();
    let reporter = TerminalReporter::new(&app.output);

    let (result, from) = match (args.archive, args.from_engine) {
        (Some(path), _) => {
            let from = path.display().to_string();
            let exporter = ArchiveExporter::new(path);
            (write(app, &source, &reporter, &args.target, &exporter).await, from)
        }
        (None, Some(image)) => {
            let from = image.to_string();
            let exporter =
                EngineSaveExporter::new(app.engine, image, Arc::clone(&app.runner), app.cancel.clone());
            (write(app, &source, &reporter, &args.target, &exporter).await, from)
        }
        (None, None) => anyhow::bail!("one of --archive or --from-engine is required"),
    };

    match result {
        Ok(rollout) => {
            reporter.finish(true, &format!("Published {}", args.target));
            let out = rollout.to_output(Operation::Publish, args.target.as_str(), Some(&from));
            super::render_rollout(app, &out)
        }
        Err(e) => {
            reporter.finish(false, &format!("Publishing {} failed", args.target));
            Err(e.into())
        }
    }
}

async fn write(
    app: &AppContext,
    source: &EngineNodeSource<TokioCommandRunner>,
    reporter: &TerminalReporter<'_>,
    target: &ImageRef,
    exporter: &impl ImageExporter,
) -> Result<Rollout, crate::domain::PublishError> {
    Publisher::new(source, app.cluster.clone())
        .with_max_concurrency(app.config.exec.max_concurrency)
        .with_reporter(reporter)
        .write(target, exporter, &app.cancel)
        .await
}
