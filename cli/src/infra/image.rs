//! `ImageExporter` implementations: local archive files and `<engine> save`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use kindpush_common::ImageRef;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{CommandRunner, ImageExporter};
use crate::domain::Engine;
use crate::infra::archive::retarget_archive;

/// Reads a `docker save` tarball from disk.
pub struct ArchiveExporter {
    path: PathBuf,
}

impl ArchiveExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageExporter for ArchiveExporter {
    async fn export(&self, target: &ImageRef) -> Result<Vec<u8>> {
        let raw = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        retarget_archive(&raw, target)
            .with_context(|| format!("invalid image archive {}", self.path.display()))
    }
}

/// Exports an image held by the host engine with `<engine> save`.
pub struct EngineSaveExporter<R: CommandRunner> {
    engine: Engine,
    source: ImageRef,
    runner: Arc<R>,
    cancel: CancellationToken,
}

impl<R: CommandRunner> EngineSaveExporter<R> {
    pub fn new(engine: Engine, source: ImageRef, runner: Arc<R>, cancel: CancellationToken) -> Self {
        Self {
            engine,
            source,
            runner,
            cancel,
        }
    }
}

impl<R: CommandRunner> ImageExporter for EngineSaveExporter<R> {
    async fn export(&self, target: &ImageRef) -> Result<Vec<u8>> {
        let bin = self.engine.binary();
        let output = self
            .runner
            .run_with_stdin(bin, &["save", self.source.as_str()], None, &self.cancel)
            .await
            .with_context(|| format!("failed to run {bin} save"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{bin} save {} failed: {}", self.source, stderr.trim());
        }
        tracing::debug!(source = %self.source, size_bytes = output.stdout.len(), "image saved");
        retarget_archive(&output.stdout, target)
            .with_context(|| format!("{bin} save {} produced an invalid archive", self.source))
    }
}
