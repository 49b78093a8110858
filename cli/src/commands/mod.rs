//! Command implementations

pub mod config;
pub mod nodes;
pub mod publish;
pub mod tag;
pub mod version;

use std::process::ExitCode;

use anyhow::Result;
use kindpush_common::RolloutOutput;

use crate::app::AppContext;
use crate::output::human::HumanRenderer;
use crate::output::json;

/// Print a finished rollout in the active output mode.
pub(crate) fn render_rollout(app: &AppContext, rollout: &RolloutOutput) -> Result<ExitCode> {
    if app.is_json() {
        println!("{}", json::to_pretty(rollout)?);
    } else {
        HumanRenderer::new(&app.output).render_rollout(rollout);
    }
    Ok(ExitCode::SUCCESS)
}
