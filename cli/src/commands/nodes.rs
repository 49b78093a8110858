//! `kindpush nodes`: list the nodes a rollout would target.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::NodeHandle;
use crate::application::services::nodes::list_nodes;
use crate::domain::rollout::node_list_output;
use crate::output::human::HumanRenderer;
use crate::output::json;

/// Run the nodes command.
///
/// # Errors
///
/// Returns an error if the engine cannot list the cluster's containers.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let source = app.node_source();
    let nodes = list_nodes(&source, &app.cluster).await?;
    let names: Vec<String> = nodes.iter().map(|n| n.display_name().to_string()).collect();
    let out = node_list_output(&app.cluster, &names);

    if app.is_json() {
        println!("{}", json::to_pretty(&out)?);
    } else {
        HumanRenderer::new(&app.output).render_nodes(&out);
    }
    Ok(ExitCode::SUCCESS)
}
