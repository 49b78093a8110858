//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, AppFlags, OutputFlags, OutputMode};
use crate::commands;

/// Load locally built images into every node of a kind cluster
#[derive(Parser)]
#[command(
    name = "kindpush",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Target cluster (default: config file, then `kind`)
    #[arg(long, global = true, env = "KIND_CLUSTER_NAME")]
    pub cluster: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import an image into every node
    Publish(commands::publish::PublishArgs),

    /// Tag an image already on every node with a new reference
    Tag(commands::tag::TagArgs),

    /// List the nodes of the cluster
    Nodes,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot be built or the command fails.
    pub async fn run(self, cancel: CancellationToken) -> Result<ExitCode> {
        let Cli {
            cluster,
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            cluster,
        };
        let app = || AppContext::new(&flags, cancel.clone());

        match command {
            Command::Publish(args) => commands::publish::run(&app()?, args).await,
            Command::Tag(args) => commands::tag::run(&app()?, args).await,
            Command::Nodes => commands::nodes::run(&app()?).await,
            Command::Config(cmd) => commands::config::run(&app()?, cmd),
            Command::Version => {
                commands::version::run(if json {
                    OutputMode::Json
                } else {
                    OutputMode::Human
                });
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
