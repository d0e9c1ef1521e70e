// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};

use nexctl::cli::{Cli, Commands};
use nexctl::commands::{cmd_apply, cmd_list, cmd_plan};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            manifest,
            config,
            dry_run,
        } => cmd_apply(&manifest, &config, dry_run),
        Commands::Plan { manifest, config } => cmd_plan(&manifest, &config),
        Commands::List { kind, config } => cmd_list(kind, &config),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
