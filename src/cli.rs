// src/cli.rs
//! CLI definitions for nexctl
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "nexctl")]
#[command(version)]
#[command(about = "Declarative configuration management for Sonatype Nexus Repository Manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the Nexus instance with the manifest
    Apply {
        /// Path to the manifest file
        #[arg(short, long, default_value = crate::manifest::DEFAULT_MANIFEST_PATH)]
        manifest: String,

        /// Endpoint config file or bare server URL
        #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
        config: String,

        /// Show what would change without making changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the changes an apply would make
    Plan {
        /// Path to the manifest file
        #[arg(short, long, default_value = crate::manifest::DEFAULT_MANIFEST_PATH)]
        manifest: String,

        /// Endpoint config file or bare server URL
        #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
        config: String,
    },

    /// List resources currently on the server
    List {
        /// Resource kind to list
        #[arg(value_enum)]
        kind: ResourceKind,

        /// Endpoint config file or bare server URL
        #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
        config: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// The resource kinds nexctl manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Roles,
    Blobstores,
}
