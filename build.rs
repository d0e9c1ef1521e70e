// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: manifest path
fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .short('m')
        .long("manifest")
        .value_name("PATH")
        .default_value("/etc/nexctl/manifest.toml")
        .help("Manifest path")
}

/// Common argument: endpoint config file or bare server URL
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH|URL")
        .default_value("/etc/nexctl/config.toml")
        .help("Endpoint config file or server URL")
}

fn build_cli() -> Command {
    Command::new("nexctl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Declarative configuration management for Sonatype Nexus Repository Manager")
        .subcommand(
            Command::new("apply")
                .about("Reconcile the Nexus instance with the manifest")
                .arg(manifest_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show what would change without making changes"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Show the changes an apply would make")
                .arg(manifest_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List resources currently on the server")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(["roles", "blobstores"])
                        .help("Resource kind to list"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("completion")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Target shell")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("nexctl.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
