// src/commands/list.rs

//! List command: dump current remote state

use anyhow::Result;

use crate::blobstores::BlobstoreProvider;
use crate::cli::ResourceKind;
use crate::config::Config;
use crate::roles::RoleProvider;
use crate::transport::NexusClient;

/// List resources currently on the server
pub fn cmd_list(kind: ResourceKind, config_arg: &str) -> Result<()> {
    let config = Config::from_url_or_file(config_arg)?;
    let client = NexusClient::new(&config)?;

    match kind {
        ResourceKind::Roles => list_roles(&client),
        ResourceKind::Blobstores => list_blobstores(&client),
    }
}

fn list_roles(client: &NexusClient) -> Result<()> {
    let provider = RoleProvider::new(client);
    let roles = provider.get(&[])?;

    if roles.is_empty() {
        println!("No roles found");
        return Ok(());
    }

    for role in &roles {
        match &role.description {
            Some(description) => println!("{}  {}", role.id, description),
            None => println!("{}", role.id),
        }
    }
    Ok(())
}

fn list_blobstores(client: &NexusClient) -> Result<()> {
    let provider = BlobstoreProvider::new(client);
    let summaries = provider.list()?;

    if summaries.is_empty() {
        println!("No blobstores found");
        return Ok(());
    }

    for summary in &summaries {
        println!("{}  {}", summary.name, summary.store_type.to_lowercase());
    }
    Ok(())
}
