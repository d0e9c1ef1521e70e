// src/commands/apply.rs

//! Plan and apply commands
//!
//! Both commands load the manifest and fetch current state for the two
//! managed resource kinds, then compute a plan per kind. `apply` walks the
//! plan sequentially; a failed action is logged and the run continues with
//! the next resource.

use anyhow::Result;
use tracing::{error, info};

use crate::blobstores::{self, BlobstoreProvider};
use crate::config::Config;
use crate::manifest::{Ensure, Manifest};
use crate::reconcile::{ReconcilePlan, ResourceAction, compute_plan};
use crate::roles::{self, RoleProvider};
use crate::transport::NexusClient;

/// Show the changes an apply would make
pub fn cmd_plan(manifest_path: &str, config_arg: &str) -> Result<()> {
    let (manifest, client) = load(manifest_path, config_arg)?;
    let (role_plan, store_plan) = plan(&manifest, &client)?;

    display_plans(&role_plan, &store_plan);
    Ok(())
}

/// Reconcile the Nexus instance with the manifest
pub fn cmd_apply(manifest_path: &str, config_arg: &str, dry_run: bool) -> Result<()> {
    let (manifest, client) = load(manifest_path, config_arg)?;
    let (role_plan, store_plan) = plan(&manifest, &client)?;

    display_plans(&role_plan, &store_plan);

    if role_plan.is_empty() && store_plan.is_empty() {
        return Ok(());
    }

    if dry_run {
        println!("Dry run - no changes made");
        return Ok(());
    }

    apply_role_plan(&manifest, &client, &role_plan);
    apply_store_plan(&manifest, &client, &store_plan);

    println!(
        "Applied {} change(s)",
        role_plan.actions.len() + store_plan.actions.len()
    );
    Ok(())
}

fn load(manifest_path: &str, config_arg: &str) -> Result<(Manifest, NexusClient)> {
    let manifest = Manifest::from_file(std::path::Path::new(manifest_path))?;
    let config = Config::from_url_or_file(config_arg)?;
    let client = NexusClient::new(&config)?;
    Ok((manifest, client))
}

fn plan(manifest: &Manifest, client: &NexusClient) -> Result<(ReconcilePlan, ReconcilePlan)> {
    let role_provider = RoleProvider::new(client);
    let store_provider = BlobstoreProvider::new(client);

    let role_names = manifest.role_names();
    let current_roles = role_provider.get(&role_names)?;
    info!("Fetched {} role(s) from server", current_roles.len());

    let store_names = manifest.blobstore_names();
    let mut current_stores = store_provider.get(&store_names)?;
    blobstores::canonicalize_all(&mut current_stores);
    info!("Fetched {} blobstore(s) from server", current_stores.len());

    let desired_roles: Vec<_> = manifest
        .roles
        .iter()
        .map(|entry| (entry.ensure, &entry.role))
        .collect();
    let role_plan = compute_plan(&desired_roles, &current_roles, |c, d| roles::insync(c, d));

    let desired_stores: Vec<_> = manifest
        .blobstores
        .iter()
        .map(|entry| (entry.ensure, &entry.store))
        .collect();
    let store_plan = compute_plan(&desired_stores, &current_stores, |c, d| {
        blobstores::insync(c, d)
    });

    Ok((role_plan, store_plan))
}

fn display_plans(role_plan: &ReconcilePlan, store_plan: &ReconcilePlan) {
    if role_plan.is_empty() && store_plan.is_empty() {
        println!("Nexus instance is in sync with manifest - no changes needed");
        return;
    }

    println!("Changes needed to reach manifest state:");
    println!();
    display_plan("Roles", role_plan);
    display_plan("Blobstores", store_plan);

    let in_sync = role_plan.in_sync.len() + store_plan.in_sync.len();
    println!(
        "{} change(s), {} resource(s) in sync",
        role_plan.actions.len() + store_plan.actions.len(),
        in_sync
    );
}

fn display_plan(heading: &str, plan: &ReconcilePlan) {
    if plan.is_empty() {
        return;
    }

    println!("{heading}:");
    for action in plan.creates() {
        println!("  + {action}");
    }
    for action in plan.updates() {
        println!("  * {action}");
    }
    for action in plan.deletes() {
        println!("  - {action}");
    }
    println!();
}

fn apply_role_plan(manifest: &Manifest, client: &NexusClient, plan: &ReconcilePlan) {
    let provider = RoleProvider::new(client);
    for action in &plan.actions {
        let Some(entry) = manifest.roles.iter().find(|e| e.role.id == action.name()) else {
            continue;
        };

        let result = match action {
            ResourceAction::Create { name } => provider.create(name, &entry.role),
            ResourceAction::Update { name } => provider.update(name, &entry.role),
            ResourceAction::Delete { name } => provider.delete(name),
        };

        match result {
            Ok(()) => info!("{action} (role)"),
            Err(e) => error!("Failed to apply '{action}' for role: {e}"),
        }
    }
}

fn apply_store_plan(manifest: &Manifest, client: &NexusClient, plan: &ReconcilePlan) {
    let provider = BlobstoreProvider::new(client);
    for action in &plan.actions {
        let Some(entry) = manifest
            .blobstores
            .iter()
            .find(|e| e.store.name == action.name())
        else {
            continue;
        };

        let result = match action {
            ResourceAction::Create { name } => provider.create(name, &entry.store),
            ResourceAction::Update { name } => provider.update(name, &entry.store),
            ResourceAction::Delete { name } => provider.delete(name),
        };

        match result {
            Ok(()) => info!("{action} (blobstore)"),
            Err(e) => error!("Failed to apply '{action}' for blobstore: {e}"),
        }
    }
}
