// src/lib.rs

//! nexctl - declarative configuration for Sonatype Nexus Repository Manager
//!
//! nexctl reconciles a declared set of security roles and blobstores
//! against a running Nexus instance over its v1 REST API.
//!
//! # Architecture
//!
//! - Manifest-first: desired state lives in a TOML manifest; the remote
//!   API is the single source of truth for current state and is
//!   re-fetched on every run
//! - Providers: one CRUD adapter per resource kind (`roles`,
//!   `blobstores`), each a thin mapping onto the REST endpoints
//! - Canonicalization: attribute trees are deep-sorted and credential
//!   fields the API never echoes are excluded before sync comparison
//! - Wire casing: snake_case state internally, camelCase at the
//!   serialization boundary

pub mod blobstores;
pub mod canon;
pub mod casing;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod manifest;
pub mod reconcile;
pub mod roles;
pub mod transport;

pub use blobstores::{Blobstore, BlobstoreProvider, BlobstoreSummary};
pub use canon::{canonicalize, delete_at_path};
pub use casing::{keys_to_camel_case, keys_to_snake_case};
pub use config::Config;
pub use error::{Error, Result};
pub use manifest::{Ensure, Manifest};
pub use reconcile::{ReconcilePlan, ResourceAction, compute_plan};
pub use roles::{Role, RoleProvider};
pub use transport::{ApiResponse, NexusClient, Transport};
