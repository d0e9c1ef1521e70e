// src/blobstores.rs

//! Blobstore resource provider
//!
//! Maps blobstore descriptors onto the `blobstores` REST endpoints. The
//! attribute tree is type-dependent (file path config, S3 bucket config,
//! ...) and is carried as an opaque JSON value in wire form. Sync
//! comparison canonicalizes both sides and excludes credential fields the
//! API never echoes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::canon::{canonicalize, delete_at_path};
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Credential paths Nexus accepts on write but never returns on read.
/// Both sides of a sync comparison have these pruned before comparing.
const REDACTED_PATHS: &[&[&str]] = &[&["bucketConfiguration", "bucketSecurity", "secretAccessKey"]];

/// A Nexus blobstore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blobstore {
    /// Blobstore name (primary key, immutable once created)
    pub name: String,

    /// Store type, lower-cased (`file`, `s3`, ...)
    #[serde(rename = "type")]
    pub store_type: String,

    /// Type-dependent attribute tree, wire-format (camelCase) keys
    #[serde(default = "empty_object")]
    pub attributes: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Summary entry from the `blobstores` listing
#[derive(Debug, Deserialize)]
pub struct BlobstoreSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: String,
}

/// Provider for blobstore resources
pub struct BlobstoreProvider<'a> {
    transport: &'a dyn Transport,
}

impl<'a> BlobstoreProvider<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetch the summary listing of all blobstores on the server
    pub fn list(&self) -> Result<Vec<BlobstoreSummary>> {
        let res = self.transport.get("blobstores")?;
        if !res.success() {
            error!("Failed to list blobstores: {}", res.body);
        }
        Ok(serde_json::from_str(&res.body)?)
    }

    /// Fetch the requested blobstores from the server
    ///
    /// The summary listing is filtered to `names`, then one detail request
    /// is made per match. Stores whose detail fetch fails (e.g. a type
    /// this API version cannot describe) are skipped.
    pub fn get(&self, names: &[String]) -> Result<Vec<Blobstore>> {
        let summaries = self.list()?;
        let mut stores = Vec::new();
        for summary in summaries {
            if !names.contains(&summary.name) {
                continue;
            }

            // The listing capitalizes types ('File'); the detail route wants lowercase
            let store_type = summary.store_type.to_lowercase();
            let res = self
                .transport
                .get(&format!("blobstores/{}/{}", store_type, summary.name))?;
            if !res.success() {
                debug!(
                    "Skipping blobstore {} ({}): detail fetch failed: {}",
                    summary.name, store_type, res.body
                );
                continue;
            }

            let attributes: Value = serde_json::from_str(&res.body)?;
            stores.push(Blobstore {
                name: summary.name,
                store_type,
                attributes,
            });
        }
        Ok(stores)
    }

    /// Create a new blobstore
    pub fn create(&self, name: &str, store: &Blobstore) -> Result<()> {
        let payload = create_payload(name, store)?;
        let res = self
            .transport
            .post(&format!("blobstores/{}", store.store_type), &payload)?;
        if !res.success() {
            error!("Failed to create blobstore {}: {}", name, res.body);
        }
        Ok(())
    }

    /// Update an existing blobstore's settings
    pub fn update(&self, name: &str, store: &Blobstore) -> Result<()> {
        let res = self.transport.put(
            &format!("blobstores/{}/{}", store.store_type, name),
            &store.attributes,
        )?;
        if !res.success() {
            error!("Failed to update blobstore {}: {}", name, res.body);
        }
        Ok(())
    }

    /// Delete a blobstore
    pub fn delete(&self, name: &str) -> Result<()> {
        let res = self.transport.delete(&format!("blobstores/{name}"))?;
        if !res.success() {
            error!("Failed to delete blobstore {}: {}", name, res.body);
        }
        Ok(())
    }
}

/// Canonicalize the attribute trees of a working set before comparison
pub fn canonicalize_all(stores: &mut [Blobstore]) {
    for store in stores {
        store.attributes = canonicalize(&store.attributes);
    }
}

/// Whether a managed blobstore matches its desired definition
///
/// The type must match and the attribute trees must be structurally equal
/// after canonicalization, ignoring redacted credential paths.
pub fn insync(current: &Blobstore, desired: &Blobstore) -> bool {
    current.store_type == desired.store_type
        && attributes_insync(&current.attributes, &desired.attributes)
}

/// Structural equality of two attribute trees, modulo key order and the
/// credential fields the API never returns
pub fn attributes_insync(current: &Value, desired: &Value) -> bool {
    let mut current = canonicalize(current);
    let mut desired = canonicalize(desired);

    for path in REDACTED_PATHS {
        delete_at_path(&mut current, path);
        delete_at_path(&mut desired, path);
    }

    current == desired
}

/// Build the creation payload: the attribute tree with `name` injected
fn create_payload(name: &str, store: &Blobstore) -> Result<Value> {
    let mut payload = store.attributes.clone();
    let map = payload.as_object_mut().ok_or_else(|| {
        Error::TransportError(format!("Blobstore {name} attributes are not an object"))
    })?;
    map.insert("name".to_string(), Value::String(name.to_string()));
    Ok(payload)
}
