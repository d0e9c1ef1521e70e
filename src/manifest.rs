// src/manifest.rs

//! Desired-state manifest
//!
//! The manifest is a TOML file declaring which roles and blobstores should
//! exist on the Nexus instance. It is the single input to a reconciliation
//! run; the remote API is re-fetched every run and remains the source of
//! truth for current state.
//!
//! # Example manifest.toml
//!
//! ```toml
//! version = 1
//!
//! [[roles]]
//! id = "reader"
//! description = "read access to raw repository"
//! privileges = ["nx-repository-view-raw-*-read"]
//!
//! [[roles]]
//! id = "legacy-admin"
//! ensure = "absent"
//!
//! [[blobstores]]
//! name = "default"
//! type = "file"
//!
//! [blobstores.attributes]
//! path = "/nexus-data/blobs/default"
//! ```
//!
//! Blobstore attribute tables use the wire-format camelCase keys the Nexus
//! API documents (e.g. `bucketConfiguration`).

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::blobstores::Blobstore;
use crate::error::{Error, Result};
use crate::roles::Role;

/// Current manifest file version
pub const MANIFEST_VERSION: u32 = 1;

/// Default path for the manifest file
pub const DEFAULT_MANIFEST_PATH: &str = "/etc/nexctl/manifest.toml";

/// Whether a declared resource should exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

/// A declared role
#[derive(Debug, Clone, Deserialize)]
pub struct RoleEntry {
    #[serde(default)]
    pub ensure: Ensure,

    #[serde(flatten)]
    pub role: Role,
}

/// A declared blobstore
#[derive(Debug, Clone, Deserialize)]
pub struct BlobstoreEntry {
    #[serde(default)]
    pub ensure: Ensure,

    #[serde(flatten)]
    pub store: Blobstore,
}

/// The desired state of the managed Nexus resources
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Manifest file version (for forward compatibility)
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub roles: Vec<RoleEntry>,

    #[serde(default)]
    pub blobstores: Vec<BlobstoreEntry>,
}

fn default_version() -> u32 {
    MANIFEST_VERSION
}

impl Manifest {
    /// Parse a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::ManifestError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let manifest: Manifest = toml::from_str(&content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load from the default path, or an explicit one
    pub fn load(arg: Option<&str>) -> Result<Self> {
        let path = arg.unwrap_or(DEFAULT_MANIFEST_PATH);
        Self::from_file(Path::new(path))
    }

    /// Names of all declared roles, in declaration order
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.role.id.clone()).collect()
    }

    /// Names of all declared blobstores, in declaration order
    pub fn blobstore_names(&self) -> Vec<String> {
        self.blobstores.iter().map(|b| b.store.name.clone()).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.version != MANIFEST_VERSION {
            return Err(Error::VersionMismatch {
                expected: MANIFEST_VERSION,
                found: self.version,
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.roles {
            if !seen.insert(entry.role.id.as_str()) {
                return Err(Error::ManifestError(format!(
                    "Duplicate role id '{}'",
                    entry.role.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.blobstores {
            if !seen.insert(entry.store.name.as_str()) {
                return Err(Error::ManifestError(format!(
                    "Duplicate blobstore name '{}'",
                    entry.store.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_manifest(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_roles_and_blobstores() {
        let file = write_manifest(
            r#"
version = 1

[[roles]]
id = "reader"
description = "read access"
privileges = ["nx-repository-view-raw-*-read"]

[[blobstores]]
name = "default"
type = "file"

[blobstores.attributes]
path = "/nexus-data/blobs/default"
"#,
        );

        let manifest = Manifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.roles.len(), 1);
        assert_eq!(manifest.roles[0].role.id, "reader");
        assert_eq!(manifest.roles[0].ensure, Ensure::Present);
        assert_eq!(manifest.blobstores.len(), 1);
        assert_eq!(manifest.blobstores[0].store.store_type, "file");
        assert_eq!(
            manifest.blobstores[0].store.attributes["path"],
            serde_json::json!("/nexus-data/blobs/default")
        );
    }

    #[test]
    fn test_ensure_absent() {
        let file = write_manifest("[[roles]]\nid = \"old\"\nensure = \"absent\"\n");
        let manifest = Manifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.roles[0].ensure, Ensure::Absent);
    }

    #[test]
    fn test_version_defaults_to_current() {
        let file = write_manifest("[[roles]]\nid = \"r\"\n");
        let manifest = Manifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.version, MANIFEST_VERSION);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let file = write_manifest("version = 2\n");
        match Manifest::from_file(file.path()) {
            Err(Error::VersionMismatch { expected, found }) => {
                assert_eq!(expected, 1);
                assert_eq!(found, 2);
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_role_id_rejected() {
        let file = write_manifest("[[roles]]\nid = \"dup\"\n\n[[roles]]\nid = \"dup\"\n");
        assert!(Manifest::from_file(file.path()).is_err());
    }

    #[test]
    fn test_names_in_declaration_order() {
        let file = write_manifest(
            "[[blobstores]]\nname = \"b\"\ntype = \"file\"\n\n[[blobstores]]\nname = \"a\"\ntype = \"file\"\n",
        );
        let manifest = Manifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.blobstore_names(), ["b", "a"]);
    }
}
