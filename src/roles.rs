// src/roles.rs

//! Role resource provider
//!
//! Maps role descriptors onto the `security/roles` REST endpoints. Role
//! state is kept in snake_case in memory; the wire boundary translates to
//! the camelCase keys the API expects. Request payloads are built from the
//! descriptor without mutating it.
//!
//! A quirk inherited from the upstream API usage: the listing endpoint is
//! always fetched in full, so `get` accepts a name filter but does not
//! apply it. Filtering happens during planning, which only looks up the
//! names it manages.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::casing::{keys_to_camel_case, keys_to_snake_case};
use crate::error::{Error, Result};
use crate::transport::Transport;

/// A Nexus security role
///
/// Field names mirror the API attributes (snake_cased); optional fields
/// left unset are not sent and are ignored during sync comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role id (primary key, immutable once created)
    pub id: String,

    /// Display name; the API keeps this equal to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Where the role is defined, e.g. `default` or an LDAP realm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    /// Privileges granted by this role (order preserved)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileges: Option<Vec<String>>,

    /// Ids of roles this role inherits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Provider for role resources
pub struct RoleProvider<'a> {
    transport: &'a dyn Transport,
}

impl<'a> RoleProvider<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetch all roles from the server
    ///
    /// The `names` filter is accepted for interface symmetry with the
    /// blobstore provider but the full listing is returned regardless.
    pub fn get(&self, _names: &[String]) -> Result<Vec<Role>> {
        let res = self.transport.get("security/roles")?;
        if !res.success() {
            error!("Failed to list roles: {}", res.body);
        }

        let entries: Vec<Value> = serde_json::from_str(&res.body)?;
        entries
            .into_iter()
            .map(|entry| {
                let map = entry.as_object().ok_or_else(|| {
                    Error::TransportError("Role listing entry is not an object".to_string())
                })?;
                let role: Role = serde_json::from_value(Value::Object(keys_to_snake_case(map)))?;
                Ok(role)
            })
            .collect()
    }

    /// Create a new role
    pub fn create(&self, id: &str, role: &Role) -> Result<()> {
        let payload = create_payload(id, role)?;
        let res = self.transport.post("security/roles", &payload)?;
        if !res.success() {
            error!("Failed to create role {}: {}", id, res.body);
        }
        Ok(())
    }

    /// Update an existing role in place
    pub fn update(&self, id: &str, role: &Role) -> Result<()> {
        let payload = update_payload(id, role)?;
        let res = self
            .transport
            .put(&format!("security/roles/{id}"), &payload)?;
        if !res.success() {
            error!("Failed to update role {}: {}", id, res.body);
        }
        Ok(())
    }

    /// Delete a role
    pub fn delete(&self, id: &str) -> Result<()> {
        let res = self.transport.delete(&format!("security/roles/{id}"))?;
        if !res.success() {
            error!("Failed to delete role {}: {}", id, res.body);
        }
        Ok(())
    }
}

/// Whether a managed role matches its desired definition
///
/// Shallow per-field comparison: fields the desired descriptor leaves
/// unset are not compared. List order is significant.
pub fn insync(current: &Role, desired: &Role) -> bool {
    field_insync(&current.name, &desired.name)
        && field_insync(&current.description, &desired.description)
        && field_insync(&current.source, &desired.source)
        && field_insync(&current.read_only, &desired.read_only)
        && field_insync(&current.privileges, &desired.privileges)
        && field_insync(&current.roles, &desired.roles)
}

fn field_insync<T: PartialEq>(current: &Option<T>, desired: &Option<T>) -> bool {
    match desired {
        Some(want) => current.as_ref() == Some(want),
        None => true,
    }
}

/// Build the creation payload: the role's attributes with `name` set to
/// the id, snake_case keys as sent by the original provider
fn create_payload(id: &str, role: &Role) -> Result<Value> {
    let mut value = serde_json::to_value(role)?;
    let map = object_mut(&mut value)?;
    map.insert("name".to_string(), Value::String(id.to_string()));
    Ok(value)
}

/// Build the update payload: `name` and `id` both pinned to the id, keys
/// translated to the camelCase wire format
fn update_payload(id: &str, role: &Role) -> Result<Value> {
    let mut value = serde_json::to_value(role)?;
    let map = object_mut(&mut value)?;
    map.insert("name".to_string(), Value::String(id.to_string()));
    map.insert("id".to_string(), Value::String(id.to_string()));
    Ok(Value::Object(keys_to_camel_case(map)))
}

fn object_mut(value: &mut Value) -> Result<&mut serde_json::Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| Error::TransportError("Role did not serialize to an object".to_string()))
}
