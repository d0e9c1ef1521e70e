// src/reconcile.rs

//! Plan computation between declared and remote state
//!
//! A plan is computed per resource kind: fetch current state from the
//! server, compare each declared resource against it, and emit a create,
//! update or delete action where they disagree. The primary key never
//! changes; an update always addresses the existing key.

use std::fmt;

use crate::manifest::Ensure;

/// A resource a plan can address, identified by its primary key
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for crate::roles::Role {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for crate::blobstores::Blobstore {
    fn key(&self) -> &str {
        &self.name
    }
}

/// An action to take to reach the declared state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAction {
    /// Create a resource that does not exist remotely
    Create { name: String },

    /// Update an existing resource that drifted from its declaration
    Update { name: String },

    /// Delete a resource declared absent
    Delete { name: String },
}

impl ResourceAction {
    /// The primary key this action addresses
    pub fn name(&self) -> &str {
        match self {
            ResourceAction::Create { name } => name,
            ResourceAction::Update { name } => name,
            ResourceAction::Delete { name } => name,
        }
    }
}

impl fmt::Display for ResourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceAction::Create { name } => write!(f, "Create {name}"),
            ResourceAction::Update { name } => write!(f, "Update {name}"),
            ResourceAction::Delete { name } => write!(f, "Delete {name}"),
        }
    }
}

/// The result of comparing declared resources against remote state
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    /// Actions to take, in manifest declaration order
    pub actions: Vec<ResourceAction>,

    /// Declared resources already matching their definition
    pub in_sync: Vec<String>,
}

impl ReconcilePlan {
    /// Check if no changes are needed
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn creates(&self) -> impl Iterator<Item = &ResourceAction> {
        self.actions
            .iter()
            .filter(|a| matches!(a, ResourceAction::Create { .. }))
    }

    pub fn updates(&self) -> impl Iterator<Item = &ResourceAction> {
        self.actions
            .iter()
            .filter(|a| matches!(a, ResourceAction::Update { .. }))
    }

    pub fn deletes(&self) -> impl Iterator<Item = &ResourceAction> {
        self.actions
            .iter()
            .filter(|a| matches!(a, ResourceAction::Delete { .. }))
    }
}

/// Compute the plan for one resource kind
///
/// `desired` pairs each declared resource with its ensure value; `current`
/// is the freshly fetched remote state. Resources that exist remotely but
/// are not declared are left alone.
pub fn compute_plan<R: Keyed>(
    desired: &[(Ensure, &R)],
    current: &[R],
    insync: impl Fn(&R, &R) -> bool,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for (ensure, resource) in desired {
        let name = resource.key();
        let existing = current.iter().find(|c| c.key() == name);

        match (*ensure, existing) {
            (Ensure::Present, None) => {
                plan.actions.push(ResourceAction::Create {
                    name: name.to_string(),
                });
            }
            (Ensure::Present, Some(actual)) => {
                if insync(actual, resource) {
                    plan.in_sync.push(name.to_string());
                } else {
                    plan.actions.push(ResourceAction::Update {
                        name: name.to_string(),
                    });
                }
            }
            (Ensure::Absent, Some(_)) => {
                plan.actions.push(ResourceAction::Delete {
                    name: name.to_string(),
                });
            }
            (Ensure::Absent, None) => {}
        }
    }

    plan
}
