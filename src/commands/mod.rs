// src/commands/mod.rs

//! Command implementations for the nexctl CLI

mod apply;
mod list;

pub use apply::{cmd_apply, cmd_plan};
pub use list::cmd_list;
