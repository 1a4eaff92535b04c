//! Cadence Script
//!
//! Serializable chain definitions. A script names a chain and lists its steps
//! in order; [`ScriptDef::into_chain`] turns the definition into a runnable
//! [`cadence_chain::Chain`] wired to a transition driver.
//!
//! Scripts can be loaded from JSON files (via the CLI) or embedded as JSON
//! blobs.

mod def;
mod error;

pub use def::{ScriptDef, StepDef};
pub use error::ScriptError;
