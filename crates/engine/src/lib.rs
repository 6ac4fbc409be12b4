//! Item spells engine.
//!
//! Keeps spells granted by items consistent with the items that grant
//! them, and partitions a character's spellbook by granting item.
//!
//! ## Structure
//!
//! - `use_cases/` - Lifecycle synchronization, spellbook partitioning, override editor
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Scenario tests wired through the in-memory adapters.
#[cfg(test)]
mod e2e_tests;

pub use app::{App, Ports};
