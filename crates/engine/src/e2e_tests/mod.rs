//! Scenario tests.
//!
//! These tests drive the complete App through the in-memory adapters:
//! - Item lifecycle events (create/delete) and their effect on the store
//! - Spellbook partitioning of the resulting character
//! - Authoring spell templates through the editor
//!
//! # Running
//!
//! ```bash
//! cargo test -p itemspells-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod lifecycle_tests;
mod spellbook_tests;

pub use e2e_helpers::*;
