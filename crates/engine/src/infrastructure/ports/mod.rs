//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document storage (characters, items, source spells)
//! - Host interaction (confirmation prompts, settings)
//! - Ruleset formula evaluation

mod error;
mod external;
mod repos;

// =============================================================================
// Store Ports
// =============================================================================
pub use repos::{CharacterRepo, ItemRepo, SpellSource};

// =============================================================================
// Host Ports
// =============================================================================
pub use external::{ConfirmPort, ConfirmPrompt, FormulaEvaluator, SettingValue, SettingsReader};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCharacterRepo, MockItemRepo, MockSpellSource};

#[cfg(test)]
pub use external::{MockConfirmPort, MockFormulaEvaluator, MockSettingsReader};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{FormulaError, RepoError};
