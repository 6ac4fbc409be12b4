//! Host-provided collaborators: confirmation prompts, formula evaluation, settings.

use async_trait::async_trait;
use itemspells_domain::StatContext;
use serde::{Deserialize, Serialize};

use super::error::FormulaError;

// =============================================================================
// Confirmation prompts
// =============================================================================

/// A yes/no question put to the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPrompt {
    pub title: String,
    pub content: String,
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmPort: Send + Sync {
    /// Ask the user; `false` covers both "no" and a dismissed/cancelled prompt.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

// =============================================================================
// Formula evaluation
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait FormulaEvaluator: Send + Sync {
    /// Evaluate a formula to a number without any random terms.
    fn evaluate(&self, formula: &str, ctx: &StatContext) -> Result<i64, FormulaError>;
}

// =============================================================================
// Settings
// =============================================================================

/// A raw setting value as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    /// Truthiness of the value.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            ),
        }
    }
}

/// Pure key -> value settings lookup.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsReader: Send + Sync {
    fn get(&self, key: &str) -> Option<SettingValue>;
}
