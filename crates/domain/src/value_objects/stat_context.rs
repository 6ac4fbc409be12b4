//! StatContext - the roll data formulas are evaluated against

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How roll data is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollDataMode {
    /// Base values only; temporary and conditional modifiers are ignored
    #[default]
    Deterministic,
    /// Base values plus every active modifier
    Full,
}

/// Flat map of `@path` references to numbers.
///
/// Keys are stored without the leading `@` (e.g. `abilities.int.mod`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatContext(BTreeMap<String, f64>);

impl StatContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<f64>) {
        self.0.insert(path.into(), value.into());
    }

    pub fn with(mut self, path: impl Into<String>, value: impl Into<f64>) -> Self {
        self.insert(path, value);
        self
    }

    /// Look up a path; a leading `@` is accepted.
    pub fn get(&self, path: &str) -> Option<f64> {
        self.0.get(path.strip_prefix('@').unwrap_or(path)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
