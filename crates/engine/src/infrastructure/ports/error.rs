//! Error types for port operations.

/// Store operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Document not found - includes document type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Store operation failed - includes operation name for tracing.
    #[error("Store error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

impl RepoError {
    /// Create a NotFound error with document type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Formula evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("Empty formula")]
    Empty,
    #[error("Invalid formula '{formula}': {reason}")]
    Parse { formula: String, reason: String },
    #[error("Unknown reference @{0}")]
    UnknownReference(String),
    /// The formula contains a random term (a dice roll)
    #[error("Formula is not deterministic: '{0}'")]
    NonDeterministic(String),
    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),
}

impl FormulaError {
    pub fn parse(formula: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}
