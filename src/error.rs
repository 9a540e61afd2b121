/// Error types for the import scheduler
///
/// Validation failures are field-scoped so callers can report every rejected
/// field at once. Graph and command errors signal programmer or configuration
/// mistakes and are never swallowed. Failures from the workspace and the
/// scheduler client pass through untouched.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rejected field with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Field path as seen by the client (e.g. "startTime", "frequency.unit")
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field error collected by an accumulating validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Turn a possibly empty list into a result
    pub fn into_result(errors: Vec<FieldError>) -> std::result::Result<(), ValidationErrors> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "validation failed: {}", joined.join("; "))
    }
}

/// Workflow graph invariant violations, raised while building
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("duplicate node name '{0}'")]
    DuplicateNode(String),

    #[error("node name '{0}' is reserved")]
    ReservedName(String),

    #[error("node '{from}' transitions to undefined node '{to}'")]
    DanglingTransition { from: String, to: String },

    #[error("start node '{0}' is not defined")]
    UnknownStart(String),

    #[error("node '{0}' has no predecessor")]
    Orphan(String),

    #[error("start node '{0}' must not have predecessors")]
    StartHasPredecessor(String),

    #[error("workflow graph contains a cycle through '{0}'")]
    Cycle(String),

    #[error("invalid coordinator schedule: {0}")]
    InvalidSchedule(String),
}

/// Import tool command line assembly errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("required argument '{0}' has no value")]
    MissingArgument(&'static str),
}

/// Everything that can stop a submission pipeline
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Command(#[from] CommandError),

    /// Workspace or scheduler-client failure, propagated unmodified
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SubmissionError>;
