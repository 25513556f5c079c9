//! Error types for ConnectPulse.

use std::time::Duration;

use uuid::Uuid;

use crate::wizard::draft::DraftField;
use crate::wizard::step::Step;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the profile/group directory backends.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Request to {table} failed: {reason}")]
    Request { table: String, reason: String },

    #[error("Backend returned {status} for {table}: {body}")]
    Status {
        table: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {table} rows: {reason}")]
    Decode { table: String, reason: String },

    #[error("Request to {table} timed out after {timeout:?}")]
    Timeout { table: String, timeout: Duration },
}

/// Rejected wizard events. The dispatcher's state is untouched when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Event {event} is not allowed on step {step}")]
    NotAllowed { step: Step, event: String },

    #[error("Step {step} is missing required fields: {}", join_fields(.missing))]
    Incomplete { step: Step, missing: Vec<DraftField> },

    #[error("Wizard session {id} not found")]
    SessionNotFound { id: Uuid },
}

/// Chat room errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("Message content is empty")]
    EmptyMessage,

    #[error("Reaction is empty")]
    EmptyReaction,

    #[error("Group {id} not found")]
    GroupNotFound { id: String },

    #[error("Message {id} not found")]
    MessageNotFound { id: Uuid },
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
