use std::io;

use thiserror::Error;

use super::validator::ValidationError;

/// Errors raised while loading a world or setting up a session. Nothing in
/// command handling returns these; play-time failures are narration.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to read world file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse world file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid world: {0}")]
    Invalid(String),

    #[error("world validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
