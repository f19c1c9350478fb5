//! Domain error taxonomy for the journal.
//!
//! Storage and settings code keeps using `anyhow`; these variants travel inside it where
//! layers mix, so callers can recover them with `downcast_ref::<JournalError>()`.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum JournalError {
    /// Movement readings are missing or empty. Informational, never fatal.
    #[display("No movement readings available: {reason}")]
    DataUnavailable { reason: String },

    /// The text-generation collaborator failed for one prompt.
    #[display("Text generation failed for {scope}: {message}")]
    GenerationFailure { scope: String, message: String },

    /// A readings row was skipped.
    #[display("Skipped reading on line {line}: {reason}")]
    MalformedReading { line: usize, reason: String },

    #[display("Crew entries are already being retrieved")]
    DuplicateTrigger,

    #[display("Crew entries did not arrive within {} seconds", waited.as_secs())]
    Timeout { waited: Duration },

    #[display("Hold on! We need more info about your pal! Missing: {}", missing.join(", "))]
    IncompletePersona { missing: Vec<String> },

    #[display("A plant named '{name}' is already on the crew")]
    DuplicatePersona { name: String },
}

impl JournalError {
    pub fn generation(scope: impl Into<String>, err: impl std::fmt::Display) -> Self {
        JournalError::GenerationFailure {
            scope: scope.into(),
            message: err.to_string(),
        }
    }

    /// Informational errors are shown as notices rather than failures.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            JournalError::DataUnavailable { .. } | JournalError::MalformedReading { .. }
        )
    }
}
