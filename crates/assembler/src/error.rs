//! Error types for assembler operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssemblerError>;

/// Errors raised while configuring or running an assembler.
///
/// An unresolved component key is deliberately not represented here: skipping
/// an element the registry does not know is normal operation and is reported
/// through [`crate::MountReport`] and the log stream instead.
#[derive(Error, Debug)]
pub enum AssemblerError {
    #[error("Invalid marker {marker:?}: must form a valid data attribute name")]
    InvalidMarker { marker: String },

    #[error("Component name must not be empty")]
    EmptyComponentName,

    #[error("Invalid fallback pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Document error: {0}")]
    Dom(#[from] dom::DomError),
}
