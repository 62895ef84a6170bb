//! Error types for the rigbridge workspace.
//!
//! Every fault in the system is converted to this enum before it reaches a
//! command boundary; handlers then turn it into a structured error response.
//! Precondition misses that the operations report as `skipped` are **not**
//! errors and never appear here.
//!
//! # Examples
//!
//! ```
//! use rigbridge_core::{Error, Result};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(Error::ObjectNotFound {
//!         name: name.to_string(),
//!     })
//! }
//!
//! let err = lookup("Cube").unwrap_err();
//! assert!(err.is_not_found());
//! ```

use thiserror::Error;

/// Main error type for rigbridge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A named scene object (mesh or armature) does not exist.
    #[error("Object not found: {name}")]
    ObjectNotFound {
        /// Name of the missing object.
        name: String,
    },

    /// A bone was not found in an armature's current bone set.
    #[error("Bone '{bone}' not found in armature '{armature}'")]
    BoneNotFound {
        /// Armature that was searched.
        armature: String,
        /// Name of the missing bone.
        bone: String,
    },

    /// No suitable candidate object could be inferred from the scene.
    ///
    /// Raised when a command omits explicit names and the candidate
    /// selector finds nothing usable.
    #[error("Could not find a suitable {what} in the scene")]
    NoCandidate {
        /// What was being searched for (e.g. "mesh object").
        what: String,
    },

    /// A command parameter is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request named a command that does not exist.
    #[error("Unknown command type: {name}")]
    UnknownCommand {
        /// The unrecognized command name.
        name: String,
    },

    /// The request named a command whose capability group is disabled.
    #[error("Command '{name}' is disabled: capability '{capability}' not enabled")]
    CapabilityDisabled {
        /// The requested command name.
        name: String,
        /// The capability group that would be required.
        capability: String,
    },

    /// An underlying host scene operation failed.
    ///
    /// The host's message text is forwarded verbatim, never interpreted.
    #[error("{operation} failed: {message}")]
    HostOperationFailed {
        /// The host operation that failed (e.g. "FBX export").
        operation: String,
        /// Failure text as reported by the host.
        message: String,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
        /// Underlying serde error, when one exists.
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    /// Returns `true` for any not-found variant (object, bone, or inferred
    /// candidate).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ObjectNotFound { .. } | Self::BoneNotFound { .. } | Self::NoCandidate { .. }
        )
    }

    /// Returns `true` if this is an unknown-command (malformed request)
    /// error.
    #[must_use]
    pub const fn is_unknown_command(&self) -> bool {
        matches!(self, Self::UnknownCommand { .. })
    }

    /// Returns `true` if this wraps a host operation failure.
    #[must_use]
    pub const fn is_host_failure(&self) -> bool {
        matches!(self, Self::HostOperationFailed { .. })
    }

    /// Returns `true` if this is an invalid-argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Convenience constructor for serde failures.
    #[must_use]
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(source),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// Result type alias for rigbridge operations.
pub type Result<T> = std::result::Result<T, Error>;
