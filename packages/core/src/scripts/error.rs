//! Script lookup error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by script lookups
///
/// Lookups never retry and never fall back to another location; every
/// failure reaches the caller as one of these variants.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// No resource exists under the requested name
    #[error("script '{name}' is not bundled")]
    NotFound { name: String },

    /// The name can never resolve to a bundled resource (traversal, absolute path, ...)
    #[error("script name '{name}' is invalid: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The bundle root itself does not exist
    #[error("script bundle not found at {}", .root.display())]
    BundleMissing { root: PathBuf },

    /// The resource exists but could not be read
    #[error("failed to read script '{name}': {source}")]
    Unreadable {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl ScriptError {
    /// True for every variant that means "there is no such script"
    ///
    /// Invalid names are included: they can never be part of a bundle.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScriptError::NotFound { .. }
                | ScriptError::InvalidName { .. }
                | ScriptError::BundleMissing { .. }
        )
    }

    pub(crate) fn not_found(name: &str) -> Self {
        ScriptError::NotFound {
            name: name.to_string(),
        }
    }
}
