//! Bundled provisioning scripts
//!
//! This module provides access to the continuous build scripts:
//! - The compiled-in script bundle and the [`get_script`] accessor
//! - Script name validation
//! - Directory-backed stores for installed copies of the bundle
//! - Catalog listing by script category
//! - Export to a directory tree or tar.gz archive
//! - Drift detection between the bundle and an installed copy

mod catalog;
mod directory;
mod drift;
mod embedded;
mod error;
mod export;
mod name;
mod store;

use std::borrow::Cow;

// Core types
pub use error::ScriptError;
pub use name::{KEY_SEPARATOR, validate_script_name};
pub use store::{ScriptSource, ScriptStore, open_store};

// Store backends
pub use directory::DirectoryStore;
pub use embedded::EmbeddedStore;

// Catalog
pub use catalog::{ParseCategoryError, ScriptCategory, ScriptEntry, catalog, filter_by_category};

// Export
pub use export::{
    ExportError, SCRIPT_MODE, create_bundle_archive, export_to_dir, write_bundle_archive,
};

// Drift detection
pub use drift::{RESYNC_COMMAND, ScriptDrift, detect_script_drift, drift_warning_lines};

/// Get the contents of a bundled script
///
/// `name` is a key relative to the bundle root, for example `"bootstrap.sh"`,
/// `"services/mongodb"`, `"continuousrc/python"`, or `"setupscripts/ruby"`.
/// The bytes are returned exactly as bundled.
pub fn get_script(name: &str) -> Result<Cow<'static, [u8]>, ScriptError> {
    EmbeddedStore::new().get(name)
}
