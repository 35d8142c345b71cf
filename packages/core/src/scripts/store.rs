//! Script store abstraction
//!
//! A store maps bundle keys to immutable bytes. The compiled-in bundle and an
//! installed directory tree are interchangeable behind [`ScriptStore`].

use super::{DirectoryStore, EmbeddedStore, ScriptError};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Read-only access to a bundle of scripts
pub trait ScriptStore: Send + Sync {
    /// Exact bytes stored under `name`
    fn get(&self, name: &str) -> Result<Cow<'static, [u8]>, ScriptError>;

    /// Every key in the bundle, sorted, `/`-separated
    fn keys(&self) -> Result<Vec<String>, ScriptError>;

    /// Human-readable location of the bundle
    fn describe(&self) -> String;
}

/// Where scripts are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// Bundle compiled into the binary
    Embedded,
    /// Installed copy of the bundle rooted at the given directory
    Directory(PathBuf),
}

impl fmt::Display for ScriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptSource::Embedded => write!(f, "embedded"),
            ScriptSource::Directory(root) => write!(f, "directory ({})", root.display()),
        }
    }
}

/// Open the store backing a source
pub fn open_store(source: &ScriptSource) -> Box<dyn ScriptStore> {
    debug!("Opening script store: {}", source);
    match source {
        ScriptSource::Embedded => Box::new(EmbeddedStore::new()),
        ScriptSource::Directory(root) => Box::new(DirectoryStore::new(root.clone())),
    }
}
