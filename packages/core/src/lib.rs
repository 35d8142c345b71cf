//! continuous-scripts core library
//!
//! Shared functionality for the continuous-scripts CLI:
//! - The bundled provisioning scripts and the [`get_script`] accessor
//! - Store backends, catalog, export, and drift detection
//! - Configuration management

pub mod config;
pub mod scripts;

pub use config::{Config, ConfigError, SourceKind, load_config_or_default, save_config};
pub use scripts::{
    DirectoryStore, EmbeddedStore, ScriptCategory, ScriptError, ScriptSource, ScriptStore,
    get_script, open_store,
};

/// Get the version of the continuous-scripts-core library
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
        assert!(version.contains('.'));
    }
}
