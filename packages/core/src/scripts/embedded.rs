//! Compiled-in script bundle
//!
//! Everything under `packages/core/scripts/` is embedded at build time and is
//! the single source of truth for exports and drift checks.

use super::{ScriptError, ScriptStore, validate_script_name};
use rust_embed::RustEmbed;
use std::borrow::Cow;
use tracing::debug;

#[derive(RustEmbed)]
#[folder = "scripts/"]
struct BundledScripts;

/// Store backed by the compiled-in bundle
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStore;

impl EmbeddedStore {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptStore for EmbeddedStore {
    fn get(&self, name: &str) -> Result<Cow<'static, [u8]>, ScriptError> {
        validate_script_name(name)?;
        debug!("Looking up embedded script: {}", name);

        BundledScripts::get(name)
            .map(|file| file.data)
            .ok_or_else(|| ScriptError::not_found(name))
    }

    fn keys(&self) -> Result<Vec<String>, ScriptError> {
        let mut keys: Vec<String> = BundledScripts::iter().map(Cow::into_owned).collect();
        keys.sort();
        Ok(keys)
    }

    fn describe(&self) -> String {
        "embedded bundle".to_string()
    }
}
