//! Script catalog
//!
//! Groups bundle keys by their top-level directory so callers can list the
//! services, runtime configs, and setup scripts a bundle provides.

use super::{KEY_SEPARATOR, ScriptError, ScriptStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of provisioning script, derived from the key's first segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptCategory {
    /// Top-level scripts such as `bootstrap.sh`
    Bootstrap,
    /// `services/*`: backing service installers
    Service,
    /// `continuousrc/*`: per-language runtime environment
    RuntimeConfig,
    /// `setupscripts/*`: per-language toolchain setup
    Setup,
    /// Any other directory
    Other,
}

impl ScriptCategory {
    pub const ALL: [ScriptCategory; 5] = [
        ScriptCategory::Bootstrap,
        ScriptCategory::Service,
        ScriptCategory::RuntimeConfig,
        ScriptCategory::Setup,
        ScriptCategory::Other,
    ];

    /// Category of a bundle key
    pub fn of(name: &str) -> Self {
        let Some((first, _)) = name.split_once(KEY_SEPARATOR) else {
            return ScriptCategory::Bootstrap;
        };
        ScriptCategory::ALL
            .into_iter()
            .find(|category| category.directory() == Some(first))
            .unwrap_or(ScriptCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptCategory::Bootstrap => "bootstrap",
            ScriptCategory::Service => "service",
            ScriptCategory::RuntimeConfig => "runtime_config",
            ScriptCategory::Setup => "setup",
            ScriptCategory::Other => "other",
        }
    }

    /// Bundle directory holding this category, if it has one
    pub fn directory(&self) -> Option<&'static str> {
        match self {
            ScriptCategory::Service => Some("services"),
            ScriptCategory::RuntimeConfig => Some("continuousrc"),
            ScriptCategory::Setup => Some("setupscripts"),
            ScriptCategory::Bootstrap | ScriptCategory::Other => None,
        }
    }
}

impl fmt::Display for ScriptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown script category '{0}' (expected bootstrap, service, runtime_config, setup, or other)")]
pub struct ParseCategoryError(String);

impl FromStr for ScriptCategory {
    type Err = ParseCategoryError;

    /// Accepts both category names and their bundle directory names
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "bootstrap" => Ok(ScriptCategory::Bootstrap),
            "service" | "services" => Ok(ScriptCategory::Service),
            "runtime_config" | "runtime-config" | "continuousrc" => {
                Ok(ScriptCategory::RuntimeConfig)
            }
            "setup" | "setupscripts" => Ok(ScriptCategory::Setup),
            "other" => Ok(ScriptCategory::Other),
            _ => Err(ParseCategoryError(value.to_string())),
        }
    }
}

/// One script in a bundle listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEntry {
    pub name: String,
    pub category: ScriptCategory,
    /// Size in bytes
    pub size: u64,
}

/// List every script in the store, sorted by name
pub fn catalog(store: &dyn ScriptStore) -> Result<Vec<ScriptEntry>, ScriptError> {
    let keys = store.keys()?;
    let mut entries = Vec::with_capacity(keys.len());

    for name in keys {
        let size = store.get(&name)?.len() as u64;
        entries.push(ScriptEntry {
            category: ScriptCategory::of(&name),
            name,
            size,
        });
    }

    Ok(entries)
}

pub fn filter_by_category(entries: Vec<ScriptEntry>, category: ScriptCategory) -> Vec<ScriptEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripts::EmbeddedStore;

    #[test]
    fn category_from_key() {
        assert_eq!(ScriptCategory::of("bootstrap.sh"), ScriptCategory::Bootstrap);
        assert_eq!(ScriptCategory::of("services/mongodb"), ScriptCategory::Service);
        assert_eq!(
            ScriptCategory::of("continuousrc/python"),
            ScriptCategory::RuntimeConfig
        );
        assert_eq!(ScriptCategory::of("setupscripts/ruby"), ScriptCategory::Setup);
        assert_eq!(ScriptCategory::of("misc/notes"), ScriptCategory::Other);
    }

    #[test]
    fn parse_accepts_directory_names() {
        assert_eq!("services".parse::<ScriptCategory>(), Ok(ScriptCategory::Service));
        assert_eq!("continuousrc".parse::<ScriptCategory>(), Ok(ScriptCategory::RuntimeConfig));
        assert_eq!("Setup".parse::<ScriptCategory>(), Ok(ScriptCategory::Setup));
        assert!("scripts".parse::<ScriptCategory>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for category in ScriptCategory::ALL {
            assert_eq!(category.to_string().parse::<ScriptCategory>(), Ok(category));
        }
    }

    #[test]
    fn directory_matches_key_prefix() {
        for category in ScriptCategory::ALL {
            if let Some(dir) = category.directory() {
                assert_eq!(ScriptCategory::of(&format!("{dir}/x")), category);
            }
        }
    }

    #[test]
    fn embedded_catalog_lists_all_categories() {
        let entries = catalog(&EmbeddedStore::new()).unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|entry| entry.size > 0));

        let services = filter_by_category(entries.clone(), ScriptCategory::Service);
        assert!(services.iter().any(|entry| entry.name == "services/mongodb"));
        assert!(services.iter().all(|entry| entry.name.starts_with("services/")));

        let bootstrap = filter_by_category(entries, ScriptCategory::Bootstrap);
        assert_eq!(bootstrap.len(), 1);
        assert_eq!(bootstrap[0].name, "bootstrap.sh");
    }

    #[test]
    fn entry_serializes_category_in_snake_case() {
        let entry = ScriptEntry {
            name: "continuousrc/ruby".to_string(),
            category: ScriptCategory::RuntimeConfig,
            size: 12,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["category"], "runtime_config");
        assert_eq!(json["size"], 12);
    }
}
