//! XDG-style paths for config and data

use directories::BaseDirs;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "continuous-scripts";

/// `$XDG_CONFIG_HOME/continuous-scripts` or `~/.config/continuous-scripts`
pub fn get_config_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// `$XDG_DATA_HOME/continuous-scripts` or `~/.local/share/continuous-scripts`
pub fn get_data_dir() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.json"))
}

/// Default location of an installed script bundle
pub fn get_default_scripts_dir() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join("scripts"))
}

fn xdg_dir(var_name: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Ok(value) = env::var(var_name) {
        let base = PathBuf::from(value);
        // Relative XDG values are ignored
        if base.is_absolute() {
            return Some(base.join(APP_DIR));
        }
    }

    let dirs = BaseDirs::new()?;
    let base = home_fallback
        .iter()
        .fold(dirs.home_dir().to_path_buf(), |path, segment| path.join(segment));
    Some(base.join(APP_DIR))
}
