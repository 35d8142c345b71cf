//! Installed script directory
//!
//! Reads scripts from a bundle copy on disk, e.g. one produced by
//! `continuous-scripts export`. Each lookup is a fresh read.

use super::{KEY_SEPARATOR, ScriptError, ScriptStore, validate_script_name};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Store backed by a directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem location of a (validated) key
    pub fn path_for(&self, name: &str) -> PathBuf {
        name.split(KEY_SEPARATOR)
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// Canonical form of `path`, or None when symlinks lead outside the root
    fn resolve_within_root(&self, path: &Path) -> io::Result<Option<PathBuf>> {
        let resolved = fs::canonicalize(path)?;
        let root = fs::canonicalize(&self.root)?;
        Ok(resolved.starts_with(&root).then_some(resolved))
    }
}

impl ScriptStore for DirectoryStore {
    fn get(&self, name: &str) -> Result<Cow<'static, [u8]>, ScriptError> {
        validate_script_name(name)?;
        let path = self.path_for(name);
        debug!("Reading script {} from {}", name, path.display());

        let resolved = match self.resolve_within_root(&path) {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                warn!(
                    "Ignoring {}: resolves outside {}",
                    path.display(),
                    self.root.display()
                );
                return Err(ScriptError::not_found(name));
            }
            Err(err) => return Err(classify_read_error(name, &path, err)),
        };

        match fs::read(&resolved) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(err) => Err(classify_read_error(name, &path, err)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, ScriptError> {
        if !self.root.is_dir() {
            return Err(ScriptError::BundleMissing {
                root: self.root.clone(),
            });
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(key) = key_for(&self.root, entry.path()) else {
                warn!("Skipping non-UTF-8 script path: {}", entry.path().display());
                continue;
            };
            if let Err(err) = validate_script_name(&key) {
                warn!("Skipping {}: {}", entry.path().display(), err);
                continue;
            }
            if !matches!(self.resolve_within_root(entry.path()), Ok(Some(_))) {
                warn!(
                    "Skipping {}: resolves outside {}",
                    entry.path().display(),
                    self.root.display()
                );
                continue;
            }
            keys.push(key);
        }

        keys.sort();
        Ok(keys)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

fn classify_read_error(name: &str, path: &Path, err: io::Error) -> ScriptError {
    let missing = matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::IsADirectory
    );
    if missing || path.is_dir() {
        return ScriptError::not_found(name);
    }

    ScriptError::Unreadable {
        name: name.to_string(),
        source: err,
    }
}

fn key_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments = relative
        .components()
        .map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Some(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populated_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bootstrap.sh"), b"#!/bin/bash\r\necho hi\n").unwrap();
        fs::create_dir_all(dir.path().join("services")).unwrap();
        fs::write(dir.path().join("services").join("redis"), b"\x00\xffbinary").unwrap();
        dir
    }

    #[test]
    fn reads_exact_bytes() {
        let dir = populated_dir();
        let store = DirectoryStore::new(dir.path());
        assert_eq!(
            &store.get("bootstrap.sh").unwrap()[..],
            b"#!/bin/bash\r\necho hi\n"
        );
        assert_eq!(
            &store.get("services/redis").unwrap()[..],
            b"\x00\xffbinary"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = populated_dir();
        let store = DirectoryStore::new(dir.path());
        assert!(matches!(
            store.get("services/mongodb"),
            Err(ScriptError::NotFound { .. })
        ));
        assert!(matches!(
            store.get("bootstrap.sh/inner"),
            Err(ScriptError::NotFound { .. })
        ));
    }

    #[test]
    fn directory_key_is_not_found() {
        let dir = populated_dir();
        let store = DirectoryStore::new(dir.path());
        assert!(matches!(
            store.get("services"),
            Err(ScriptError::NotFound { .. })
        ));
    }

    #[test]
    fn traversal_is_rejected_before_touching_disk() {
        let dir = populated_dir();
        let store = DirectoryStore::new(dir.path().join("services"));
        assert!(matches!(
            store.get("../bootstrap.sh"),
            Err(ScriptError::InvalidName { .. })
        ));
    }

    #[test]
    fn keys_walk_the_tree() {
        let dir = populated_dir();
        let store = DirectoryStore::new(dir.path());
        assert_eq!(
            store.keys().unwrap(),
            vec!["bootstrap.sh".to_string(), "services/redis".to_string()]
        );
    }

    #[test]
    fn missing_root_reports_bundle_missing() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path().join("absent"));
        assert!(matches!(
            store.keys(),
            Err(ScriptError::BundleMissing { .. })
        ));
        assert!(store.get("bootstrap.sh").unwrap_err().is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn permission_failure_is_unreadable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = populated_dir();
        let path = dir.path().join("bootstrap.sh");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; nothing to observe in that case.
        if fs::read(&path).is_ok() {
            return;
        }

        let store = DirectoryStore::new(dir.path());
        assert!(matches!(
            store.get("bootstrap.sh"),
            Err(ScriptError::Unreadable { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_unreadable() {
        let dir = populated_dir();
        let link = dir.path().join("services").join("loop");
        std::os::unix::fs::symlink(&link, &link).unwrap();

        let store = DirectoryStore::new(dir.path());
        assert!(matches!(
            store.get("services/loop"),
            Err(ScriptError::Unreadable { .. })
        ));
        // The walk skips it rather than failing
        assert!(!store.keys().unwrap().contains(&"services/loop".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_leaving_the_root_are_ignored() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret"), b"not a script").unwrap();

        let dir = populated_dir();
        std::os::unix::fs::symlink(outside.path().join("secret"), dir.path().join("secret"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("elsewhere")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("bootstrap.sh"),
            dir.path().join("services").join("bootstrap-link"),
        )
        .unwrap();

        let store = DirectoryStore::new(dir.path());
        assert!(matches!(
            store.get("secret"),
            Err(ScriptError::NotFound { .. })
        ));
        assert!(matches!(
            store.get("elsewhere/secret"),
            Err(ScriptError::NotFound { .. })
        ));
        assert_eq!(
            &store.get("services/bootstrap-link").unwrap()[..],
            b"#!/bin/bash\r\necho hi\n"
        );
        assert_eq!(
            store.keys().unwrap(),
            vec![
                "bootstrap.sh".to_string(),
                "services/bootstrap-link".to_string(),
                "services/redis".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn keys_skip_names_that_cannot_be_looked_up() {
        let dir = populated_dir();
        fs::write(dir.path().join("C:notes"), b"stray").unwrap();
        fs::write(dir.path().join("services").join("win\\style"), b"stray").unwrap();

        let store = DirectoryStore::new(dir.path());
        let keys = store.keys().unwrap();
        assert_eq!(
            keys,
            vec!["bootstrap.sh".to_string(), "services/redis".to_string()]
        );
        for key in &keys {
            assert!(store.get(key).is_ok(), "{key} is listed but not readable");
        }

        let entries = crate::scripts::catalog(&store).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn path_for_splits_on_key_separator() {
        let store = DirectoryStore::new("/opt/scripts");
        assert_eq!(
            store.path_for("setupscripts/ruby"),
            Path::new("/opt/scripts").join("setupscripts").join("ruby")
        );
    }
}
