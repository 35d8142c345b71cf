//! Bundle export
//!
//! Writes a store's scripts out as a directory tree or a gzipped tar archive,
//! byte for byte and keyed exactly as in the bundle.

use super::{ScriptError, ScriptStore};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tar::Builder as TarBuilder;
use thiserror::Error;
use tracing::debug;

/// File mode applied to exported scripts
pub const SCRIPT_MODE: u32 = 0o755;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("refusing to overwrite existing file {}", .path.display())]
    Exists { path: PathBuf },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to build archive: {0}")]
    Archive(#[from] io::Error),
}

/// Write every script under `dest`, mirroring the key hierarchy
///
/// Without `overwrite`, nothing is written if any target file already exists.
/// Returns the written paths in key order.
pub fn export_to_dir(
    store: &dyn ScriptStore,
    dest: &Path,
    overwrite: bool,
) -> Result<Vec<PathBuf>, ExportError> {
    let keys = store.keys()?;

    if !overwrite
        && let Some(path) = keys
            .iter()
            .map(|key| target_path(dest, key))
            .find(|path| path.exists())
    {
        return Err(ExportError::Exists { path });
    }

    let mut written = Vec::with_capacity(keys.len());
    for key in &keys {
        let bytes = store.get(key)?;
        let path = target_path(dest, key);
        debug!("Exporting {} to {}", key, path.display());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ExportError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        set_script_mode(&path)?;
        written.push(path);
    }

    Ok(written)
}

/// Create a gzipped tar archive containing every script
pub fn create_bundle_archive(store: &dyn ScriptStore) -> Result<Vec<u8>, ExportError> {
    let keys = store.keys()?;
    let mut archive_buffer = Vec::new();

    {
        let encoder = GzEncoder::new(&mut archive_buffer, Compression::default());
        let mut tar = TarBuilder::new(encoder);

        for key in &keys {
            let bytes = store.get(key)?;
            let mut header = tar::Header::new_gnu();
            header.set_path(key)?;
            header.set_size(bytes.len() as u64);
            header.set_mode(SCRIPT_MODE);
            header.set_cksum();

            tar.append(&header, &bytes[..])?;
        }
        tar.finish()?;

        // Finish gzip encoding
        let encoder = tar.into_inner()?;
        encoder.finish()?;
    }

    Ok(archive_buffer)
}

/// Write the bundle archive to `path`
pub fn write_bundle_archive(
    store: &dyn ScriptStore,
    path: &Path,
    overwrite: bool,
) -> Result<usize, ExportError> {
    if !overwrite && path.exists() {
        return Err(ExportError::Exists {
            path: path.to_path_buf(),
        });
    }

    let archive = create_bundle_archive(store)?;
    fs::write(path, &archive).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(archive.len())
}

fn target_path(dest: &Path, key: &str) -> PathBuf {
    key.split('/')
        .fold(dest.to_path_buf(), |path, segment| path.join(segment))
}

#[cfg(unix)]
fn set_script_mode(path: &Path) -> Result<(), ExportError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE)).map_err(|source| {
        ExportError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn set_script_mode(_path: &Path) -> Result<(), ExportError> {
    Ok(())
}
