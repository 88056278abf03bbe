//! All-or-nothing file replacement.
//!
//! Content goes to a sibling temporary file first, is synced, and is then
//! renamed over the target. A failure at any step leaves the target as it was.
//! The replacement keeps the target's permissions, and a symlinked target is
//! replaced behind the link rather than the link itself.

use std::fs::{self, File, Permissions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Path of the temporary file used while replacing `path`.
#[must_use]
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// The file a write to `path` should land in: the link target for a symlink,
/// `path` itself otherwise.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Replace the file at `path` with whatever `write` produces.
///
/// # Errors
///
/// Returns [`Error::FileWrite`] if the temporary file cannot be created,
/// written, synced or renamed, and any error returned by `write` itself.
pub fn replace<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let target = resolve_target(path);
    let tmp = temp_path(&target);
    let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let result = write_temp(&tmp, permissions, write).and_then(|()| {
        fs::rename(&tmp, &target).map_err(|source| Error::FileWrite {
            path: target.clone(),
            source,
        })
    });

    if result.is_err() {
        if let Err(err) = fs::remove_file(&tmp) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove temporary file {}: {err}", tmp.display());
            }
        }
    } else {
        debug!("replaced {}", target.display());
    }
    result
}

fn write_temp<F>(tmp: &Path, permissions: Option<Permissions>, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let to_write_error = |source: std::io::Error| Error::FileWrite {
        path: tmp.to_path_buf(),
        source,
    };

    let file = File::create(tmp).map_err(to_write_error)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(to_write_error)?;

    let file = writer
        .into_inner()
        .map_err(|err| to_write_error(err.into_error()))?;
    file.sync_all().map_err(to_write_error)?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions).map_err(to_write_error)?;
    }
    Ok(())
}
