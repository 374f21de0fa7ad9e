// crates/manual-world/src/output.rs
// ============================================================================
// Module: Document Output
// Description: Capability-scoped directory handling for written documents.
// Purpose: Open the output directory without following symlinks and replace
//          document files atomically.
// Dependencies: cap-std, cap-primitives, crate::error
// ============================================================================

//! ## Overview
//! The output directory is opened component by component from an absolute
//! anchor, never following symlinks and never accepting `..`. Documents are
//! written to a `.tmp-` sibling, synced, and renamed over the target inside
//! that directory handle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use cap_primitives::fs::FollowSymlinks;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use cap_std::fs::OpenOptions;

use crate::error::WorldError;

/// Temporary names tried before giving up on a write.
const MAX_TEMP_ATTEMPTS: u32 = 64;

// ============================================================================
// SECTION: Directories
// ============================================================================

/// Opens `output_dir` as a capability handle, creating missing components.
///
/// # Errors
/// Returns [`WorldError::OutputPath`] for empty, traversing, or symlinked
/// paths and [`WorldError::Io`] for other failures.
pub(crate) fn open_output_dir(output_dir: &Path) -> Result<Dir, WorldError> {
    if output_dir.as_os_str().is_empty() {
        return Err(output_path(output_dir));
    }
    let absolute = if output_dir.is_absolute() {
        output_dir.to_path_buf()
    } else {
        std::env::current_dir().map_err(|err| io_error(output_dir, &err))?.join(output_dir)
    };
    let (anchor, components) = split_anchor(&absolute)?;
    let mut current = Dir::open_ambient_dir(&anchor, ambient_authority())
        .map_err(|err| io_error(&anchor, &err))?;
    for component in components {
        current = open_or_create_child(&current, Path::new(&component))
            .map_err(|err| map_open_error(&err, output_dir))?;
    }
    Ok(current)
}

/// Splits an absolute path into its root and its normal components.
fn split_anchor(path: &Path) -> Result<(PathBuf, Vec<OsString>), WorldError> {
    let mut anchor = PathBuf::new();
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
            Component::CurDir => {}
            Component::Normal(value) => components.push(value.to_os_string()),
            Component::ParentDir => return Err(output_path(path)),
        }
    }
    if anchor.as_os_str().is_empty() {
        return Err(output_path(path));
    }
    Ok((anchor, components))
}

/// Opens a child directory without following symlinks.
fn open_child(parent: &Dir, child: &Path) -> std::io::Result<Dir> {
    let mut options = OpenOptions::new();
    options.read(true);
    options._cap_fs_ext_follow(FollowSymlinks::No);
    let file = parent.open_with(child, &options)?;
    if !file.metadata()?.is_dir() {
        return Err(std::io::Error::new(ErrorKind::InvalidInput, "path component is not a directory"));
    }
    Ok(Dir::from_std_file(file.into_std()))
}

/// Opens a child directory, creating it when missing.
fn open_or_create_child(parent: &Dir, child: &Path) -> std::io::Result<Dir> {
    match open_child(parent, child) {
        Err(err) if err.kind() == ErrorKind::NotFound => {
            parent.create_dir(child)?;
            open_child(parent, child)
        }
        result => result,
    }
}

// ============================================================================
// SECTION: Files
// ============================================================================

/// Replaces `file` inside `directory` with `bytes`.
///
/// # Errors
/// Returns [`WorldError::Io`] when the temporary file cannot be written or
/// renamed.
pub(crate) fn write_file_atomic(directory: &Dir, file: &str, bytes: &[u8]) -> Result<(), WorldError> {
    let target = Path::new(file);
    for attempt in 0 .. MAX_TEMP_ATTEMPTS {
        let temp = temp_file_name(file, attempt);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        match directory.open_with(&temp, &options) {
            Ok(mut handle) => {
                let written = handle
                    .write_all(bytes)
                    .and_then(|()| handle.sync_all())
                    .and_then(|()| directory.rename(&temp, directory, target));
                if let Err(err) = written {
                    let _ = directory.remove_file(&temp);
                    return Err(io_error(target, &err));
                }
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(map_open_error(&err, target)),
        }
    }
    Err(WorldError::Io {
        path: file.to_string(),
        message: "unable to allocate a temporary file".to_string(),
    })
}

/// Temporary sibling name for one write attempt.
fn temp_file_name(file: &str, attempt: u32) -> PathBuf {
    PathBuf::from(format!(".tmp-{file}.{}.{attempt}", std::process::id()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rejected output path.
fn output_path(path: &Path) -> WorldError {
    WorldError::OutputPath {
        path: path.display().to_string(),
    }
}

/// Io failure at `path`.
fn io_error(path: &Path, err: &std::io::Error) -> WorldError {
    WorldError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Maps open failures caused by the path itself to [`WorldError::OutputPath`].
fn map_open_error(err: &std::io::Error, path: &Path) -> WorldError {
    if matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::InvalidInput
            | ErrorKind::PermissionDenied
            | ErrorKind::NotADirectory
            | ErrorKind::Unsupported
    ) {
        return output_path(path);
    }
    // ELOOP from a no-follow open of a symlink.
    #[cfg(unix)]
    if err.raw_os_error() == Some(40) {
        return output_path(path);
    }
    io_error(path, err)
}
