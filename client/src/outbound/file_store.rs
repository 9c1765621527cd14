//! File-backed key-value store for the session cache.
//!
//! Each key lives as one plain file inside a capability-scoped directory.
//! Writes go through a temporary file and rename so a crash mid-write never
//! leaves a torn value behind.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::{KeyValueStorage, KeyValueStorageError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key-value store that keeps each entry as a file in one directory.
pub struct DirKeyValueStore {
    dir: Dir,
}

impl DirKeyValueStore {
    /// Open the backing directory at `root`, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or opened.
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self { dir })
    }

    /// Wrap an already-open capability directory.
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

impl KeyValueStorage for DirKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, KeyValueStorageError> {
        let file_name = validate_key(key)?;
        match self.dir.read_to_string(file_name) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStorageError::read(format!("{file_name}: {err}"))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), KeyValueStorageError> {
        let file_name = validate_key(key)?;
        write_atomic(&self.dir, file_name, value)
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStorageError> {
        let file_name = validate_key(key)?;
        match self.dir.remove_file(file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueStorageError::write(format!("{file_name}: {err}"))),
        }
    }
}

/// Require `key` to be exactly one plain path component.
fn validate_key(key: &str) -> Result<&str, KeyValueStorageError> {
    let mut components = Utf8Path::new(key).components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next()) else {
        return Err(KeyValueStorageError::invalid_key(key));
    };
    if name != key {
        return Err(KeyValueStorageError::invalid_key(key));
    }
    Ok(name)
}

/// Write `contents` under `file_name` atomically using a temp file and rename.
fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> Result<(), KeyValueStorageError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    write_to_temp_file(dir, &tmp_name, contents)?;
    rename_temp_to_target(dir, &tmp_name, file_name)?;
    sync_parent_directory(dir);

    Ok(())
}

fn write_to_temp_file(
    dir: &Dir,
    tmp_name: &str,
    contents: &str,
) -> Result<(), KeyValueStorageError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| KeyValueStorageError::write(format!("{tmp_name}: {err}")))?;

    if let Err(err) = file.write_all(contents.as_bytes()) {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(KeyValueStorageError::write(format!("{tmp_name}: {err}")));
    }

    if let Err(err) = file.sync_all() {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(KeyValueStorageError::write(format!("{tmp_name}: {err}")));
    }

    Ok(())
}

fn rename_temp_to_target(
    dir: &Dir,
    tmp_name: &str,
    target_name: &str,
) -> Result<(), KeyValueStorageError> {
    if let Err(err) = rename_temp_to_target_impl(dir, tmp_name, target_name) {
        drop(dir.remove_file(tmp_name));
        return Err(KeyValueStorageError::write(format!("{target_name}: {err}")));
    }
    Ok(())
}

#[cfg(windows)]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Rename on Windows refuses to replace an existing target.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_parent_directory(parent: &Dir) {
    // Best-effort; the rename itself has already landed.
    drop(parent.open(".").and_then(|dir| dir.sync_all()));
}
