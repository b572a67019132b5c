//! File I/O utilities with atomic writes and a persist lock
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};

/// Build a sibling path by appending `suffix` to the file name
/// (`expenses.csv` -> `expenses.csv.tmp`)
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write a file atomically (write to temp, then rename)
///
/// The file is either completely replaced or left untouched, so a crash
/// mid-write cannot leave a truncated backing file behind.
pub fn write_atomic<P, F>(path: P, write: F) -> BudgetResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> BudgetResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = sibling_path(path, ".tmp");

    let file = File::create(&temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    let result = write(&mut writer)
        .and_then(|_| {
            writer
                .flush()
                .map_err(|e| BudgetError::Storage(format!("Failed to flush data: {}", e)))
        })
        .and_then(|_| {
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))
        });

    if let Err(e) = result {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BudgetError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> BudgetResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| BudgetError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Exclusive lock held while the backing file is being replaced
///
/// The lock is a `<file>.lock` sibling created with `create_new`; it is
/// removed when the guard is dropped.
#[derive(Debug)]
pub struct PersistLock {
    path: PathBuf,
}

impl PersistLock {
    /// Acquire the lock for `target`, failing if another writer holds it
    pub fn acquire(target: &Path) -> BudgetResult<Self> {
        let path = sibling_path(target, ".lock");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // pid is informational only, for someone inspecting a stale lock
                let _ = writeln!(file, "{}", std::process::id());
                Ok(Self { path })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(BudgetError::Locked(format!(
                "{} is being written by another process (remove {} if it is stale)",
                target.display(),
                path.display()
            ))),
            Err(e) => Err(BudgetError::Storage(format!(
                "Failed to create lock file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PersistLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sibling_path() {
        let path = Path::new("/data/expenses.csv");
        assert_eq!(sibling_path(path, ".tmp"), Path::new("/data/expenses.csv.tmp"));
        assert_eq!(sibling_path(path, ".lock"), Path::new("/data/expenses.csv.lock"));
    }

    #[test]
    fn test_write_atomic_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        write_atomic(&path, |w| {
            w.write_all(b"hello\n")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!sibling_path(&path, ".tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_original() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        fs::write(&path, "original").unwrap();

        let result = write_atomic(&path, |w| {
            w.write_all(b"partial")?;
            Err(BudgetError::Storage("simulated failure".into()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!sibling_path(&path, ".tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &serde_json::json!({"value": 42})).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_lock_is_exclusive_and_released() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("expenses.csv");

        let lock = PersistLock::acquire(&target).unwrap();
        assert!(lock.path().exists());

        let second = PersistLock::acquire(&target);
        assert!(matches!(second, Err(BudgetError::Locked(_))));

        drop(lock);
        assert!(!sibling_path(&target, ".lock").exists());
        assert!(PersistLock::acquire(&target).is_ok());
    }
}
