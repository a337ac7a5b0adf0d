use crate::core::Storage;
use crate::utils::error::{PatchError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Filesystem storage. Direct writes truncate the target in place; atomic
/// writes go through a sibling temp file renamed over the target.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    atomic: bool,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self { atomic: false }
    }

    pub fn atomic() -> Self {
        Self { atomic: true }
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PatchError::from_io(path, e))?;
        tmp.write_all(data).map_err(|e| PatchError::from_io(path, e))?;
        tmp.flush().map_err(|e| PatchError::from_io(path, e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| PatchError::from_io(path, e))?;

        // NamedTempFile creates files as 0600; carry over the target's mode
        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(|e| PatchError::from_io(path, e))?;
        }

        tmp.persist(path)
            .map_err(|e| PatchError::from_io(path, e.error))?;
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| PatchError::from_io(path, e))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if self.atomic {
            return self.write_atomic(path, data);
        }
        fs::write(path, data).map_err(|e| PatchError::from_io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_direct_and_atomic_writes_match() {
        let temp_dir = TempDir::new().unwrap();
        let direct = temp_dir.path().join("direct.jsx");
        let atomic = temp_dir.path().join("atomic.jsx");
        fs::write(&direct, "old").unwrap();
        fs::write(&atomic, "old").unwrap();

        LocalStorage::new().write_file(&direct, b"new contents").unwrap();
        LocalStorage::atomic().write_file(&atomic, b"new contents").unwrap();

        assert_eq!(fs::read(&direct).unwrap(), b"new contents");
        assert_eq!(fs::read(&atomic).unwrap(), b"new contents");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("EmployerView.jsx");
        fs::write(&target, "old").unwrap();

        LocalStorage::atomic().write_file(&target, b"new").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = LocalStorage::new()
            .read_file(&temp_dir.path().join("nope.jsx"))
            .unwrap_err();
        assert!(matches!(err, PatchError::FileNotFound { .. }));
    }
}
