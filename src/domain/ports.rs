use crate::utils::error::Result;
use std::path::Path;

/// Byte-level access to the file being patched.
pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}
