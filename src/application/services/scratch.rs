use std::io;
use std::path::{Path, PathBuf};

/// A request-scoped temporary file on local disk.
///
/// The file is removed when the guard drops, so cleanup happens on every
/// exit path of the request that owns it, including early failures. Dropping
/// a guard whose file was never created is not an error.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove scratch file"
                );
            }
        }
    }
}
