//! File system capability used by the asset manager
//!
//! The asset manager only talks to the file system through [`FileSystem`], so
//! tests can hand it a fake implementation instead of touching the disk.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, instrument};

/// Primitive file system operations the asset manager relies on
pub trait FileSystem {
    /// Check if a path exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if a path exists and is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path is a symbolic link, without following it
    fn is_symlink(&self, path: &Path) -> bool;

    /// Create a directory and all of its missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate a file and write the whole content to it
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The host operating system's file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local file system handle
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    #[instrument(skip(self))]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path)
    }

    #[instrument(skip(self))]
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!("Removing directory: {}", path.display());
        fs::remove_dir_all(path)
    }

    #[instrument(skip(self, contents))]
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        debug!("Writing file: {} ({} bytes)", path.display(), contents.len());
        fs::write(path, contents)
    }
}
