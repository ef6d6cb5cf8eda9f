//! Utility modules for common functionality
//!
//! Provides the file system capability shared by the asset manager.

pub mod fs;

pub use fs::{FileSystem, LocalFileSystem};
