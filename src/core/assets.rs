//! Asset and location management
//!
//! Checks location validity and creates or removes assets (files) and asset
//! locations (folders). Every operation is a single file system call whose
//! failure is translated into a [`ConfigmeError`] kind.

use crate::{
    error::{ConfigmeError, Result},
    utils::fs::{FileSystem, LocalFileSystem},
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// How [`AssetManager::create_folder`] treats creation failures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationPolicy {
    /// Only an already existing folder counts as success
    #[default]
    Strict,
    /// Every creation failure is ignored
    Lenient,
}

/// Stateless asset manager over an injectable file system
#[derive(Debug, Clone)]
pub struct AssetManager<F: FileSystem = LocalFileSystem> {
    fs: F,
    policy: CreationPolicy,
}

impl AssetManager<LocalFileSystem> {
    /// Create an asset manager working on the local file system
    pub fn new() -> Self {
        Self::with_fs(LocalFileSystem::new())
    }
}

impl Default for AssetManager<LocalFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> AssetManager<F> {
    /// Create an asset manager on top of the given file system
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            policy: CreationPolicy::default(),
        }
    }

    /// Use the given folder creation policy
    pub fn with_creation_policy(mut self, policy: CreationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Folder creation policy in effect
    pub fn creation_policy(&self) -> CreationPolicy {
        self.policy
    }

    /// Return `location` if it is an existing, accessible folder.
    ///
    /// `subject` describes what kind of location this is and shows up,
    /// capitalized, in the error message.
    pub fn location<P: AsRef<Path>>(&self, location: P, subject: &str) -> Result<PathBuf> {
        let location = location.as_ref();

        if !self.fs.is_dir(location) {
            let message = format!(
                "{} does not exist, is not a folder, or is not accessible: {}",
                capitalize(subject),
                location.display()
            );
            return Err(ConfigmeError::location_not_found(message, location));
        }

        Ok(location.to_path_buf())
    }

    /// Join path segments into a single path
    pub fn path_join<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        parts.into_iter().fold(PathBuf::new(), |mut joined, part| {
            joined.push(part);
            joined
        })
    }

    /// Everything after the last separator of `path`, empty when the path
    /// ends with one
    pub fn path_filename<P: AsRef<Path>>(&self, path: P) -> String {
        let text = path.as_ref().to_string_lossy();
        let (_, name) = split_last_separator(&text);
        name.to_string()
    }

    /// Everything before the last separator of `path`, without trailing
    /// separators unless the folder is the root
    pub fn path_folder<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let text = path.as_ref().to_string_lossy();
        let (head, _) = split_last_separator(&text);
        let trimmed = head.trim_end_matches(std::path::is_separator);

        if trimmed.is_empty() {
            PathBuf::from(head)
        } else {
            PathBuf::from(trimmed)
        }
    }

    /// Return `path` unless a file already occupies it
    pub fn asset_or_location_exists<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();

        if self.fs.is_file(path) {
            return Err(ConfigmeError::asset_location_taken(path));
        }

        Ok(path.to_path_buf())
    }

    /// Remove the folder at `path` with all its content, if it is a folder
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn remove_folder<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();

        if self.fs.is_dir(path) {
            if self.fs.is_symlink(path) {
                return Err(ConfigmeError::location_removal(
                    path,
                    io::Error::other("Cannot remove a folder through a symbolic link"),
                ));
            }

            self.fs
                .remove_dir_all(path)
                .map_err(|e| ConfigmeError::location_removal(path, e))?;
            debug!("Removed folder: {}", path.display());
        } else {
            debug!("Nothing to remove at: {}", path.display());
        }

        Ok(path.to_path_buf())
    }

    /// Create the folder at `path` together with any missing parents
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn create_folder<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();

        match self.fs.create_dir_all(path) {
            Ok(()) => debug!("Folder ready: {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.fs.is_dir(path) => {
                debug!("Folder already exists: {}", path.display());
            }
            Err(e) => match self.policy {
                CreationPolicy::Lenient => {
                    warn!("Ignoring folder creation failure for {}: {}", path.display(), e);
                }
                CreationPolicy::Strict => return Err(ConfigmeError::location_creation(path, e)),
            },
        }

        Ok(path.to_path_buf())
    }

    /// Create or truncate the file at `path` and write `content` to it
    #[instrument(skip(self, path, content), fields(path = %path.as_ref().display()))]
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, content: &str) -> Result<PathBuf> {
        let path = path.as_ref();

        self.fs
            .write_file(path, content)
            .map_err(|e| ConfigmeError::asset_creation(path, e))?;

        Ok(path.to_path_buf())
    }
}

/// Split `text` right after its last separator; the head keeps the separator
fn split_last_separator(text: &str) -> (&str, &str) {
    match text.rfind(std::path::is_separator) {
        Some(index) => text.split_at(index + 1),
        None => ("", text),
    }
}

/// Upper-case the first character and lower-case the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    /// File system whose mutating operations all fail with the same errno
    struct FailingFileSystem {
        dirs: HashSet<PathBuf>,
        files: HashSet<PathBuf>,
        links: HashSet<PathBuf>,
        errno: i32,
    }

    impl FailingFileSystem {
        fn new(errno: i32) -> Self {
            Self {
                dirs: HashSet::new(),
                files: HashSet::new(),
                links: HashSet::new(),
                errno,
            }
        }

        fn with_dir(mut self, path: &str) -> Self {
            self.dirs.insert(PathBuf::from(path));
            self
        }

        fn with_file(mut self, path: &str) -> Self {
            self.files.insert(PathBuf::from(path));
            self
        }

        fn with_link(mut self, path: &str) -> Self {
            self.links.insert(PathBuf::from(path));
            self
        }

        fn failure(&self) -> io::Error {
            io::Error::from_raw_os_error(self.errno)
        }
    }

    impl FileSystem for FailingFileSystem {
        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.contains(path)
        }

        fn is_symlink(&self, path: &Path) -> bool {
            self.links.contains(path)
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Err(self.failure())
        }

        fn remove_dir_all(&self, _path: &Path) -> io::Result<()> {
            Err(self.failure())
        }

        fn write_file(&self, _path: &Path, _contents: &str) -> io::Result<()> {
            Err(self.failure())
        }
    }

    #[test]
    fn test_location_existing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let location = manager.location(temp_dir.path(), "template location").unwrap();
        assert_eq!(location, temp_dir.path());
    }

    #[test]
    fn test_location_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();
        let missing = temp_dir.path().join("missing");

        let err = manager.location(&missing, "template location").unwrap_err();

        assert!(matches!(err, ConfigmeError::LocationNotFound { .. }));
        let message = err.to_string();
        assert!(message.starts_with("Template location does not exist"));
        assert!(message.contains(&missing.display().to_string()));
    }

    #[test]
    fn test_location_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();
        let file_path = temp_dir.path().join("settings.cfg");
        fs::write(&file_path, "x").unwrap();

        let err = manager.location(&file_path, "settings location").unwrap_err();
        assert!(matches!(err, ConfigmeError::LocationNotFound { .. }));
    }

    #[test]
    fn test_path_helpers() {
        let manager = AssetManager::new();

        let joined = manager.path_join(["out", "nested", "app.cfg"]);
        assert_eq!(joined, Path::new("out").join("nested").join("app.cfg"));

        assert_eq!(manager.path_filename(&joined), "app.cfg");
        assert_eq!(manager.path_folder(&joined), Path::new("out").join("nested"));

        assert_eq!(manager.path_filename("/"), "");
        assert_eq!(manager.path_folder("/"), Path::new("/"));
        assert_eq!(manager.path_folder("/app.cfg"), Path::new("/"));
        assert_eq!(manager.path_filename("app.cfg"), "app.cfg");
        assert_eq!(manager.path_folder("app.cfg"), PathBuf::new());
        assert_eq!(manager.path_join(Vec::<&str>::new()), PathBuf::new());
    }

    #[test]
    fn test_path_helpers_trailing_separator_and_parent() {
        let manager = AssetManager::new();

        assert_eq!(manager.path_filename("out/app/"), "");
        assert_eq!(manager.path_folder("out/app/"), Path::new("out/app"));
        assert_eq!(manager.path_filename(".."), "..");
        assert_eq!(manager.path_folder(".."), PathBuf::new());
        assert_eq!(manager.path_folder("out//app.cfg"), Path::new("out"));
    }

    #[test]
    fn test_asset_or_location_exists() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let file_path = temp_dir.path().join("app.cfg");
        assert_eq!(manager.asset_or_location_exists(&file_path).unwrap(), file_path);

        fs::write(&file_path, "taken").unwrap();
        let err = manager.asset_or_location_exists(&file_path).unwrap_err();
        assert!(matches!(err, ConfigmeError::AssetLocationTaken { .. }));

        // folders are not considered taken
        assert_eq!(
            manager.asset_or_location_exists(temp_dir.path()).unwrap(),
            temp_dir.path()
        );
    }

    #[test]
    fn test_remove_folder() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let folder = temp_dir.path().join("out");
        fs::create_dir_all(folder.join("nested")).unwrap();
        fs::write(folder.join("nested").join("app.cfg"), "x").unwrap();

        assert_eq!(manager.remove_folder(&folder).unwrap(), folder);
        assert!(!folder.exists());

        // missing folder is a no-op
        assert_eq!(manager.remove_folder(&folder).unwrap(), folder);
    }

    #[test]
    fn test_remove_folder_failure() {
        let manager = AssetManager::with_fs(FailingFileSystem::new(13).with_dir("/srv/out"));

        let err = manager.remove_folder("/srv/out").unwrap_err();

        assert!(matches!(err, ConfigmeError::LocationRemoval { .. }));
        let detail = err.os_detail().unwrap();
        assert_eq!(detail.code, 13);
        assert_eq!(detail.path, Path::new("/srv/out"));
        assert!(err.to_string().starts_with("[Errno 13] "));
        assert!(err.to_string().ends_with(": '/srv/out'"));
    }

    #[test]
    fn test_remove_folder_refuses_symlink() {
        let manager = AssetManager::with_fs(
            FailingFileSystem::new(13)
                .with_dir("/srv/link")
                .with_link("/srv/link"),
        );

        let err = manager.remove_folder("/srv/link").unwrap_err();

        assert!(matches!(err, ConfigmeError::LocationRemoval { .. }));
        assert!(err.to_string().ends_with(": '/srv/link'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_folder_keeps_symlink_target() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let real = temp_dir.path().join("real");
        let link = temp_dir.path().join("link");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("app.cfg"), "x").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let err = manager.remove_folder(&link).unwrap_err();

        assert!(matches!(err, ConfigmeError::LocationRemoval { .. }));
        assert_eq!(err.os_detail().unwrap().path, link);
        assert!(link.exists());
        assert!(real.join("app.cfg").exists());
    }

    #[test]
    fn test_create_folder() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let folder = temp_dir.path().join("a").join("b");
        assert_eq!(manager.create_folder(&folder).unwrap(), folder);
        assert!(folder.is_dir());

        // already existing folder is fine
        assert_eq!(manager.create_folder(&folder).unwrap(), folder);
    }

    #[test]
    fn test_create_folder_strict_surfaces_failure() {
        let manager = AssetManager::with_fs(FailingFileSystem::new(13));
        assert_eq!(manager.creation_policy(), CreationPolicy::Strict);

        let err = manager.create_folder("/srv/locked").unwrap_err();

        assert!(matches!(err, ConfigmeError::LocationCreation { .. }));
        let detail = err.os_detail().unwrap();
        assert_eq!(detail.code, 13);
        assert_eq!(
            err.to_string(),
            format!("[Errno 13] {}: '/srv/locked'", detail.description)
        );
    }

    #[test]
    fn test_create_folder_strict_rejects_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let file_path = temp_dir.path().join("occupied");
        fs::write(&file_path, "x").unwrap();

        let err = manager.create_folder(&file_path).unwrap_err();
        assert!(matches!(err, ConfigmeError::LocationCreation { .. }));
    }

    #[test]
    fn test_create_folder_already_exists_reported_by_fs() {
        let manager = AssetManager::with_fs(FailingFileSystem::new(17).with_dir("/srv/out"));

        assert_eq!(manager.create_folder("/srv/out").unwrap(), Path::new("/srv/out"));
    }

    #[test]
    fn test_create_folder_lenient_swallows_failure() {
        let manager = AssetManager::with_fs(FailingFileSystem::new(13))
            .with_creation_policy(CreationPolicy::Lenient);

        assert_eq!(
            manager.create_folder("/srv/locked").unwrap(),
            Path::new("/srv/locked")
        );
    }

    #[test]
    fn test_write_to_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let file_path = temp_dir.path().join("app.cfg");
        let content = "name=configme\nmode=strict\n";

        assert_eq!(manager.write_to_file(&file_path, content).unwrap(), file_path);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), content);
    }

    #[test]
    fn test_write_to_file_failure() {
        let manager =
            AssetManager::with_fs(FailingFileSystem::new(28).with_file("/srv/out/app.cfg"));

        let err = manager.write_to_file("/srv/out/app.cfg", "x").unwrap_err();

        assert!(matches!(err, ConfigmeError::AssetCreation { .. }));
        let detail = err.os_detail().unwrap();
        assert_eq!(detail.code, 28);
        assert_eq!(
            err.to_string(),
            format!("[Errno 28] {}: '/srv/out/app.cfg'", detail.description)
        );
    }

    #[test]
    fn test_write_to_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let manager = AssetManager::new();

        let file_path = temp_dir.path().join("missing").join("app.cfg");
        let err = manager.write_to_file(&file_path, "x").unwrap_err();

        assert!(matches!(err, ConfigmeError::AssetCreation { .. }));
        assert_eq!(err.os_detail().unwrap().path, file_path);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("template location"), "Template location");
        assert_eq!(capitalize("Output Folder"), "Output folder");
        assert_eq!(capitalize(""), "");
    }
}
