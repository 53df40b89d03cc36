use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Create a directory and all of its parents.
///
/// Fails only if the directory still does not exist afterwards, so a
/// concurrent creation is not an error.
pub fn create_dir_all(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(_) if path.is_dir() => Ok(()),
        Err(source) => Err(Box::new(Error::DirectoryCreation {
            path: path.to_path_buf(),
            source,
        })),
    }
}

/// Write a file, creating missing parent directories. Existing content is replaced.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            create_dir_all(parent)?;
        }
    }
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// Create an empty file if it does not exist yet.
pub fn touch(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    write_file(path, "")
}

/// Read a file, returning `None` if it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// State of a generation target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// Nothing exists at the path
    Missing,
    /// A regular file (or other non-directory) exists at the path
    File,
    /// An empty directory
    Empty { writable: bool },
    /// A directory with at least one entry
    NotEmpty,
}

/// Inspect a target directory before generating into it.
pub fn inspect_target(path: &Path) -> Result<TargetState> {
    if !path.exists() {
        return Ok(TargetState::Missing);
    }
    if !path.is_dir() {
        return Ok(TargetState::File);
    }

    let mut entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    if entries.next().is_some() {
        return Ok(TargetState::NotEmpty);
    }

    Ok(TargetState::Empty {
        writable: is_writable(path),
    })
}

/// Whether the current process can create files in `dir`.
///
/// Checked by creating an anonymous temporary file in it.
pub fn is_writable(dir: &Path) -> bool {
    match tempfile::tempfile_in(dir) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "directory not writable");
            false
        }
    }
}

/// Render a path for messages, canonicalized when possible.
pub fn display_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, "hello").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_create_dir_all_under_file_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = create_dir_all(&blocker.join("child")).unwrap_err();
        assert!(matches!(*err, Error::DirectoryCreation { .. }));
    }

    #[test]
    fn test_touch_keeps_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc").join("index.rst");

        touch(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        fs::write(&path, "content").unwrap();
        touch(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_read_optional() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("routing.yml");

        assert_eq!(read_optional(&path).unwrap(), None);
        fs::write(&path, "a: b").unwrap();
        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("a: b"));
    }

    #[test]
    fn test_inspect_target() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("Module");

        assert_eq!(inspect_target(&dir).unwrap(), TargetState::Missing);

        fs::create_dir(&dir).unwrap();
        assert_eq!(
            inspect_target(&dir).unwrap(),
            TargetState::Empty { writable: true }
        );

        fs::write(dir.join("file"), "").unwrap();
        assert_eq!(inspect_target(&dir).unwrap(), TargetState::NotEmpty);

        let file = temp.path().join("file");
        fs::write(&file, "").unwrap();
        assert_eq!(inspect_target(&file).unwrap(), TargetState::File);
    }

    #[test]
    fn test_writability_probe_leaves_directory_empty() {
        let temp = TempDir::new().unwrap();
        assert!(is_writable(temp.path()));
        assert!(is_writable(temp.path()));
        assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_directory_owned_by_another_user_is_not_writable() {
        // root-owned and mode 0555; refused even to root
        assert!(!is_writable(Path::new("/proc")));
    }
}
