//! Whole-file text IO.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Io(io::Error),
    NotFound(PathBuf),
    PermissionDenied(PathBuf),
    NotAFile(PathBuf),
    InvalidUtf8(PathBuf),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Io(e) => write!(f, "IO error: {}", e),
            FileError::NotFound(p) => write!(f, "Not found: {}", p.display()),
            FileError::PermissionDenied(p) => write!(f, "Permission denied: {}", p.display()),
            FileError::NotAFile(p) => write!(f, "Not a file: {}", p.display()),
            FileError::InvalidUtf8(p) => write!(f, "Not valid UTF-8: {}", p.display()),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(e: io::Error) -> Self {
        FileError::Io(e)
    }
}

/// Reads and writes documents as whole UTF-8 files.
pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        Self
    }

    pub fn read_file(&self, path: &Path) -> Result<String> {
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        match std::fs::read_to_string(path) {
            Ok(content) => {
                tracing::info!(path = %path.display(), bytes = content.len(), "file opened");
                Ok(content)
            }
            Err(e) => Err(Self::classify(e, path)),
        }
    }

    pub fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        match std::fs::write(path, content) {
            Ok(()) => {
                tracing::info!(path = %path.display(), bytes = content.len(), "file saved");
                Ok(())
            }
            Err(e) => Err(Self::classify(e, path)),
        }
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Expands prompt input into a save path, appending `.txt` when the
    /// user gave no extension.
    pub fn normalize_save_path(&self, input: &str) -> PathBuf {
        let path = PathBuf::from(input.trim());
        if path.extension().is_none() {
            path.with_extension("txt")
        } else {
            path
        }
    }

    fn classify(e: io::Error, path: &Path) -> FileError {
        match e.kind() {
            io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::InvalidData => FileError::InvalidUtf8(path.to_path_buf()),
            _ => FileError::Io(e),
        }
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_save_path_appends_txt() {
        let service = FileService::new();
        assert_eq!(
            service.normalize_save_path("notes"),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            service.normalize_save_path("notes.md"),
            PathBuf::from("notes.md")
        );
        assert_eq!(
            service.normalize_save_path("  notes  "),
            PathBuf::from("notes.txt")
        );
    }

    #[test]
    fn test_read_missing_file() {
        let service = FileService::new();
        let err = service
            .read_file(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
        assert!(err.to_string().contains("here.txt"));
    }

    #[test]
    fn test_file_error_display() {
        let err = FileError::NotAFile(PathBuf::from("/tmp"));
        assert!(err.to_string().contains("/tmp"));
    }
}
