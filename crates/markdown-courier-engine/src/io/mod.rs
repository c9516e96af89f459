use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid document root: {0}")]
    InvalidRoot(PathBuf),
}

/// Where documents and the binary assets they reference come from.
///
/// Only the orchestration layer reads through this; the segmenter, scanner
/// and renderer work on text they are handed.
pub trait ContentSource {
    fn read_document(&self, path: &RelativePath) -> Result<String, IoError>;

    fn read_binary(&self, path: &RelativePath) -> Result<Vec<u8>, IoError>;
}

/// Reads documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IoError::InvalidRoot(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &RelativePath) -> Result<PathBuf, IoError> {
        let absolute = path.to_path(&self.root);
        if !absolute.exists() {
            return Err(IoError::NotFound(absolute));
        }
        Ok(absolute)
    }
}

impl ContentSource for FsContentSource {
    fn read_document(&self, path: &RelativePath) -> Result<String, IoError> {
        let absolute = self.resolve(path)?;
        fs::read_to_string(&absolute).map_err(|source| IoError::Io {
            path: absolute,
            source,
        })
    }

    fn read_binary(&self, path: &RelativePath) -> Result<Vec<u8>, IoError> {
        let absolute = self.resolve(path)?;
        fs::read(&absolute).map_err(|source| IoError::Io {
            path: absolute,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root_with(files: &[(&str, &[u8])]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, bytes) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, bytes).unwrap();
        }
        dir
    }

    #[test]
    fn reads_documents_and_binaries() {
        let dir = root_with(&[("notes/post.md", b"# Post"), ("img/a.png", &[0x89, b'P'])]);
        let source = FsContentSource::new(dir.path()).unwrap();

        let text = source.read_document(RelativePath::new("notes/post.md")).unwrap();
        assert_eq!(text, "# Post");
        let bytes = source.read_binary(RelativePath::new("img/a.png")).unwrap();
        assert_eq!(bytes, vec![0x89, b'P']);
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = root_with(&[]);
        let source = FsContentSource::new(dir.path()).unwrap();
        let result = source.read_document(RelativePath::new("nope.md"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn root_must_be_a_directory() {
        let result = FsContentSource::new("/this/path/does/not/exist");
        assert!(matches!(result, Err(IoError::InvalidRoot(_))));
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let dir = root_with(&[("bad.md", &[0xff, 0xfe])]);
        let source = FsContentSource::new(dir.path()).unwrap();
        let err = source.read_document(RelativePath::new("bad.md")).unwrap_err();
        assert!(matches!(err, IoError::Io { .. }));
        assert!(err.to_string().contains("bad.md"));
    }
}
