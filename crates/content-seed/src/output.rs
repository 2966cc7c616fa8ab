//! Writing generated posts into the content directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::generators::GeneratedPost;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Refusing to clear non-file entry: {0}")]
    UnexpectedEntry(PathBuf),
    #[error("Post already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeedError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A post that has been written to disk.
#[derive(Debug, Clone)]
pub struct WrittenPost {
    pub path: PathBuf,
    pub post: GeneratedPost,
    pub bytes: usize,
}

/// Writes posts into a single content directory.
pub struct ContentWriter {
    dir: PathBuf,
}

impl ContentWriter {
    /// Creates a writer for `dir`. Nothing is touched until used.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Removes every file in the directory, creating it if missing.
    ///
    /// The directory is inspected before anything is deleted: if it holds a
    /// subdirectory (or anything else that is not a regular file or symlink)
    /// the call fails and no file is removed.
    pub fn clear(&self) -> Result<usize, SeedError> {
        if !self.dir.exists() {
            warn!("Content directory {} does not exist, creating it", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|e| SeedError::io(&self.dir, e))?;
            return Ok(0);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| SeedError::io(&self.dir, e))? {
            let entry = entry.map_err(|e| SeedError::io(&self.dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| SeedError::io(&path, e))?;

            if !(file_type.is_file() || file_type.is_symlink()) {
                return Err(SeedError::UnexpectedEntry(path));
            }
            files.push(path);
        }

        for path in &files {
            fs::remove_file(path).map_err(|e| SeedError::io(path, e))?;
            debug!("Removed {}", path.display());
        }

        info!("Removed {} existing files from {}", files.len(), self.dir.display());
        Ok(files.len())
    }

    /// Writes a post under its generated file name.
    ///
    /// Never overwrites: an existing file with the same name is an error.
    pub fn write_post(&self, post: &GeneratedPost) -> Result<WrittenPost, SeedError> {
        let path = self.dir.join(post.file_name());
        let markdown = post.to_markdown();

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(SeedError::AlreadyExists(path));
            }
            Err(e) => return Err(SeedError::io(&path, e)),
        };
        file.write_all(markdown.as_bytes())
            .map_err(|e| SeedError::io(&path, e))?;

        info!("Post generated: {}", path.display());

        Ok(WrittenPost {
            path,
            post: post.clone(),
            bytes: markdown.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::PostGenerator;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("content-seed-{}", Uuid::new_v4().simple()))
    }

    #[test]
    fn test_clear_creates_missing_dir() {
        let dir = temp_dir();
        let writer = ContentWriter::new(&dir);

        assert_eq!(writer.clear().unwrap(), 0);
        assert!(dir.is_dir());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_clear_removes_files() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("old.md"), "old").unwrap();
        fs::write(dir.join("_index.md"), "index").unwrap();

        let writer = ContentWriter::new(&dir);
        assert_eq!(writer.clear().unwrap(), 2);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_clear_rejects_subdirectory() {
        let dir = temp_dir();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("keep.md"), "keep").unwrap();

        let writer = ContentWriter::new(&dir);
        assert!(matches!(writer.clear(), Err(SeedError::UnexpectedEntry(_))));
        // Nothing is deleted when the directory is rejected.
        assert!(dir.join("keep.md").exists());

        fs::remove_dir_all(dir).ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_clear_rejects_socket() {
        use std::os::unix::net::UnixListener;

        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("keep.md"), "keep").unwrap();
        let socket = dir.join("seed.sock");
        let _listener = UnixListener::bind(&socket).unwrap();

        let writer = ContentWriter::new(&dir);
        assert!(matches!(
            writer.clear(),
            Err(SeedError::UnexpectedEntry(path)) if path == socket
        ));
        assert!(socket.exists());
        assert!(dir.join("keep.md").exists());

        fs::remove_dir_all(dir).ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_clear_removes_symlinks() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        std::os::unix::fs::symlink("/nonexistent-target", dir.join("dangling.md")).unwrap();

        let writer = ContentWriter::new(&dir);
        assert_eq!(writer.clear().unwrap(), 1);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_write_post() {
        let dir = temp_dir();
        let writer = ContentWriter::new(&dir);
        writer.clear().unwrap();

        let post_gen = PostGenerator::new(OffsetDateTime::now_utc().date());
        let post = post_gen.generate(&mut rand::thread_rng());

        let written = writer.write_post(&post).unwrap();
        assert_eq!(written.path, dir.join(post.file_name()));
        assert_eq!(fs::read_to_string(&written.path).unwrap(), post.to_markdown());
        assert_eq!(written.bytes, post.to_markdown().len());

        // Same id again must not clobber the first file.
        assert!(matches!(
            writer.write_post(&post),
            Err(SeedError::AlreadyExists(_))
        ));

        fs::remove_dir_all(dir).ok();
    }
}
