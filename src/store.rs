use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Fixed key (file name) of the cached snippet.
pub const LAST_ANALYZED_CODE: &str = "last_analyzed_code";

/// Keeps the most recently analyzed snippet across runs.
#[derive(Debug, Clone)]
pub struct SnippetStore {
    dir: PathBuf,
}

impl SnippetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(LAST_ANALYZED_CODE)
    }

    /// The cached snippet, if there is one.
    ///
    /// A cache that exists but cannot be read is logged and treated as empty.
    pub fn load(&self) -> Option<String> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(code) => Some(code),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Ignoring unreadable snippet cache {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Replace the cached snippet.
    pub fn save(&self, code: &str) -> Result<(), StoreError> {
        let path = self.path();
        write(&self.dir, &path, code).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Saved last analyzed code to {}", path.display());
        Ok(())
    }
}

fn write(dir: &Path, path: &Path, code: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(path, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_store_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SnippetStore::new(dir.path()).load(), None);
    }

    #[test]
    fn save_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnippetStore::new(dir.path().join("cache"));

        store.save("print('first')").unwrap();
        store.save("print('second')").unwrap();

        assert_eq!(store.load().as_deref(), Some("print('second')"));
        assert_eq!(
            store.path(),
            dir.path().join("cache").join(LAST_ANALYZED_CODE)
        );
    }

    #[test]
    fn unreadable_cache_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as a string
        fs::create_dir_all(dir.path().join(LAST_ANALYZED_CODE)).unwrap();
        assert_eq!(SnippetStore::new(dir.path()).load(), None);
    }
}
