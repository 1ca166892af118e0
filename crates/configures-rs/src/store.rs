//! Sources that supply the root document and per-environment overrides.

use crate::{ConfigError, ConfigResult, StoreError};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Everything a store produced in one read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreContents {
    /// Base document.
    pub root: Vec<u8>,
    /// Override documents keyed by uppercased environment name.
    pub overrides: HashMap<String, Vec<u8>>,
}

/// One-shot synchronous supplier of config documents.
pub trait Store: Send + Sync {
    /// Read the root document and all override documents.
    fn read(&self) -> Result<StoreContents, StoreError>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn read(&self) -> Result<StoreContents, StoreError> {
        (**self).read()
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn read(&self) -> Result<StoreContents, StoreError> {
        (**self).read()
    }
}

/// Normalize an environment name into an override key.
pub(crate) fn environment_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// File-system store reading a single file or a directory of documents.
///
/// In a directory, files whose name starts with `prefix` are considered. The
/// extension is stripped and the rest is split at the first `splitter`: no
/// splitter (or one at the very start) makes the file the root document,
/// otherwise the suffix names the environment the file overrides. With prefix
/// `app` and splitter `.`, `app.json` is the root and `app.dev.json` overrides
/// `DEV`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    prefix: String,
    splitter: char,
}

/// Role a directory entry plays in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Root,
    Override(String),
}

impl FileStore {
    /// Create a store over `path` (file or directory).
    pub fn new(
        path: impl AsRef<Path>,
        prefix: impl Into<String>,
        splitter: char,
    ) -> ConfigResult<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::InvalidOption {
                name: "prefix".to_string(),
                message: "file store prefix must not be empty".to_string(),
            });
        }
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            prefix,
            splitter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_dir(&self) -> Result<StoreContents, StoreError> {
        let mut contents = StoreContents::default();
        let mut root_path: Option<PathBuf> = None;
        for entry in WalkDir::new(&self.path).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !file_name.starts_with(&self.prefix) {
                continue;
            }
            let path = entry.path();
            let bytes = read_file(path)?;
            match self.classify(&file_name) {
                Entry::Root => {
                    if let Some(previous) = root_path.replace(path.to_path_buf()) {
                        warn!(
                            "multiple root config files (kept={}, ignored={})",
                            path.display(),
                            previous.display()
                        );
                    }
                    contents.root = bytes;
                }
                Entry::Override(key) if key.is_empty() => {
                    warn!("skipping override with empty environment name: {}", path.display());
                }
                Entry::Override(key) => {
                    debug!("found override (env={key}, path={})", path.display());
                    if contents.overrides.insert(key.clone(), bytes).is_some() {
                        warn!("duplicate override for env {key}; keeping {}", path.display());
                    }
                }
            }
        }
        Ok(contents)
    }

    fn classify(&self, file_name: &str) -> Entry {
        let stem = match file_name.rfind('.') {
            Some(index) => &file_name[..index],
            None => {
                warn!("config file without extension: {file_name}");
                file_name
            }
        };
        match stem.find(self.splitter) {
            Some(index) if index > 0 => {
                Entry::Override(environment_key(&stem[index + self.splitter.len_utf8()..]))
            }
            _ => Entry::Root,
        }
    }
}

impl Store for FileStore {
    fn read(&self) -> Result<StoreContents, StoreError> {
        let metadata = fs::metadata(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            debug!("reading single config file: {}", self.path.display());
            return Ok(StoreContents {
                root: read_file(&self.path)?,
                overrides: HashMap::new(),
            });
        }
        let contents = self.read_dir()?;
        info!(
            "read config directory (path={}, root_bytes={}, overrides={})",
            self.path.display(),
            contents.root.len(),
            contents.overrides.len()
        );
        Ok(contents)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, StoreError> {
    fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// In-memory store, useful for embedded documents and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: StoreContents,
}

impl MemoryStore {
    /// Create a store holding only a root document.
    pub fn new(root: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: StoreContents {
                root: root.into(),
                overrides: HashMap::new(),
            },
        }
    }

    /// Add an override for `env` (normalized to trimmed uppercase).
    pub fn with_override(mut self, env: &str, document: impl Into<Vec<u8>>) -> Self {
        self.contents
            .overrides
            .insert(environment_key(env), document.into());
        self
    }
}

impl Store for MemoryStore {
    fn read(&self) -> Result<StoreContents, StoreError> {
        Ok(self.contents.clone())
    }
}
