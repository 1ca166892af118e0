//! Store → validate → merge orchestration.

use crate::merge::merge_documents;
use crate::store::environment_key;
use crate::{Config, ConfigError, ConfigResult, Format, Store};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;


/// Options accepted by [`Retriever::new`].
#[derive(Clone, Default)]
pub struct RetrieverOptions {
    /// Active environment name; empty means the root document is used alone.
    pub active: String,
    /// `"JSON"` or `"YAML"`, case-insensitive.
    pub format: String,
    /// Document source.
    pub store: Option<Arc<dyn Store>>,
}

impl RetrieverOptions {
    /// Options reading from `store` as JSON with no active environment.
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            active: String::new(),
            format: Format::Json.to_string(),
            store: Some(Arc::new(store)),
        }
    }

    pub fn with_active(mut self, active: impl Into<String>) -> Self {
        self.active = active.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }
}

impl fmt::Debug for RetrieverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrieverOptions")
            .field("active", &self.active)
            .field("format", &self.format)
            .field("store", &self.store.as_ref().map(|_| "<store>"))
            .finish()
    }
}

/// Progress of a single [`Retriever::get`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Created,
    Validated,
    Merged,
    Ready,
}

/// Produces the effective config for one environment.
#[derive(Clone)]
pub struct Retriever {
    active: Option<String>,
    format: Format,
    store: Arc<dyn Store>,
}

impl Retriever {
    /// Validate options and build a retriever.
    ///
    /// The format must be JSON or YAML and a store must be present.
    pub fn new(options: RetrieverOptions) -> ConfigResult<Self> {
        let format: Format = options.format.parse()?;
        let store = options.store.ok_or_else(|| ConfigError::InvalidOption {
            name: "store".to_string(),
            message: "a store is required".to_string(),
        })?;
        let active = Some(environment_key(&options.active)).filter(|active| !active.is_empty());
        debug!(
            "created config retriever (format={format}, active={})",
            active.as_deref().unwrap_or("-")
        );
        Ok(Self {
            active,
            format,
            store,
        })
    }

    /// Normalized active environment, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Read the store and produce the effective config.
    ///
    /// # Errors
    ///
    /// Fails when the store cannot be read, the root is empty, a document is
    /// not valid for the declared format, the active environment has no
    /// override, or the merge fails.
    pub fn get(&self) -> ConfigResult<Config> {
        let mut stage = Stage::Created;
        let result = self.retrieve(&mut stage);
        if let Err(err) = &result {
            warn!("config retrieval failed (stage={stage:?}): {err}");
        }
        result
    }

    fn retrieve(&self, stage: &mut Stage) -> ConfigResult<Config> {
        let contents = self.store.read()?;
        if contents.root.iter().all(u8::is_ascii_whitespace) {
            return Err(ConfigError::EmptyRoot);
        }
        let root_json = self.format.canonicalize("root", &contents.root)?;

        let Some(active) = self.active.as_deref() else {
            self.advance(stage, Stage::Validated);
            self.advance(stage, Stage::Ready);
            info!(
                "config ready (format={}, active=-, bytes={})",
                self.format,
                contents.root.len()
            );
            return Ok(Config::from_validated(self.format, contents.root));
        };

        let overlay = contents
            .overrides
            .get(active)
            .ok_or_else(|| ConfigError::ActiveNotFound(active.to_string()))?;
        let overlay_json = self
            .format
            .canonicalize(&format!("override({active})"), overlay)?;
        self.advance(stage, Stage::Validated);

        let merged = merge_documents(&root_json, &overlay_json)
            .map_err(|err| merge_context(err, *stage, active))?;
        self.advance(stage, Stage::Merged);

        let raw = self.format.render("merged config", &merged)?;
        self.advance(stage, Stage::Ready);
        info!(
            "config ready (format={}, active={active}, bytes={})",
            self.format,
            raw.len()
        );
        Ok(Config::from_validated(self.format, raw))
    }

    fn advance(&self, stage: &mut Stage, next: Stage) {
        debug!("config retriever stage {stage:?} -> {next:?}");
        *stage = next;
    }
}

/// Name the environment and the last completed stage on a merge failure.
fn merge_context(err: ConfigError, stage: Stage, active: &str) -> ConfigError {
    match err {
        ConfigError::Merge { label, message } => {
            let label = format!("override({active}) onto root, {label} rejected after {stage:?}");
            ConfigError::Merge { label, message }
        }
        other => other,
    }
}

impl fmt::Debug for Retriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retriever")
            .field("active", &self.active)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
