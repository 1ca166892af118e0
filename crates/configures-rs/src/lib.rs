//! Environment-aware configuration loading.
//!
//! A [`Store`] supplies a root document plus per-environment override
//! documents. The [`Retriever`] validates them for the declared [`Format`],
//! deep-merges the active environment's override onto the root and hands back
//! an immutable [`Config`] that can be decoded whole or queried by path.

mod config;
mod document;
mod error;
mod format;
mod merge;
mod path;
mod raw;
mod retriever;
mod store;

/// Format-dispatching config returned by the retriever.
pub use config::Config;
/// Query surface and the concrete per-format documents.
pub use document::{Document, JsonConfig, YamlConfig};
/// Public error type returned by loading, merging and decoding APIs.
pub use error::{ConfigError, ConfigResult, StoreError};
/// Supported document formats.
pub use format::Format;
/// Deep-merge engine over canonical JSON bytes.
pub use merge::{merge_documents, merge_value};
/// Undecoded JSON sub-documents.
pub use raw::Raw;
/// Orchestration of store, validation and merge.
pub use retriever::{Retriever, RetrieverOptions};
/// Document sources.
pub use store::{FileStore, MemoryStore, Store, StoreContents};
