//! Spec persistence
//!
//! The generated document is read and written through the `SpecStore`
//! trait so tests can swap the filesystem for memory.

use crate::spec::OpenApiSpec;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenApiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialization format for a persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// Infer the format from a file path extension.
    pub fn for_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            SpecFormat::Yaml
        } else {
            SpecFormat::Json
        }
    }
}

/// Persistence collaborator for generated documents.
pub trait SpecStore: Send + Sync {
    /// Read a previously persisted document; `None` when absent.
    fn read_spec(&self, path: &str) -> Result<Option<OpenApiSpec>, OpenApiError>;

    /// Write the document, overwriting any existing one.
    fn write_spec(
        &self,
        path: &str,
        spec: &OpenApiSpec,
        format: SpecFormat,
    ) -> Result<(), OpenApiError>;
}

/// Filesystem-backed store. JSON is written pretty-printed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSpecStore;

impl SpecStore for FsSpecStore {
    fn read_spec(&self, path: &str) -> Result<Option<OpenApiSpec>, OpenApiError> {
        if !Path::new(path).exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)?;
        let spec = match SpecFormat::for_path(path) {
            SpecFormat::Json => serde_json::from_str(&text)?,
            SpecFormat::Yaml => serde_yaml::from_str(&text)?,
        };
        Ok(Some(spec))
    }

    fn write_spec(
        &self,
        path: &str,
        spec: &OpenApiSpec,
        format: SpecFormat,
    ) -> Result<(), OpenApiError> {
        let text = match format {
            SpecFormat::Json => serde_json::to_string_pretty(spec)?,
            SpecFormat::Yaml => serde_yaml::to_string(spec)?,
        };
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// In-memory store for tests; counts writes so regeneration behavior is
/// observable.
#[derive(Default)]
pub struct MemorySpecStore {
    specs: Mutex<BTreeMap<String, OpenApiSpec>>,
    writes: AtomicUsize,
}

impl MemorySpecStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Pre-seed a persisted document.
    pub fn insert(&self, path: impl Into<String>, spec: OpenApiSpec) {
        self.specs.lock().insert(path.into(), spec);
    }
}

impl SpecStore for MemorySpecStore {
    fn read_spec(&self, path: &str) -> Result<Option<OpenApiSpec>, OpenApiError> {
        Ok(self.specs.lock().get(path).cloned())
    }

    fn write_spec(
        &self,
        path: &str,
        spec: &OpenApiSpec,
        _format: SpecFormat,
    ) -> Result<(), OpenApiError> {
        self.specs.lock().insert(path.to_string(), spec.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
