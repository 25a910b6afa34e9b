// ABOUTME: Read-only routine catalog sources
// ABOUTME: JSON file loader and an in-memory catalog behind a common async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::models::RoutineRecord;

/// Failure reading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("failed to read routine catalog {path}: {source}")]
    Io {
        /// Catalog file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// Content is not a JSON array of routine objects
    #[error("routine catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Ordered, read-only sequence of routine records
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load every routine in catalog order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the catalog cannot be read or parsed
    async fn load_routines(&self) -> Result<Vec<RoutineRecord>, CatalogError>;
}

/// Catalog stored as a JSON array in a file, read on every load
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Catalog backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load_routines(&self) -> Result<Vec<RoutineRecord>, CatalogError> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        let routines: Vec<RoutineRecord> = serde_json::from_str(&content)?;
        debug!(count = routines.len(), path = %self.path.display(), "Loaded routine catalog");
        Ok(routines)
    }
}

/// Catalog held in memory, shared across clones
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    routines: Arc<Vec<RoutineRecord>>,
}

impl InMemoryCatalog {
    /// Catalog over the given records
    #[must_use]
    pub fn new(routines: Vec<RoutineRecord>) -> Self {
        Self {
            routines: Arc::new(routines),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn load_routines(&self) -> Result<Vec<RoutineRecord>, CatalogError> {
        Ok(self.routines.as_ref().clone())
    }
}
