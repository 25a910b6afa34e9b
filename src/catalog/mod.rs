// ABOUTME: Routine catalog access and candidate selection
// ABOUTME: Read-only catalog sources and the bounded level filter feeding the prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Routine Catalog
//!
//! The catalog is the only process-wide resource of the pipeline. It is read,
//! never written, so concurrent requests share it without locking.

/// Level filter and six-field projection
pub mod filter;
/// Catalog sources (JSON file, in-memory)
pub mod source;

pub use filter::{select_candidates, CatalogFilter};
pub use source::{CatalogError, CatalogSource, InMemoryCatalog, JsonFileCatalog};
