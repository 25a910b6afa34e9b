// ABOUTME: Reduces the routine catalog to a bounded candidate set for the caller's level
// ABOUTME: Level match with fallback to the first routines, then six-field projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

//! # Candidate Selection
//!
//! 1. Collect routines whose `difficultyLevel` equals the normalized level,
//!    stopping at [`MAX_CANDIDATES`].
//! 2. If none match, take the first [`MAX_CANDIDATES`] routines in catalog order.
//! 3. Project each to a [`RoutineSummary`].
//!
//! A catalog read failure yields an empty set; the pipeline turns that into a
//! "no recommendation possible" outcome.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::CatalogSource;
use crate::constants::limits::MAX_CANDIDATES;
use crate::models::{RoutineRecord, RoutineSummary, TrainingLevel};

/// Pure candidate selection over an in-memory record slice
#[must_use]
pub fn select_candidates(records: &[RoutineRecord], level: &str) -> Vec<RoutineSummary> {
    let level = TrainingLevel::parse(level);

    let matching: Vec<&RoutineRecord> = if level.as_str().is_empty() {
        Vec::new()
    } else {
        records
            .iter()
            .filter(|record| {
                record
                    .difficulty_level
                    .as_deref()
                    .is_some_and(|difficulty| level.matches(difficulty))
            })
            .take(MAX_CANDIDATES)
            .collect()
    };

    if matching.is_empty() {
        info!(level = %level, "No routines match level, falling back to first routines");
        return records
            .iter()
            .take(MAX_CANDIDATES)
            .map(RoutineSummary::from)
            .collect();
    }

    info!(level = %level, candidates = matching.len(), "Filtered routines for level");
    matching.into_iter().map(RoutineSummary::from).collect()
}

/// Catalog filter bound to a catalog source
#[derive(Clone)]
pub struct CatalogFilter {
    source: Arc<dyn CatalogSource>,
}

impl CatalogFilter {
    /// Filter over `source`
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Bounded candidate set for `level`; empty if the catalog cannot be read
    pub async fn candidates(&self, level: &str) -> Vec<RoutineSummary> {
        match self.source.load_routines().await {
            Ok(records) => {
                if records.is_empty() {
                    warn!("Routine catalog is empty");
                }
                select_candidates(&records, level)
            }
            Err(e) => {
                error!("Failed to load routine catalog: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(levels: &[&str]) -> Vec<RoutineRecord> {
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| RoutineRecord::new(i.to_string(), format!("Routine {i}"), *level))
            .collect()
    }

    #[test]
    fn test_matching_is_case_and_whitespace_insensitive() {
        let records = catalog(&["beginner", " INTERMEDIATE ", "Advanced"]);
        let picked = select_candidates(&records, "  Intermediate");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "1");
    }

    #[test]
    fn test_records_without_difficulty_never_match() {
        let mut records = catalog(&["BEGINNER"]);
        records.push(RoutineRecord {
            difficulty_level: None,
            ..RoutineRecord::new("x", "No level", "")
        });
        let picked = select_candidates(&records, "BEGINNER");
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "0");
    }

    #[test]
    fn test_blank_level_falls_back() {
        let records = catalog(&["BEGINNER", "ADVANCED"]);
        assert_eq!(select_candidates(&records, "   ").len(), 2);
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        assert!(select_candidates(&[], "BEGINNER").is_empty());
    }
}
