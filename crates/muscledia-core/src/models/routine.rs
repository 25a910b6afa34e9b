// ABOUTME: Routine catalog record and its six-field RoutineSummary projection
// ABOUTME: Projection is pure data reduction with documented per-field defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Muscledia

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Full catalog entry as stored in the routine catalog
///
/// Only the fields used for filtering and projection are typed; everything else
/// (exercises, descriptions, tags, ...) is kept in `extra` and never leaves the
/// catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineRecord {
    /// Catalog id; numeric ids are kept as their decimal string
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Display title
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Difficulty label, compared case-insensitively with the training level
    #[serde(default, deserialize_with = "lenient_text")]
    pub difficulty_level: Option<String>,
    /// Split such as "full body" or "push/pull/legs"
    #[serde(default, deserialize_with = "lenient_text")]
    pub workout_split: Option<String>,
    /// Required equipment
    #[serde(default, deserialize_with = "lenient_text")]
    pub equipment_type: Option<String>,
    /// Number of plans in the routine
    #[serde(default, deserialize_with = "lenient_count")]
    pub workout_plan_count: Option<i64>,
    /// Fields not used by the recommendation pipeline
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoutineRecord {
    /// Minimal record, mainly for fixtures and in-memory catalogs
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, difficulty: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            difficulty_level: Some(difficulty.into()),
            workout_split: None,
            equipment_type: None,
            workout_plan_count: None,
            extra: Map::new(),
        }
    }

    /// Set the workout split
    #[must_use]
    pub fn with_split(mut self, split: impl Into<String>) -> Self {
        self.workout_split = Some(split.into());
        self
    }

    /// Set the equipment type
    #[must_use]
    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment_type = Some(equipment.into());
        self
    }

    /// Set the plan count
    #[must_use]
    pub const fn with_plan_count(mut self, count: i64) -> Self {
        self.workout_plan_count = Some(count);
        self
    }
}

/// Six-field projection sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSummary {
    /// Catalog id
    pub id: String,
    /// Display title, empty when absent
    pub title: String,
    /// Difficulty label, empty when absent
    pub difficulty_level: String,
    /// Workout split, empty when absent
    pub workout_split: String,
    /// Equipment type, empty when absent
    pub equipment_type: String,
    /// Plan count, zero when absent
    pub workout_plan_count: i64,
}

impl From<&RoutineRecord> for RoutineSummary {
    fn from(record: &RoutineRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone().unwrap_or_default(),
            difficulty_level: record.difficulty_level.clone().unwrap_or_default(),
            workout_split: record.workout_split.clone().unwrap_or_default(),
            equipment_type: record.equipment_type.clone().unwrap_or_default(),
            workout_plan_count: record.workout_plan_count.unwrap_or_default(),
        }
    }
}

/// Accept a JSON string or number (or null) as text
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Scalar as text; null, arrays and objects read as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Integer from a number or numeric text; anything else reads as absent
#[allow(clippy::cast_possible_truncation)]
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
