//! Engine tuning parameters
//!
//! All thresholds are explicit so that tests can exercise sensitivity
//! without touching module state.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Minimum confidence for a leaf scorer to win
pub const ACCEPT_THRESHOLD: f64 = 0.4;
/// Fixed confidence assigned to the generic container fallback
pub const FALLBACK_CONFIDENCE: f64 = 0.3;
/// Minimum candidate score for a slot assignment
pub const SLOT_THRESHOLD: f64 = 0.5;
pub const BLOCK_ACCEPT_THRESHOLD: f64 = 0.4;
pub const BLOCK_FALLBACK_CONFIDENCE: f64 = 0.3;
/// Traversal depth guard for composition, decomposition and tree annotation
pub const MAX_DEPTH: usize = 12;
/// Children whose top edges are within this many pixels share a row
pub const ROW_CLUSTER_PX: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub accept_threshold: f64,
    pub fallback_confidence: f64,
    pub slot_threshold: f64,
    pub block_accept_threshold: f64,
    pub block_fallback_confidence: f64,
    pub max_depth: usize,
    pub row_cluster_px: f64,
    /// Slot or mapping confidences in `[low, high)` produce suggestions
    pub suggestion_band: (f64, f64),
    /// Composition confidence multiplier at depth 2
    pub nested_decay: f64,
    /// Composition confidence multiplier beyond depth 2
    pub deep_decay: f64,
    /// Direct child count at which a subtree stops being simple
    pub complexity_moderate_at: usize,
    pub complexity_complex_at: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            accept_threshold: ACCEPT_THRESHOLD,
            fallback_confidence: FALLBACK_CONFIDENCE,
            slot_threshold: SLOT_THRESHOLD,
            block_accept_threshold: BLOCK_ACCEPT_THRESHOLD,
            block_fallback_confidence: BLOCK_FALLBACK_CONFIDENCE,
            max_depth: MAX_DEPTH,
            row_cluster_px: ROW_CLUSTER_PX,
            suggestion_band: (0.5, 0.7),
            nested_decay: 0.9,
            deep_decay: 0.8,
            complexity_moderate_at: 4,
            complexity_complex_at: 9,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("accept_threshold", self.accept_threshold),
            ("fallback_confidence", self.fallback_confidence),
            ("slot_threshold", self.slot_threshold),
            ("block_accept_threshold", self.block_accept_threshold),
            ("block_fallback_confidence", self.block_fallback_confidence),
            ("nested_decay", self.nested_decay),
            ("deep_decay", self.deep_decay),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::config(field, format!("{value} is outside [0, 1]")));
            }
        }

        if self.fallback_confidence >= self.accept_threshold {
            return Err(EngineError::config(
                "fallback_confidence",
                "must stay below accept_threshold so the fallback never outranks a real match",
            ));
        }
        if self.max_depth == 0 {
            return Err(EngineError::config("max_depth", "must be at least 1"));
        }
        if !(self.row_cluster_px.is_finite() && self.row_cluster_px > 0.0) {
            return Err(EngineError::config("row_cluster_px", "must be a positive number of pixels"));
        }
        let (low, high) = self.suggestion_band;
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low >= high {
            return Err(EngineError::config("suggestion_band", format!("[{low}, {high}) is not a valid band")));
        }
        if self.complexity_moderate_at >= self.complexity_complex_at {
            return Err(EngineError::config(
                "complexity_moderate_at",
                "must be smaller than complexity_complex_at",
            ));
        }
        Ok(())
    }

    pub(crate) fn in_suggestion_band(&self, confidence: f64) -> bool {
        let (low, high) = self.suggestion_band;
        confidence >= low && confidence < high
    }
}
