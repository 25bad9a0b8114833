//! Evidence accumulation shared by leaf and block scorers
//!
//! A sheet starts at zero. Signals add or subtract a weight and leave a
//! reason behind; the running total may leave [0, 1] while signals are
//! applied and is clamped exactly once, in [`ScoreSheet::total`].

use crate::types::clamp_unit;

#[derive(Debug, Clone, Default)]
pub struct ScoreSheet {
    raw: f64,
    reasons: Vec<String>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positive evidence
    pub fn add(&mut self, weight: f64, reason: impl Into<String>) {
        self.raw += weight;
        self.reasons.push(format!("+{weight:.2} {}", reason.into()));
    }

    /// Negative evidence: the structure implies a different type
    pub fn penalize(&mut self, weight: f64, reason: impl Into<String>) {
        self.raw -= weight;
        self.reasons.push(format!("-{weight:.2} {}", reason.into()));
    }

    /// Signed weight, routed to `add` or `penalize`
    pub fn apply(&mut self, weight: f64, reason: impl Into<String>) {
        if weight >= 0.0 {
            self.add(weight, reason);
        } else {
            self.penalize(-weight, reason);
        }
    }

    /// Zero the score and record why; used by early-return guards
    pub fn veto(&mut self, reason: impl Into<String>) {
        self.raw = 0.0;
        self.reasons.push(format!("veto: {}", reason.into()));
    }

    /// Keep the score at or below `cap`
    pub fn cap(&mut self, cap: f64, reason: impl Into<String>) {
        if self.raw > cap {
            self.raw = cap;
            self.reasons.push(format!("capped at {cap:.2}: {}", reason.into()));
        }
    }

    pub fn raw(&self) -> f64 {
        self.raw
    }

    pub fn total(&self) -> f64 {
        clamp_unit(self.raw)
    }

    pub fn into_parts(self) -> (f64, Vec<String>) {
        (clamp_unit(self.raw), self.reasons)
    }
}
