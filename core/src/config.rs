use serde::{Deserialize, Serialize};

/// Multipliers applied to per-field term counts when scoring a posting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub title: f64,
    pub category: f64,
    pub tag: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self { title: 3.0, category: 2.0, tag: 1.0 }
    }
}

impl FieldWeights {
    /// Weights must be finite and non-negative so every posting score is too.
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in [("title", self.title), ("category", self.category), ("tag", self.tag)] {
            if !w.is_finite() || w < 0.0 {
                return Err(format!("{name} weight must be a finite non-negative number, got {w}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result cap used when the caller does not pass one.
    pub default_top_k: usize,
    /// Upper bound applied to caller-supplied caps at the HTTP boundary.
    pub max_top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_top_k: 20, max_top_k: 100 }
    }
}
