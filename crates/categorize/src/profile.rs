use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("invalid filter profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-category auto-matching rule set. Stored as a JSON text column on the
/// category; the camelCase field names are the compatibility contract with
/// the rest of the system and must not change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterProfile {
    pub keywords: Vec<String>,
    pub merchant_patterns: Vec<String>,
    pub amount_ranges: Vec<AmountRange>,
    pub exclude_keywords: Vec<String>,
}

impl FilterProfile {
    pub fn from_json(json: &str) -> Result<FilterProfile, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises back to the stored column shape. Infallible for this type.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("filter profile serializes")
    }

    /// True when no criterion is configured; such a profile never matches.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.merchant_patterns.is_empty()
            && self.amount_ranges.is_empty()
            && self.exclude_keywords.is_empty()
    }
}

/// Inclusive bounds on the absolute transaction amount; an absent bound is
/// unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl AmountRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        AmountRange { min, max }
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.min.map_or(true, |min| amount >= min) && self.max.map_or(true, |max| amount <= max)
    }
}

impl fmt::Display for AmountRange {
    // Matching runs on absolute amounts, so an absent min reads as 0.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min {
            Some(min) => write!(f, "{min}")?,
            None => write!(f, "0")?,
        }
        match self.max {
            Some(max) => write!(f, " - {max}"),
            None => write!(f, " - ∞"),
        }
    }
}
