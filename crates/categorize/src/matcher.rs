use moneta_core::Transaction;

use crate::profile::FilterProfile;
use crate::similarity::similarity;
use crate::text::extract_keywords;

/// Per-criterion weights. Merchant patterns are the strongest signal, the
/// amount range the weakest.
pub const KEYWORD_WEIGHT: f64 = 0.6;
pub const MERCHANT_WEIGHT: f64 = 0.8;
pub const AMOUNT_WEIGHT: f64 = 0.4;

/// The slice of a transaction the matcher looks at.
#[derive(Debug, Clone)]
pub struct CategorizableTransaction {
    pub description: String,
    pub amount: f64,
}

impl CategorizableTransaction {
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        CategorizableTransaction {
            description: description.into(),
            amount,
        }
    }
}

impl From<&Transaction> for CategorizableTransaction {
    fn from(tx: &Transaction) -> Self {
        CategorizableTransaction {
            description: tx.description.clone(),
            amount: tx.amount.to_f64(),
        }
    }
}

/// Outcome of scoring one transaction against one profile.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: bool,
    pub confidence: f64,
    /// Human-readable descriptions of every rule that contributed.
    pub matched_rules: Vec<String>,
}

pub struct MatchEngine {
    /// Token similarity strictly above this counts as a fuzzy keyword hit.
    pub fuzzy_threshold: f64,
    /// Confidence strictly above this counts as a match.
    pub match_threshold: f64,
    /// Multiplier applied per exclusion-keyword hit.
    pub exclusion_penalty: f64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.7,
            match_threshold: 0.3,
            exclusion_penalty: 0.3,
        }
    }
}

impl MatchEngine {
    pub fn new(fuzzy_threshold: f64, match_threshold: f64, exclusion_penalty: f64) -> Self {
        Self {
            fuzzy_threshold,
            match_threshold,
            exclusion_penalty,
        }
    }

    /// Scores one transaction against one profile. Confidence accumulates
    /// per criterion family (keywords, merchants, amounts), each weighted by
    /// the ratio of its rules that hit, then averages over the families that
    /// fired at all. Families that are configured but silent do not dilute
    /// the average. Exclusion hits are applied last, multiplicatively.
    pub fn score(&self, tx: &CategorizableTransaction, profile: &FilterProfile) -> MatchResult {
        let description = tx.description.to_lowercase();
        let tokens = extract_keywords(&tx.description);

        let mut matched_rules = Vec::new();
        let mut accumulated = 0.0;
        let mut fired = 0u32;

        if !profile.keywords.is_empty() {
            let mut hits = 0usize;
            for keyword in &profile.keywords {
                let needle = keyword.to_lowercase();
                if description.contains(&needle) {
                    hits += 1;
                    matched_rules.push(format!("keyword: {keyword}"));
                } else if let Some(token) = tokens
                    .iter()
                    .find(|token| similarity(&needle, token) > self.fuzzy_threshold)
                {
                    hits += 1;
                    matched_rules.push(format!("keyword: {keyword} (fuzzy: {token})"));
                }
            }
            if hits > 0 {
                accumulated += hits as f64 / profile.keywords.len() as f64 * KEYWORD_WEIGHT;
                fired += 1;
            }
        }

        if !profile.merchant_patterns.is_empty() {
            let mut hits = 0usize;
            for pattern in &profile.merchant_patterns {
                if description.contains(&pattern.to_lowercase()) {
                    hits += 1;
                    matched_rules.push(format!("merchant: {pattern}"));
                }
            }
            if hits > 0 {
                accumulated +=
                    hits as f64 / profile.merchant_patterns.len() as f64 * MERCHANT_WEIGHT;
                fired += 1;
            }
        }

        if !profile.amount_ranges.is_empty() {
            let amount = tx.amount.abs();
            let mut hits = 0usize;
            for range in &profile.amount_ranges {
                if range.contains(amount) {
                    hits += 1;
                    matched_rules.push(format!("amount: {range}"));
                }
            }
            if hits > 0 {
                accumulated += hits as f64 / profile.amount_ranges.len() as f64 * AMOUNT_WEIGHT;
                fired += 1;
            }
        }

        // Guarded average: zero fired families yields 0, never NaN.
        let mut confidence = if fired > 0 {
            accumulated / f64::from(fired)
        } else {
            0.0
        };

        for excluded in &profile.exclude_keywords {
            if description.contains(&excluded.to_lowercase()) {
                confidence *= self.exclusion_penalty;
                matched_rules.push(format!("excluded: {excluded}"));
            }
        }

        MatchResult {
            matches: confidence > self.match_threshold,
            confidence,
            matched_rules,
        }
    }
}
