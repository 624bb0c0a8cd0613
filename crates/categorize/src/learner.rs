use std::cmp::Reverse;
use std::collections::HashMap;

use crate::matcher::CategorizableTransaction;
use crate::profile::{AmountRange, FilterProfile};
use crate::text::extract_keywords;

const MAX_KEYWORDS: usize = 5;
const MAX_MERCHANT_PATTERNS: usize = 3;
/// The learned amount range is padded 50% below the observed minimum and
/// 50% above the observed maximum.
const AMOUNT_PADDING: f64 = 0.5;

/// Derives a fresh filter profile from transactions the user has already
/// confirmed for one category. Keywords are the most frequent description
/// tokens, merchant patterns the most frequent leading words, the amount
/// range a padded envelope of the observed amounts. Exclusion keywords are
/// a manual-only concept and always start empty.
///
/// Re-learning replaces any existing profile outright; the sample is the
/// full confirmed history, so there is nothing worth merging. An empty
/// sample yields an empty profile that can never match.
pub fn learn_profile(sample: &[CategorizableTransaction]) -> FilterProfile {
    let mut token_counts = FrequencyCounter::default();
    let mut merchant_counts = FrequencyCounter::default();

    for tx in sample {
        for token in extract_keywords(&tx.description) {
            token_counts.add(token);
        }
        if let Some(first_word) = tx.description.split_whitespace().next() {
            if first_word.chars().count() > 3 {
                merchant_counts.add(first_word.to_string());
            }
        }
    }

    let amount_ranges = if sample.is_empty() {
        Vec::new()
    } else {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for tx in sample {
            let amount = tx.amount.abs();
            min = min.min(amount);
            max = max.max(amount);
        }
        vec![AmountRange::new(
            Some(min * (1.0 - AMOUNT_PADDING)),
            Some(max * (1.0 + AMOUNT_PADDING)),
        )]
    };

    FilterProfile {
        keywords: token_counts.top(MAX_KEYWORDS),
        merchant_patterns: merchant_counts.top(MAX_MERCHANT_PATTERNS),
        amount_ranges,
        exclude_keywords: Vec::new(),
    }
}

/// Counts occurrences while remembering first-seen order, so that equal
/// counts rank deterministically across runs.
#[derive(Default)]
struct FrequencyCounter {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl FrequencyCounter {
    fn add(&mut self, item: String) {
        let count = self.counts.entry(item.clone()).or_insert(0);
        if *count == 0 {
            self.order.push(item);
        }
        *count += 1;
    }

    /// Items seen more than once, most frequent first, ties in first-seen
    /// order, capped at `limit`.
    fn top(self, limit: usize) -> Vec<String> {
        let Self { counts, mut order } = self;
        order.retain(|item| counts[item] > 1);
        order.sort_by_key(|item| Reverse(counts[item]));
        order.truncate(limit);
        order
    }
}
