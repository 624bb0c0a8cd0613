use moneta_core::Category;
use tracing::warn;

use crate::matcher::{CategorizableTransaction, MatchEngine};
use crate::profile::FilterProfile;

/// A category as the ranking pass sees it: identity plus the parsed rule
/// set, if one exists.
#[derive(Debug, Clone)]
pub struct CandidateCategory {
    pub id: i64,
    pub name: String,
    pub profile: Option<FilterProfile>,
}

/// One ranked suggestion for a transaction.
#[derive(Debug, Clone)]
pub struct CategorizationMatch {
    pub category_id: i64,
    pub category_name: String,
    pub confidence: f64,
    pub matched_filters: Vec<String>,
}

impl MatchEngine {
    /// Scores the transaction against every category that carries a profile
    /// and returns the matching ones, best first. Ties keep the order the
    /// categories were supplied in. An empty result is a valid outcome and
    /// means "no confident suggestion".
    pub fn suggest(
        &self,
        tx: &CategorizableTransaction,
        categories: &[CandidateCategory],
    ) -> Vec<CategorizationMatch> {
        let mut suggestions: Vec<CategorizationMatch> = categories
            .iter()
            .filter_map(|category| {
                let profile = category.profile.as_ref()?;
                let result = self.score(tx, profile);
                result.matches.then(|| CategorizationMatch {
                    category_id: category.id,
                    category_name: category.name.clone(),
                    confidence: result.confidence,
                    matched_filters: result.matched_rules,
                })
            })
            .collect();

        // Stable sort, so equal confidences preserve input order.
        suggestions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        suggestions
    }

    /// Ranking pass over stored category records. A profile column that
    /// fails to deserialize skips that category and the pass continues;
    /// one bad row must not sink the batch.
    pub fn suggest_stored(
        &self,
        tx: &CategorizableTransaction,
        categories: &[Category],
    ) -> Vec<CategorizationMatch> {
        let candidates: Vec<CandidateCategory> = categories
            .iter()
            .filter_map(|category| {
                let json = category.filter_profile.as_deref()?;
                match FilterProfile::from_json(json) {
                    Ok(profile) => Some(CandidateCategory {
                        id: category.id,
                        name: category.name.clone(),
                        profile: Some(profile),
                    }),
                    Err(error) => {
                        warn!(
                            category_id = category.id,
                            category = %category.name,
                            %error,
                            "skipping category with unparseable filter profile"
                        );
                        None
                    }
                }
            })
            .collect();
        self.suggest(tx, &candidates)
    }

    /// Top suggestion only — what the transaction-create flow consumes.
    pub fn best_suggestion(
        &self,
        tx: &CategorizableTransaction,
        categories: &[CandidateCategory],
    ) -> Option<CategorizationMatch> {
        self.suggest(tx, categories).into_iter().next()
    }

    /// Per-transaction suggestion lists for a bulk import. Scoring one
    /// transaction never depends on another, so callers may also shard
    /// this across threads freely.
    pub fn suggest_batch(
        &self,
        transactions: &[CategorizableTransaction],
        categories: &[CandidateCategory],
    ) -> Vec<Vec<CategorizationMatch>> {
        transactions
            .iter()
            .map(|tx| self.suggest(tx, categories))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AmountRange;

    fn tx(desc: &str, amount: f64) -> CategorizableTransaction {
        CategorizableTransaction::new(desc, amount)
    }

    fn keyword_category(id: i64, name: &str, words: &[&str]) -> CandidateCategory {
        CandidateCategory {
            id,
            name: name.to_string(),
            profile: Some(FilterProfile {
                keywords: words.iter().map(|w| w.to_string()).collect(),
                ..FilterProfile::default()
            }),
        }
    }

    #[test]
    fn ranks_matches_by_confidence_descending() {
        let categories = vec![
            keyword_category(1, "Coffee", &["coffee", "latte"]), // one of two hits: 0.3, below threshold
            CandidateCategory {
                id: 2,
                name: "Dining".to_string(),
                profile: Some(FilterProfile {
                    merchant_patterns: vec!["starbucks".into()],
                    ..FilterProfile::default()
                }),
            },
            keyword_category(3, "Drinks", &["coffee"]),
        ];
        let suggestions =
            MatchEngine::default().suggest(&tx("STARBUCKS COFFEE #55", -4.50), &categories);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].category_id, 2); // 0.8
        assert_eq!(suggestions[1].category_id, 3); // 0.6
        assert!(suggestions[0].confidence > suggestions[1].confidence);
    }

    #[test]
    fn equal_confidence_preserves_input_order() {
        let categories = vec![
            keyword_category(10, "A", &["coffee"]),
            keyword_category(20, "B", &["coffee"]),
            keyword_category(30, "C", &["coffee"]),
        ];
        let suggestions = MatchEngine::default().suggest(&tx("COFFEE", -3.0), &categories);
        let ids: Vec<i64> = suggestions.iter().map(|s| s.category_id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn categories_without_profile_are_skipped() {
        let categories = vec![
            CandidateCategory {
                id: 1,
                name: "Unconfigured".to_string(),
                profile: None,
            },
            keyword_category(2, "Coffee", &["coffee"]),
        ];
        let suggestions = MatchEngine::default().suggest(&tx("COFFEE SHOP", -3.0), &categories);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category_id, 2);
    }

    #[test]
    fn no_match_yields_empty_list() {
        let categories = vec![keyword_category(1, "Coffee", &["coffee"])];
        assert!(MatchEngine::default()
            .suggest(&tx("HARDWARE STORE", -90.0), &categories)
            .is_empty());
    }

    #[test]
    fn suggestion_carries_matched_filters() {
        let categories = vec![CandidateCategory {
            id: 7,
            name: "Coffee".to_string(),
            profile: Some(FilterProfile {
                keywords: vec!["starbucks".into(), "coffee".into()],
                merchant_patterns: vec!["Starbucks".into()],
                ..FilterProfile::default()
            }),
        }];
        let suggestions =
            MatchEngine::default().suggest(&tx("STARBUCKS STORE #123", -4.50), &categories);
        assert_eq!(suggestions.len(), 1);
        assert!((suggestions[0].confidence - 0.55).abs() < 1e-9);
        assert_eq!(
            suggestions[0].matched_filters,
            vec!["keyword: starbucks", "merchant: Starbucks"]
        );
    }

    #[test]
    fn best_suggestion_is_the_top_candidate() {
        let categories = vec![
            keyword_category(1, "Drinks", &["coffee"]),
            CandidateCategory {
                id: 2,
                name: "Dining".to_string(),
                profile: Some(FilterProfile {
                    merchant_patterns: vec!["starbucks".into()],
                    ..FilterProfile::default()
                }),
            },
        ];
        let engine = MatchEngine::default();
        let best = engine
            .best_suggestion(&tx("STARBUCKS COFFEE", -4.50), &categories)
            .unwrap();
        assert_eq!(best.category_id, 2);
        assert!(engine
            .best_suggestion(&tx("HARDWARE STORE", -90.0), &categories)
            .is_none());
    }

    #[test]
    fn suggest_batch_scores_each_transaction_independently() {
        let categories = vec![
            keyword_category(1, "Coffee", &["coffee"]),
            keyword_category(2, "Streaming", &["netflix"]),
        ];
        let txs = vec![
            tx("COFFEE SHOP", -4.0),
            tx("NETFLIX.COM", -15.49),
            tx("HARDWARE STORE", -90.0),
        ];
        let results = MatchEngine::default().suggest_batch(&txs, &categories);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0][0].category_id, 1);
        assert_eq!(results[1][0].category_id, 2);
        assert!(results[2].is_empty());
    }

    #[test]
    fn stored_pass_skips_unparseable_profiles() {
        let good = FilterProfile {
            keywords: vec!["coffee".into()],
            ..FilterProfile::default()
        };
        let categories = vec![
            Category {
                id: 1,
                name: "Broken".to_string(),
                filter_profile: Some("{not valid json".to_string()),
            },
            Category {
                id: 2,
                name: "Coffee".to_string(),
                filter_profile: Some(good.to_json()),
            },
            Category::new(3, "No profile"),
        ];
        let suggestions =
            MatchEngine::default().suggest_stored(&tx("COFFEE SHOP", -4.0), &categories);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category_id, 2);
        assert_eq!(suggestions[0].category_name, "Coffee");
    }

    #[test]
    fn stored_pass_reads_the_column_contract() {
        let json = r#"{
            "keywords": ["coffee"],
            "merchantPatterns": ["Starbucks"],
            "amountRanges": [{"min": 0, "max": 50}],
            "excludeKeywords": []
        }"#;
        let categories = vec![Category {
            id: 1,
            name: "Coffee".to_string(),
            filter_profile: Some(json.to_string()),
        }];
        let suggestions =
            MatchEngine::default().suggest_stored(&tx("STARBUCKS COFFEE", -4.50), &categories);
        assert_eq!(suggestions.len(), 1);
        // all three families fire: (0.6 + 0.8 + 0.4) / 3
        assert!((suggestions[0].confidence - 0.6).abs() < 1e-9);
    }
}
