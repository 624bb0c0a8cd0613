use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A single bank transaction as the dashboard stores it. Expenses carry a
/// negative amount, income a positive one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category_id: Option<i64>,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Money) -> Self {
        Transaction {
            id: None,
            date,
            description: description.into(),
            amount,
            category_id: None,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "STARBUCKS STORE #123",
            Money::from_cents(cents),
        )
    }

    #[test]
    fn new_transaction_starts_uncategorized() {
        let t = tx(-450);
        assert!(t.id.is_none());
        assert!(!t.is_categorized());
    }

    #[test]
    fn negative_amount_is_expense() {
        assert!(tx(-450).is_expense());
        assert!(!tx(450).is_expense());
        assert!(!tx(0).is_expense());
    }

    #[test]
    fn money_cents_round_trip() {
        assert_eq!(Money::from_cents(-450).to_cents(), -450);
        assert_eq!(Money::from_cents(-450).abs().to_cents(), 450);
    }

    #[test]
    fn money_float_view() {
        assert!((Money::from_cents(-450).to_f64() + 4.5).abs() < 1e-9);
    }
}
