use serde::{Deserialize, Serialize};

/// A budget category record as stored. `filter_profile` is the raw JSON
/// text column holding the auto-categorization rule set; the categorize
/// crate owns parsing and matching against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub filter_profile: Option<String>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Category {
            id,
            name: name.into(),
            filter_profile: None,
        }
    }

    pub fn has_filter_profile(&self) -> bool {
        self.filter_profile.is_some()
    }
}
