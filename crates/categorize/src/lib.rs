//! Transaction auto-categorization: scores transactions against
//! per-category filter profiles and learns new profiles from confirmed
//! samples. Everything here is a pure function of its arguments; callers
//! own persistence of both transactions and profiles.

pub mod learner;
pub mod matcher;
pub mod profile;
pub mod ranker;
pub mod similarity;
pub mod text;

pub use learner::learn_profile;
pub use matcher::{CategorizableTransaction, MatchEngine, MatchResult};
pub use profile::{AmountRange, FilterProfile, ProfileError};
pub use ranker::{CandidateCategory, CategorizationMatch};
