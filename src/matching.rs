//! Provider matching: similarity, override rules and the ordered policy.

mod matcher;
mod overrides;
mod similarity;

pub use matcher::{FUZZY_THRESHOLD, ProviderMatcher};
pub use overrides::{OverrideRule, SECONDARY_OVERRIDES};
pub use similarity::{levenshtein, similarity};
