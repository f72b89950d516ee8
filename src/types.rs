//! Common types shared by the matcher, the CLI and batch reconciliation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of the circuit a provider pair belongs to.
///
/// Secondary circuits allow the override rules in [`crate::matching`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum CircuitPurpose {
    #[default]
    Primary,
    Secondary,
}

/// Which stage of the matching policy produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MatchReason {
    #[strum(serialize = "Direct match")]
    DirectMatch,
    #[strum(serialize = "Mapped provider")]
    MappedProvider,
    #[strum(serialize = "Normalized match")]
    NormalizedMatch,
    #[strum(serialize = "Secondary circuit (trust DSR)")]
    SecondaryOverride,
    #[strum(serialize = "Fuzzy match")]
    FuzzyMatch,
    #[strum(serialize = "No match found")]
    NoMatch,
    #[strum(serialize = "Missing provider data")]
    MissingData,
}

/// Verdict of comparing a DSR provider against an ARIN provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    /// 0–100; strength of the verdict, not a probability.
    pub confidence: u8,
    pub reason: MatchReason,
}

impl MatchResult {
    #[must_use]
    pub const fn matched(confidence: u8, reason: MatchReason) -> Self {
        Self {
            matched: true,
            confidence,
            reason,
        }
    }

    #[must_use]
    pub const fn missing_data() -> Self {
        Self {
            matched: false,
            confidence: 0,
            reason: MatchReason::MissingData,
        }
    }

    #[must_use]
    pub const fn no_match() -> Self {
        Self {
            matched: false,
            confidence: 0,
            reason: MatchReason::NoMatch,
        }
    }
}
