//! The ordered matching policy.

use std::sync::Arc;

use log::debug;

use crate::{
    alias::AliasStore,
    normalize::normalize,
    types::{CircuitPurpose, MatchReason, MatchResult},
};

use super::{
    overrides::{OverrideRule, SECONDARY_OVERRIDES, find_override},
    similarity::similarity,
};

/// Minimum similarity for the fuzzy fallback to count as a match.
pub const FUZZY_THRESHOLD: f64 = 0.80;

const MAPPED_CONFIDENCE: u8 = 95;
const NORMALIZED_CONFIDENCE: u8 = 90;

/// Compares DSR provider names against ARIN provider names.
///
/// Cheap to clone; clones share the same [`AliasStore`].
#[derive(Debug, Clone)]
pub struct ProviderMatcher {
    aliases: Arc<AliasStore>,
    overrides: Vec<OverrideRule>,
}

impl Default for ProviderMatcher {
    fn default() -> Self {
        Self::new(Arc::new(AliasStore::with_builtin()))
    }
}

impl ProviderMatcher {
    /// Matcher over `aliases` with the built-in secondary override rules.
    #[must_use]
    pub fn new(aliases: Arc<AliasStore>) -> Self {
        Self {
            aliases,
            overrides: SECONDARY_OVERRIDES.to_vec(),
        }
    }

    /// Replace the secondary override rules.
    #[must_use]
    pub fn with_overrides(mut self, rules: &[OverrideRule]) -> Self {
        self.overrides = rules.to_vec();
        self
    }

    #[must_use]
    pub fn aliases(&self) -> &Arc<AliasStore> {
        &self.aliases
    }

    /// Compare two raw provider strings.
    ///
    /// Stages run in order and the first hit wins: missing data, direct,
    /// mapped, normalized, secondary override, fuzzy.
    #[must_use]
    pub fn match_providers(&self, dsr: &str, arin: &str, purpose: CircuitPurpose) -> MatchResult {
        if dsr.is_empty() || arin.is_empty() {
            return MatchResult::missing_data();
        }

        if dsr.trim().to_lowercase() == arin.trim().to_lowercase() {
            return MatchResult::matched(100, MatchReason::DirectMatch);
        }

        let dsr_norm = normalize(dsr);
        let arin_norm = normalize(arin);
        debug!("Provider match: dsr='{dsr_norm}' arin='{arin_norm}' purpose={purpose}");

        let table = self.aliases.snapshot();
        if let Some(canonical) = table.resolve(&dsr_norm)
            && canonical.to_lowercase() == arin_norm
        {
            debug!("Provider match: '{dsr_norm}' maps to '{canonical}'");
            return MatchResult::matched(MAPPED_CONFIDENCE, MatchReason::MappedProvider);
        }

        if dsr_norm == arin_norm {
            return MatchResult::matched(NORMALIZED_CONFIDENCE, MatchReason::NormalizedMatch);
        }

        if purpose == CircuitPurpose::Secondary
            && let Some(rule) = find_override(&self.overrides, &dsr_norm, arin)
        {
            debug!(
                "Provider match: secondary override ('{}' vs '{arin}')",
                rule.dsr_contains
            );
            return MatchResult::matched(rule.confidence, MatchReason::SecondaryOverride);
        }

        let sim = similarity(&dsr_norm, &arin_norm);
        if sim >= FUZZY_THRESHOLD {
            debug!("Provider match: fuzzy hit (sim={sim:.3})");
            return MatchResult::matched(confidence_from(sim), MatchReason::FuzzyMatch);
        }

        debug!("Provider match: no match (sim={sim:.3})");
        MatchResult::no_match()
    }

    /// [`Self::match_providers`] for values that may be absent.
    #[must_use]
    pub fn match_optional(
        &self,
        dsr: Option<&str>,
        arin: Option<&str>,
        purpose: CircuitPurpose,
    ) -> MatchResult {
        match (dsr, arin) {
            (Some(dsr), Some(arin)) => self.match_providers(dsr, arin, purpose),
            _ => MatchResult::missing_data(),
        }
    }

    /// Canonical name for a raw provider, or the trimmed input when the
    /// alias table does not know it.
    #[must_use]
    pub fn canonical_provider(&self, raw: &str) -> String {
        let key = normalize(raw);
        self.aliases
            .snapshot()
            .resolve(&key)
            .map_or_else(|| raw.trim().to_string(), str::to_string)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn confidence_from(sim: f64) -> u8 {
    (sim.clamp(0.0, 1.0) * 100.0).round() as u8
}
