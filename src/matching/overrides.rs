//! Secondary-circuit override rules.
//!
//! Known data-entry conflicts between the DSR and ARIN registries where the
//! DSR record is trusted for secondary circuits.

/// One override: the normalized DSR value contains `dsr_contains` and the
/// raw ARIN value is exactly one of `arin_candidates`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideRule {
    pub dsr_contains: &'static str,
    pub arin_candidates: &'static [&'static str],
    pub confidence: u8,
}

impl OverrideRule {
    /// Returns true when this rule applies to the pair.
    #[must_use]
    pub fn applies(&self, dsr_normalized: &str, arin_raw: &str) -> bool {
        dsr_normalized.contains(self.dsr_contains)
            && self
                .arin_candidates
                .iter()
                .any(|candidate| *candidate == arin_raw)
    }
}

/// Rules in evaluation order; first hit wins.
pub const SECONDARY_OVERRIDES: &[OverrideRule] = &[
    OverrideRule {
        dsr_contains: "comcast",
        arin_candidates: &["AT&T"],
        confidence: 70,
    },
    OverrideRule {
        dsr_contains: "cox",
        arin_candidates: &["AT&T", "Verizon"],
        confidence: 70,
    },
    OverrideRule {
        dsr_contains: "spectrum",
        arin_candidates: &["AT&T"],
        confidence: 70,
    },
];

/// Returns the first rule in `rules` that applies to the pair.
#[must_use]
pub fn find_override<'a>(
    rules: &'a [OverrideRule],
    dsr_normalized: &str,
    arin_raw: &str,
) -> Option<&'a OverrideRule> {
    rules
        .iter()
        .find(|rule| rule.applies(dsr_normalized, arin_raw))
}
