//! Batch reconciliation of provider pairs from the two registries.

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    matching::ProviderMatcher,
    types::{CircuitPurpose, MatchReason, MatchResult},
};

/// One circuit's provider as recorded by each registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPair {
    #[serde(default)]
    pub dsr: Option<String>,
    #[serde(default)]
    pub arin: Option<String>,
    #[serde(default)]
    pub purpose: CircuitPurpose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledPair {
    #[serde(flatten)]
    pub pair: ProviderPair,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub missing_data: usize,
    pub results: Vec<ReconciledPair>,
}

/// Match every pair and tally the outcomes.
#[must_use]
pub fn reconcile(matcher: &ProviderMatcher, pairs: Vec<ProviderPair>) -> ReconcileReport {
    let mut report = ReconcileReport {
        total: pairs.len(),
        ..ReconcileReport::default()
    };

    for pair in pairs {
        let result =
            matcher.match_optional(pair.dsr.as_deref(), pair.arin.as_deref(), pair.purpose);
        if result.matched {
            report.matched += 1;
        } else if result.reason == MatchReason::MissingData {
            report.missing_data += 1;
        } else {
            report.unmatched += 1;
        }
        report.results.push(ReconciledPair { pair, result });
    }

    info!(
        "Reconciled {} provider pairs: {} matched, {} unmatched, {} missing data",
        report.total, report.matched, report.unmatched, report.missing_data
    );
    report
}
