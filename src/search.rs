//! Fuzzy search over canonical provider names, for filters and autocomplete.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use log::debug;

use crate::alias::AliasTable;

/// Find the canonical provider equal (case-insensitively) to the query.
#[must_use]
pub fn find_exact_provider<'a>(table: &'a AliasTable, query: &str) -> Option<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    table
        .canonical_names()
        .into_iter()
        .find(|name| name.eq_ignore_ascii_case(query))
}

/// Find the best matching canonical providers for a query, ordered by score (best first).
///
/// An exact (case-insensitive) hit always ranks first.
#[must_use]
pub fn search_providers<'a>(table: &'a AliasTable, query: &str, limit: usize) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored_matches: Vec<(&str, i64)> = table
        .canonical_names()
        .into_iter()
        .filter_map(|name| matcher.fuzzy_match(name, query).map(|score| (name, score)))
        .collect();

    scored_matches.sort_by(|(left_name, left_score), (right_name, right_score)| {
        right_score
            .cmp(left_score)
            .then_with(|| left_name.cmp(right_name))
    });
    debug!(
        "Provider search '{query}': {} candidates",
        scored_matches.len()
    );

    if let Some(exact) = find_exact_provider(table, query)
        && let Some(pos) = scored_matches.iter().position(|(name, _)| *name == exact)
    {
        let hit = scored_matches.remove(pos);
        scored_matches.insert(0, hit);
    }

    scored_matches
        .into_iter()
        .take(limit)
        .map(|(name, _)| name)
        .collect()
}
