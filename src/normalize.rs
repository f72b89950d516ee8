//! Provider-name normalization.
//!
//! Turns a raw provider string from either registry into a comparison key.
//! Each pass runs the rules in a fixed order:
//!
//! 1. lower-case and trim
//! 2. vendor record prefix (`eb2-`) and its connection-type suffix
//! 3. organizational prefixes (`dsr`, `agg`, `not dsr`, ...)
//! 4. one service-type suffix
//! 5. punctuation to spaces
//! 6. whitespace collapse
//!
//! Passes repeat until the key stops changing, so the result is a fixed
//! point and normalizing twice is the same as normalizing once.

use std::sync::LazyLock;

use regex::Regex;

/// Marker prepended to provider names imported from vendor records.
const VENDOR_RECORD_PREFIX: &str = "eb2-";

static VENDOR_CONNECTION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(dsl|fiber|cable|kinetic)$").expect("vendor suffix pattern is valid")
});

static ORGANIZATION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(dsr|agg|comcastagg|not\s+dsr|--|-)\s+")
        .expect("organization prefix pattern is valid")
});

static SERVICE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s*(extended\s+cable|workplace|broadband\s+ii|fiber\s+plus|/boi|/embarq|/qwest|cable|dsl|fiber)$",
    )
    .expect("service suffix pattern is valid")
});

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s&/-]").expect("character class pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Canonicalize a raw provider string into a comparison key.
///
/// Never fails; empty input yields an empty key.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_pass(raw);
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// [`normalize`] for values that may be absent.
#[must_use]
pub fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

fn normalize_pass(raw: &str) -> String {
    let mut key = raw.trim().to_lowercase();

    if let Some(rest) = key.strip_prefix(VENDOR_RECORD_PREFIX) {
        key = VENDOR_CONNECTION_SUFFIX.replace(rest, "").into_owned();
    }

    key = ORGANIZATION_PREFIX.replace(&key, "").into_owned();
    key = SERVICE_SUFFIX.replace(&key, "").into_owned();

    let cleaned = DISALLOWED_CHARS.replace_all(&key, " ");
    WHITESPACE_RUN
        .replace_all(&cleaned, " ")
        .trim()
        .to_string()
}
