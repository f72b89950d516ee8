//! Rebrand/alias table and the shared store that swaps merged tables in.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, PoisonError, RwLock},
};

use log::{debug, info};

/// Built-in mapping from normalized provider key to canonical provider name.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // Rebrands
    ("brightspeed", "centurylink"),
    ("sparklight", "cable one"),
    ("cincinnati bell", "altafiber"),
    ("lumen", "centurylink"),
    // Business divisions
    ("comcast workplace", "comcast"),
    ("comcast workplace cable", "comcast"),
    ("cox business/boi", "cox communications"),
    ("cox business boi", "cox communications"),
    ("cox business", "cox communications"),
    ("at&t broadband ii", "at&t"),
    ("at&t abf", "at&t"),
    ("at&t adi", "at&t"),
    ("verizon business", "verizon"),
    // Brand names
    ("spectrum", "charter communications"),
    ("charter", "charter communications"),
    ("altice west", "optimum"),
    ("lightpath", "optimum"),
    // Aliases
    ("transworld", "fairnet llc"),
    ("mediacom/boi", "mediacom"),
    ("centurylink/embarq", "centurylink"),
    ("centurylink/qwest", "centurylink"),
    ("verizon cell", "verizon"),
    ("cell", "verizon"),
    ("vzw cell", "verizon"),
    // Service suffixes
    ("centurylink fiber plus", "centurylink"),
    ("agg comcast", "comcast"),
    ("comcastagg comcast", "comcast"),
    ("wyyerd fiber", "wyyerd group llc"),
];

/// Immutable map of normalized provider keys to canonical names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// The table shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_ALIASES.iter().copied().collect()
    }

    /// Exact-key lookup.
    #[must_use]
    pub fn resolve(&self, normalized_key: &str) -> Option<&str> {
        self.entries.get(normalized_key).map(String::as_str)
    }

    /// Returns a new table with `extra` layered on top; colliding keys take
    /// the value from `extra`. Keys are trimmed and lower-cased, and blank
    /// keys or values are skipped.
    #[must_use]
    pub fn merged<I, K, V>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = self.entries.clone();
        for (key, value) in extra {
            let key = key.as_ref().trim().to_lowercase();
            let value = value.as_ref().trim();
            if key.is_empty() || value.is_empty() {
                debug!("Skipping blank alias entry ({key:?} -> {value:?})");
                continue;
            }
            entries.insert(key, value.to_string());
        }
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct canonical names, sorted.
    #[must_use]
    pub fn canonical_names(&self) -> Vec<&str> {
        self.entries
            .values()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for AliasTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AliasTable::default().merged(iter)
    }
}

/// Process-wide holder for the current [`AliasTable`].
///
/// Readers take a snapshot `Arc`; merges build a complete new table and
/// swap it in, so a reader sees either the old or the new table in full.
#[derive(Debug)]
pub struct AliasStore {
    current: RwLock<Arc<AliasTable>>,
}

impl AliasStore {
    #[must_use]
    pub fn new(table: AliasTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    #[must_use]
    pub fn with_builtin() -> Self {
        Self::new(AliasTable::builtin())
    }

    /// The table as of now.
    #[must_use]
    pub fn snapshot(&self) -> Arc<AliasTable> {
        // Writers never panic mid-swap, so a poisoned lock still holds a whole table.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Merge an external mapping into the live table.
    ///
    /// Adds or overwrites entries and never removes any. Returns the size
    /// of the resulting table.
    pub fn merge_external(&self, extra: &HashMap<String, String>) -> usize {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let merged = current.merged(extra);
        let len = merged.len();
        *current = Arc::new(merged);
        info!(
            "Merged {} external provider mappings ({} total)",
            extra.len(),
            len
        );
        len
    }
}

impl Default for AliasStore {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_rebrands() {
        let table = AliasTable::builtin();
        assert_eq!(table.resolve("brightspeed"), Some("centurylink"));
        assert_eq!(table.resolve("spectrum"), Some("charter communications"));
        assert_eq!(table.resolve("transworld"), Some("fairnet llc"));
    }

    #[test]
    fn resolve_is_exact_key_only() {
        let table = AliasTable::builtin();
        assert_eq!(table.resolve("brightspeed inc"), None);
        assert_eq!(table.resolve("Brightspeed"), None);
        assert_eq!(table.resolve("bright"), None);
    }

    #[test]
    fn merged_overwrites_and_keeps_existing() {
        let base = AliasTable::builtin();
        let merged = base.merged([
            ("lumen", "lumen technologies"),
            ("  Wyyerd  ", "wyyerd group llc"),
        ]);

        assert_eq!(merged.resolve("lumen"), Some("lumen technologies"));
        assert_eq!(merged.resolve("wyyerd"), Some("wyyerd group llc"));
        assert_eq!(merged.resolve("brightspeed"), Some("centurylink"));
        assert_eq!(merged.len(), base.len() + 1);
        assert_eq!(base.resolve("lumen"), Some("centurylink"));
    }

    #[test]
    fn merged_skips_blank_entries() {
        let merged = AliasTable::default().merged([("", "x"), ("y", "  ")]);
        assert!(merged.is_empty());
    }

    #[test]
    fn canonical_names_are_distinct_and_sorted() {
        let table: AliasTable = [("a", "verizon"), ("b", "comcast"), ("c", "verizon")]
            .into_iter()
            .collect();
        assert_eq!(table.canonical_names(), vec!["comcast", "verizon"]);
    }

    #[test]
    fn store_merge_swaps_table_and_old_snapshots_are_unchanged() {
        let store = AliasStore::with_builtin();
        let before = store.snapshot();

        let extra = HashMap::from([("granite".to_string(), "granite telecom".to_string())]);
        let len = store.merge_external(&extra);

        let after = store.snapshot();
        assert_eq!(len, before.len() + 1);
        assert_eq!(after.resolve("granite"), Some("granite telecom"));
        assert_eq!(before.resolve("granite"), None);
    }

    #[test]
    fn store_merge_is_repeatable() {
        let store = AliasStore::new(AliasTable::default());
        let extra = HashMap::from([("granite".to_string(), "granite telecom".to_string())]);
        store.merge_external(&extra);
        store.merge_external(&extra);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn concurrent_readers_see_whole_tables() {
        let store = Arc::new(AliasStore::new(AliasTable::default()));
        let extra: HashMap<String, String> = (0..200)
            .map(|i| (format!("provider {i}"), "canonical".to_string()))
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let len = store.snapshot().len();
                        assert!(len == 0 || len == 200, "observed partial table of {len}");
                    }
                })
            })
            .collect();

        store.merge_external(&extra);

        for reader in readers {
            assert!(reader.join().is_ok());
        }
        assert_eq!(store.snapshot().len(), 200);
    }
}
