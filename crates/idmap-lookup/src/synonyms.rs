//! Alias/synonym integration.
//!
//! Synonyms become extra input keys of the canonical type's maps and resolve
//! to whatever their canonical identifier resolves to. A synonym is only
//! added when it names exactly one canonical identifier, the canonical
//! identifier is already indexed, and the synonym is not a key already.

use std::collections::{HashMap, HashSet};

use idmap_common::IdType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::LookupIndex;

/// `(canonical, synonym)` pairs read from one synonym column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymTable {
    pub canonical: IdType,
    /// Name of the synonym column, e.g. `synonym1`.
    pub label: String,
    pub pairs: Vec<(String, String)>,
}

impl SynonymTable {
    pub fn new(canonical: IdType, label: impl Into<String>) -> Self {
        Self { canonical, label: label.into(), pairs: Vec::new() }
    }

    pub fn push(&mut self, canonical: impl Into<String>, synonym: impl Into<String>) {
        self.pairs.push((canonical.into(), synonym.into()));
    }

    /// Pairs whose synonym points to a single canonical value, in first-seen order.
    pub fn unambiguous(&self) -> Vec<(&str, &str)> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut canonicals_per_synonym: HashMap<&str, usize> = HashMap::new();
        let mut deduped: Vec<(&str, &str)> = Vec::new();

        for (canonical, synonym) in &self.pairs {
            let pair = (canonical.as_str(), synonym.as_str());
            if seen.insert(pair) {
                *canonicals_per_synonym.entry(pair.1).or_default() += 1;
                deduped.push(pair);
            }
        }

        deduped
            .into_iter()
            .filter(|(_, synonym)| canonicals_per_synonym[synonym] == 1)
            .collect()
    }
}

impl LookupIndex {
    /// Add synonym keys to every map indexed from the synonym table's
    /// canonical type. Existing keys are never overwritten.
    /// Returns the number of entries added across all output types.
    pub fn integrate_synonyms(&mut self, synonyms: &SynonymTable) -> usize {
        let candidates = synonyms.unambiguous();
        let Some(per_out) = self.maps_from_mut(synonyms.canonical) else {
            return 0;
        };

        let mut added = 0usize;
        for (id_out, lookup) in per_out.iter_mut() {
            let additions: Vec<(String, String)> = candidates
                .iter()
                .filter(|(_, synonym)| !lookup.contains_key(*synonym))
                .filter_map(|(canonical, synonym)| {
                    lookup.get(*canonical).map(|out| (synonym.to_string(), out.clone()))
                })
                .collect();

            debug!(
                "Synonyms '{}': {} -> {}: {} added",
                synonyms.label,
                synonyms.canonical,
                id_out,
                additions.len()
            );
            added += additions.len();
            lookup.extend(additions);
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::IdTable;

    fn index() -> LookupIndex {
        let t = IdTable::from_rows(
            vec![IdType::Symbol, IdType::Entrez],
            vec![vec!["KRAS", "3845"], vec!["TP53", "7157"], vec!["HRAS", "3265"]],
        ).unwrap();
        LookupIndex::build(&t)
    }

    #[test]
    fn test_synonym_inherits_canonical_output() {
        let mut idx = index();
        let mut syn = SynonymTable::new(IdType::Symbol, "synonym");
        syn.push("KRAS", "KRAS2");
        assert_eq!(idx.integrate_synonyms(&syn), 1);
        assert_eq!(idx.lookup(IdType::Symbol, IdType::Entrez, "KRAS2"), Some("3845"));
    }

    #[test]
    fn test_ambiguous_synonym_dropped() {
        let mut idx = index();
        let mut syn = SynonymTable::new(IdType::Symbol, "synonym");
        syn.push("KRAS", "RAS");
        syn.push("HRAS", "RAS");
        syn.push("KRAS", "RAS");
        idx.integrate_synonyms(&syn);
        assert_eq!(idx.lookup(IdType::Symbol, IdType::Entrez, "RAS"), None);
    }

    #[test]
    fn test_existing_key_not_overwritten() {
        let mut idx = index();
        let mut syn = SynonymTable::new(IdType::Symbol, "synonym");
        syn.push("KRAS", "TP53");
        idx.integrate_synonyms(&syn);
        assert_eq!(idx.lookup(IdType::Symbol, IdType::Entrez, "TP53"), Some("7157"));
    }

    #[test]
    fn test_unknown_canonical_skipped() {
        let mut idx = index();
        let mut syn = SynonymTable::new(IdType::Symbol, "synonym");
        syn.push("NOTAGENE", "ALIAS1");
        assert_eq!(idx.integrate_synonyms(&syn), 0);
        assert_eq!(idx.lookup(IdType::Symbol, IdType::Entrez, "ALIAS1"), None);
    }

    #[test]
    fn test_second_column_does_not_replace_first() {
        let mut idx = index();
        let mut first = SynonymTable::new(IdType::Symbol, "synonym1");
        first.push("KRAS", "C-K-RAS");
        let mut second = SynonymTable::new(IdType::Symbol, "synonym2");
        second.push("TP53", "C-K-RAS");
        second.push("TP53", "P53");
        idx.integrate_synonyms(&first);
        idx.integrate_synonyms(&second);
        assert_eq!(idx.lookup(IdType::Symbol, IdType::Entrez, "C-K-RAS"), Some("3845"));
        assert_eq!(idx.lookup(IdType::Symbol, IdType::Entrez, "P53"), Some("7157"));
    }

    #[test]
    fn test_canonical_type_without_index() {
        let mut idx = index();
        let mut syn = SynonymTable::new(IdType::Hgnc, "prev");
        syn.push("HGNC:6407", "X");
        assert_eq!(idx.integrate_synonyms(&syn), 0);
    }
}
