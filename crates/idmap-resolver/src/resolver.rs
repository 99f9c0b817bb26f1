//! Multi-source resolver.
//!
//! Sources are kept in priority order. A conversion queries every source
//! that supports the requested types, then merges the per-source columns:
//!
//! - fallback (every mode except `consensus`): take the highest-priority
//!   source's value and fill its gaps from the next source, and so on;
//! - consensus: vote over all candidates from all sources, see
//!   [`consensus_elem`].

use std::collections::HashSet;
use std::sync::Arc;

use idmap_common::multi_hits::split_candidates;
use idmap_common::{Conversion, FillValue, IdMapError, IdQuery, IdType, MultiHits, Result};
use idmap_sources::IdSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consensus::{consensus_elem, no_intersection};

pub struct IdResolver {
    sources: Vec<Arc<dyn IdSource>>,
    fill_value: FillValue,
}

/// One eligible source's values in a [`ResolutionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceColumn {
    pub source_id: String,
    pub values: Vec<String>,
    /// 0 when unresolved, else the number of candidates.
    pub hits: Vec<usize>,
}

impl SourceColumn {
    /// Column name used for `hits` in tabular output.
    pub fn hits_label(&self) -> String {
        format!("{}_hits", self.source_id)
    }
}

/// Per-input diagnostics of a resolver conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub inputs: Vec<String>,
    /// Eligible sources, in priority order.
    pub sources: Vec<SourceColumn>,
    pub output: Vec<String>,
    /// Sources disagree on this input.
    pub mismatch: Vec<bool>,
    /// Configured sources that do not support the requested types.
    pub skipped_sources: Vec<String>,
}

impl ResolutionReport {
    pub fn column(&self, source_id: &str) -> Option<&SourceColumn> {
        self.sources.iter().find(|c| c.source_id == source_id)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl IdResolver {
    /// `fill_value: None` inherits the first source's fill value.
    pub fn new(sources: Vec<Arc<dyn IdSource>>, fill_value: Option<FillValue>) -> Result<Self> {
        let first = sources.first().ok_or_else(|| {
            IdMapError::InvalidConfiguration("a resolver needs at least one source".to_string())
        })?;
        let fill_value = fill_value.unwrap_or_else(|| first.fill_value().clone());
        Ok(Self { sources, fill_value })
    }

    pub fn sources(&self) -> &[Arc<dyn IdSource>] {
        &self.sources
    }

    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.source_id()).collect()
    }

    pub fn get_source(&self, source_id: &str) -> Option<&Arc<dyn IdSource>> {
        self.sources.iter().find(|s| s.source_id() == source_id)
    }

    pub fn fill_value(&self) -> &FillValue {
        &self.fill_value
    }

    /// Sources supporting `id_in → id_out` in priority order, plus the ids of those skipped.
    pub fn eligible_sources(&self, id_in: IdType, id_out: IdType) -> (Vec<&Arc<dyn IdSource>>, Vec<String>) {
        let (eligible, skipped): (Vec<_>, Vec<_>) = self
            .sources
            .iter()
            .partition(|s| s.has_id_in_type(id_in) && s.has_id_out_type(id_out));
        let skipped = skipped.into_iter().map(|s| s.source_id().to_string()).collect();
        (eligible, skipped)
    }

    pub fn convert(
        &self,
        ids: impl Into<IdQuery>,
        id_in: IdType,
        id_out: IdType,
        multi_hits: &MultiHits,
        as_table: bool,
    ) -> Result<Conversion<ResolutionReport>> {
        let query = ids.into();
        let ids = query.to_list();

        let (eligible, skipped) = self.eligible_sources(id_in, id_out);
        if eligible.is_empty() {
            return Err(IdMapError::unsupported(
                "no configured source supports",
                format!("{} -> {}", id_in, id_out),
            ));
        }
        if !skipped.is_empty() {
            warn!("Sources skipped for {} -> {}: {}", id_in, id_out, skipped.join(", "));
        }

        let per_source = multi_hits.per_source();
        let columns = eligible
            .iter()
            .map(|s| s.resolve(&ids, id_in, id_out, &per_source))
            .collect::<Result<Vec<_>>>()?;
        for (src, column) in eligible.iter().zip(&columns) {
            if column.len() != ids.len() {
                return Err(IdMapError::MalformedResponse(format!(
                    "{}: {} values for {} identifiers",
                    src.source_id(),
                    column.len(),
                    ids.len()
                )));
            }
        }

        let merged = if multi_hits.is_consensus() {
            consensus_merge(&columns, ids.len())
        } else {
            fallback_merge(&columns, ids.len())
        };
        debug!(
            mode = multi_hits.name(),
            sources = eligible.len(),
            requested = ids.len(),
            resolved = merged.iter().filter(|v| v.is_some()).count(),
            "resolver convert"
        );
        let output = self.fill_value.fill_all(&ids, merged);

        if !as_table {
            return Ok(query.shape(output));
        }

        let mismatch = (0..ids.len())
            .map(|pos| sources_disagree(&columns, pos, multi_hits))
            .collect();
        let sources = eligible
            .iter()
            .zip(columns)
            .map(|(src, column)| SourceColumn {
                source_id: src.source_id().to_string(),
                hits: column.iter().map(|v| hit_count(v.as_deref())).collect(),
                values: self.fill_value.fill_all(&ids, column),
            })
            .collect();

        Ok(Conversion::Table(ResolutionReport {
            inputs: ids,
            sources,
            output,
            mismatch,
            skipped_sources: skipped,
        }))
    }

    // ── Shorthands ────────────────────────────────────────────────────────────

    pub fn entr2ensg(&self, ids: impl Into<IdQuery>, multi_hits: &MultiHits, as_table: bool) -> Result<Conversion<ResolutionReport>> {
        self.convert(ids, IdType::Entrez, IdType::EnsemblGene, multi_hits, as_table)
    }

    pub fn entr2symb(&self, ids: impl Into<IdQuery>, multi_hits: &MultiHits, as_table: bool) -> Result<Conversion<ResolutionReport>> {
        self.convert(ids, IdType::Entrez, IdType::Symbol, multi_hits, as_table)
    }

    pub fn ensg2entr(&self, ids: impl Into<IdQuery>, multi_hits: &MultiHits, as_table: bool) -> Result<Conversion<ResolutionReport>> {
        self.convert(ids, IdType::EnsemblGene, IdType::Entrez, multi_hits, as_table)
    }

    pub fn ensg2symb(&self, ids: impl Into<IdQuery>, multi_hits: &MultiHits, as_table: bool) -> Result<Conversion<ResolutionReport>> {
        self.convert(ids, IdType::EnsemblGene, IdType::Symbol, multi_hits, as_table)
    }

    pub fn symb2entr(&self, ids: impl Into<IdQuery>, multi_hits: &MultiHits, as_table: bool) -> Result<Conversion<ResolutionReport>> {
        self.convert(ids, IdType::Symbol, IdType::Entrez, multi_hits, as_table)
    }

    pub fn symb2ensg(&self, ids: impl Into<IdQuery>, multi_hits: &MultiHits, as_table: bool) -> Result<Conversion<ResolutionReport>> {
        self.convert(ids, IdType::Symbol, IdType::EnsemblGene, multi_hits, as_table)
    }
}

/// Highest-priority value per position; gaps filled from lower priorities.
fn fallback_merge(columns: &[Vec<Option<String>>], len: usize) -> Vec<Option<String>> {
    let mut merged: Vec<Option<String>> = match columns.first() {
        Some(first) => first.clone(),
        None => return vec![None; len],
    };
    for column in &columns[1..] {
        if merged.iter().all(Option::is_some) {
            break;
        }
        for (slot, value) in merged.iter_mut().zip(column) {
            if slot.is_none() {
                slot.clone_from(value);
            }
        }
    }
    merged
}

fn consensus_merge(columns: &[Vec<Option<String>>], len: usize) -> Vec<Option<String>> {
    (0..len)
        .map(|pos| consensus_elem(&candidates_at(columns, pos)))
        .collect()
}

/// Candidate lists of the sources that resolved position `pos`, in priority order.
fn candidates_at(columns: &[Vec<Option<String>>], pos: usize) -> Vec<Vec<&str>> {
    columns
        .iter()
        .filter_map(|c| c[pos].as_deref())
        .map(split_candidates)
        .collect()
}

fn sources_disagree(columns: &[Vec<Option<String>>], pos: usize, multi_hits: &MultiHits) -> bool {
    if multi_hits.compares_candidate_sets() {
        return no_intersection(&candidates_at(columns, pos));
    }
    let distinct: HashSet<&str> = columns.iter().filter_map(|c| c[pos].as_deref()).collect();
    distinct.len() > 1
}

fn hit_count(value: Option<&str>) -> usize {
    value.map_or(0, |v| split_candidates(v).len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(String::from)).collect()
    }

    #[test]
    fn test_fallback_fills_gaps_in_priority_order() {
        let columns = vec![
            col(&[Some("A1"), None, None]),
            col(&[Some("B1"), Some("B2"), None]),
            col(&[None, Some("C2"), Some("C3")]),
        ];
        assert_eq!(
            fallback_merge(&columns, 3),
            col(&[Some("A1"), Some("B2"), Some("C3")])
        );
    }

    #[test]
    fn test_consensus_merge_per_position() {
        let columns = vec![
            col(&[Some("G1"), None]),
            col(&[Some("G1"), None]),
            col(&[Some("G2"), None]),
        ];
        assert_eq!(consensus_merge(&columns, 2), col(&[Some("G1"), None]));
    }

    #[test]
    fn test_disagreement_modes() {
        let columns = vec![col(&[Some("A|B")]), col(&[Some("B")])];
        assert!(!sources_disagree(&columns, 0, &MultiHits::Consensus));
        assert!(sources_disagree(&columns, 0, &MultiHits::First));

        let columns = vec![col(&[Some("A")]), col(&[None])];
        assert!(!sources_disagree(&columns, 0, &MultiHits::First));
        assert!(!sources_disagree(&columns, 0, &MultiHits::All));
    }

    #[test]
    fn test_hit_count() {
        assert_eq!(hit_count(None), 0);
        assert_eq!(hit_count(Some("X")), 1);
        assert_eq!(hit_count(Some("X|Y|Z")), 3);
    }
}
