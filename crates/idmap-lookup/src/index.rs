//! Lookup index construction.
//!
//! For every ordered pair of distinct identifier columns in a table we keep a
//! map from input value to output value. Inputs seen with several distinct
//! outputs are reduced by a [`Combiner`]; the default keeps them all,
//! pipe-joined in first-seen order.

use std::collections::{HashMap, HashSet};

use idmap_common::IdType;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::selection::{join_all, representative_for, Combiner};
use crate::table::IdTable;

/// Input value → (possibly pipe-joined) output value.
pub type LookupMap = HashMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupIndex {
    /// id_in → id_out → map
    maps: HashMap<IdType, HashMap<IdType, LookupMap>>,
}

impl LookupIndex {
    /// Build every pairwise map with the default (join-all) combiner.
    pub fn build(table: &IdTable) -> Self {
        Self::build_with(table, &join_all)
    }

    pub fn build_with(table: &IdTable, combine: &Combiner) -> Self {
        Self::build_per_output(table, |_| combine)
    }

    /// Build with one representative value per ambiguous input, chosen per
    /// output type by [`representative_for`].
    pub fn build_representative(table: &IdTable) -> Self {
        let combiners: HashMap<IdType, Box<Combiner>> = table
            .columns()
            .iter()
            .map(|t| (*t, representative_for(*t)))
            .collect();
        Self::build_per_output(table, |id_out| combiners[&id_out].as_ref())
    }

    fn build_per_output<'c, F>(table: &IdTable, combiner_for: F) -> Self
    where
        F: Fn(IdType) -> &'c Combiner,
    {
        let mut maps: HashMap<IdType, HashMap<IdType, LookupMap>> = HashMap::new();
        for &id_in in table.columns() {
            let per_out = maps.entry(id_in).or_default();
            for &id_out in table.columns() {
                if id_in == id_out {
                    continue;
                }
                per_out.insert(id_out, build_lookup(table, id_in, id_out, combiner_for(id_out)));
            }
        }

        let index = Self { maps };
        info!(
            "Lookup index built: {} rows, {} columns, {} entries",
            table.len(),
            table.columns().len(),
            index.total_entries()
        );
        index
    }

    pub fn get(&self, id_in: IdType, id_out: IdType) -> Option<&LookupMap> {
        self.maps.get(&id_in)?.get(&id_out)
    }

    pub fn lookup(&self, id_in: IdType, id_out: IdType, value: &str) -> Option<&str> {
        self.get(id_in, id_out)?.get(value).map(String::as_str)
    }

    /// Output types indexed from `id_in`.
    pub fn outputs_from(&self, id_in: IdType) -> Vec<IdType> {
        let mut outs: Vec<IdType> = self
            .maps
            .get(&id_in)
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default();
        outs.sort();
        outs
    }

    pub(crate) fn maps_from_mut(&mut self, id_in: IdType) -> Option<&mut HashMap<IdType, LookupMap>> {
        self.maps.get_mut(&id_in)
    }

    /// `(id_in, id_out, entries)` for every map, sorted by type pair.
    pub fn sizes(&self) -> Vec<(IdType, IdType, usize)> {
        let mut sizes: Vec<_> = self
            .maps
            .iter()
            .flat_map(|(id_in, per_out)| {
                per_out.iter().map(move |(id_out, m)| (*id_in, *id_out, m.len()))
            })
            .collect();
        sizes.sort();
        sizes
    }

    pub fn total_entries(&self) -> usize {
        self.maps.values().flat_map(|m| m.values()).map(|m| m.len()).sum()
    }
}

/// Build a single `id_in → id_out` map.
///
/// Rows missing either value are skipped and exact duplicate pairs count once.
/// An input with one distinct output maps straight to it; an input with
/// several goes through `combine` with its outputs in first-seen order.
pub fn build_lookup(table: &IdTable, id_in: IdType, id_out: IdType, combine: &Combiner) -> LookupMap {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();

    for (input, output) in table.pairs(id_in, id_out) {
        if !seen.insert((input, output)) {
            continue;
        }
        match positions.get(input) {
            Some(&pos) => grouped[pos].1.push(output),
            None => {
                positions.insert(input, grouped.len());
                grouped.push((input, vec![output]));
            }
        }
    }

    grouped
        .into_iter()
        .map(|(input, outputs)| {
            let value = if outputs.len() == 1 {
                outputs[0].to_string()
            } else {
                combine(input, &outputs)
            };
            (input.to_string(), value)
        })
        .collect()
}
