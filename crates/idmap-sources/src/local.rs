//! Local source: a lookup index over an in-memory reference table.
//!
//! The index is built once at construction (or restored from a snapshot)
//! and is read-only afterwards, apart from synonym integration during setup.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use idmap_common::{FillValue, IdType, Result};
use idmap_lookup::{Combiner, IdTable, LookupIndex, SynonymTable};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::source::IdSource;

#[derive(Debug, Clone)]
pub struct LocalSource {
    source_id: String,
    fill_value: FillValue,
    table: IdTable,
    index: LookupIndex,
}

/// Serializable `(table, lookup)` pair for restoring a source without rebuilding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSnapshot {
    pub table: IdTable,
    pub lookup: LookupIndex,
}

impl LocalSource {
    /// Build the lookup index for every column pair of `table`.
    pub fn new(source_id: impl Into<String>, table: IdTable, fill_value: FillValue) -> Self {
        let index = LookupIndex::build(&table);
        Self { source_id: source_id.into(), fill_value, table, index }
    }

    /// Like [`LocalSource::new`], reducing ambiguous inputs with `combine`.
    pub fn with_combiner(
        source_id: impl Into<String>,
        table: IdTable,
        fill_value: FillValue,
        combine: &Combiner,
    ) -> Self {
        let index = LookupIndex::build_with(&table, combine);
        Self { source_id: source_id.into(), fill_value, table, index }
    }

    pub fn from_snapshot(source_id: impl Into<String>, snapshot: LocalSnapshot, fill_value: FillValue) -> Self {
        Self {
            source_id: source_id.into(),
            fill_value,
            table: snapshot.table,
            index: snapshot.lookup,
        }
    }

    /// Add alias keys for the synonym table's canonical type.
    pub fn integrate_synonyms(&mut self, synonyms: &SynonymTable) -> usize {
        let added = self.index.integrate_synonyms(synonyms);
        info!("{}: integrated {} '{}' synonym entries", self.source_id, added, synonyms.label);
        added
    }

    pub fn table(&self) -> &IdTable {
        &self.table
    }

    pub fn index(&self) -> &LookupIndex {
        &self.index
    }

    /// Entry count per `(id_in, id_out)` map.
    pub fn lookup_sizes(&self) -> Vec<(IdType, IdType, usize)> {
        self.index.sizes()
    }

    pub fn snapshot(&self) -> LocalSnapshot {
        LocalSnapshot { table: self.table.clone(), lookup: self.index.clone() }
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &self.snapshot())?;
        info!("{}: snapshot written to {:?}", self.source_id, path);
        Ok(())
    }

    pub fn load_snapshot(source_id: impl Into<String>, path: &Path, fill_value: FillValue) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let snapshot: LocalSnapshot = serde_json::from_reader(reader)?;
        let source = Self::from_snapshot(source_id, snapshot, fill_value);
        info!(
            "{}: restored from {:?} ({} lookup entries)",
            source.source_id,
            path,
            source.index.total_entries()
        );
        Ok(source)
    }
}

impl IdSource for LocalSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn fill_value(&self) -> &FillValue {
        &self.fill_value
    }

    fn has_id_in_type(&self, id_type: IdType) -> bool {
        self.table.has_column(id_type)
    }

    fn has_id_out_type(&self, id_type: IdType) -> bool {
        self.table.has_column(id_type)
    }

    fn lookup_raw(&self, ids: &[String], id_in: IdType, id_out: IdType) -> Result<Vec<Option<String>>> {
        let map = self.index.get(id_in, id_out);
        Ok(ids
            .iter()
            .map(|id| map.and_then(|m| m.get(id)).cloned())
            .collect())
    }
}
