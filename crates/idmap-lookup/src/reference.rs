//! Reference table providers.
//!
//! Reads the tab-separated BioMart exports the built-in local sources are
//! built from. Identifier columns go into an [`IdTable`]; synonym columns are
//! paired with the canonical column into [`SynonymTable`]s.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use idmap_common::{IdMapError, IdType, Result};
use tracing::info;

use crate::synonyms::SynonymTable;
use crate::table::{non_empty, IdTable};

/// Column layout of a reference TSV.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceLayout {
    /// Header name → identifier type, in table column order.
    pub id_columns: &'static [(&'static str, IdType)],
    /// Column the synonyms are aliases of.
    pub canonical: IdType,
    pub synonym_columns: &'static [&'static str],
}

impl ReferenceLayout {
    /// Ensembl BioMart export: one synonym per row.
    pub const ENSEMBL: ReferenceLayout = ReferenceLayout {
        id_columns: &[
            ("ensg", IdType::EnsemblGene),
            ("ensp", IdType::EnsemblProtein),
            ("entr", IdType::Entrez),
            ("hgnc", IdType::Hgnc),
            ("symb", IdType::Symbol),
        ],
        canonical: IdType::Symbol,
        synonym_columns: &["synonym"],
    };

    /// HGNC BioMart export: alias symbol and previous symbol columns.
    pub const HGNC: ReferenceLayout = ReferenceLayout {
        id_columns: &[
            ("ensg", IdType::EnsemblGene),
            ("entr", IdType::Entrez),
            ("hgnc", IdType::Hgnc),
            ("symb", IdType::Symbol),
        ],
        canonical: IdType::Symbol,
        synonym_columns: &["synonym1", "synonym2"],
    };
}

/// Identifier table plus one synonym table per synonym column.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub table: IdTable,
    pub synonyms: Vec<SynonymTable>,
}

pub fn read_reference_file(path: &Path, layout: &ReferenceLayout) -> Result<ReferenceData> {
    info!("Reading reference table {:?}", path);
    let file = File::open(path)?;
    read_reference(BufReader::new(file), layout)
}

pub fn read_reference<R: Read>(reader: R, layout: &ReferenceLayout) -> Result<ReferenceData> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let col_idx = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| IdMapError::InvalidConfiguration(format!("reference table is missing column '{}'", name)))
    };

    let id_idx = layout
        .id_columns
        .iter()
        .map(|(name, _)| col_idx(*name))
        .collect::<Result<Vec<_>>>()?;
    let syn_idx = layout
        .synonym_columns
        .iter()
        .map(|name| col_idx(*name))
        .collect::<Result<Vec<_>>>()?;
    let canonical_pos = layout
        .id_columns
        .iter()
        .position(|(_, t)| *t == layout.canonical)
        .ok_or_else(|| IdMapError::InvalidConfiguration(format!(
            "canonical column '{}' is not an identifier column", layout.canonical
        )))?;

    let mut table = IdTable::new(layout.id_columns.iter().map(|(_, t)| *t).collect())?;
    let mut synonyms: Vec<SynonymTable> = layout
        .synonym_columns
        .iter()
        .map(|name| SynonymTable::new(layout.canonical, *name))
        .collect();

    for record in rdr.records() {
        let record = record?;
        let row: Vec<Option<String>> = id_idx
            .iter()
            .map(|&i| record.get(i).and_then(non_empty))
            .collect();

        if let Some(canonical) = &row[canonical_pos] {
            for (syn_table, &i) in synonyms.iter_mut().zip(&syn_idx) {
                if let Some(synonym) = record.get(i).and_then(non_empty) {
                    syn_table.push(canonical.clone(), synonym);
                }
            }
        }
        table.push_row(row)?;
    }

    table.dedup_rows();
    info!(
        "Reference table loaded: {} rows, {} synonym pairs",
        table.len(),
        synonyms.iter().map(|s| s.pairs.len()).sum::<usize>()
    );
    Ok(ReferenceData { table, synonyms })
}
