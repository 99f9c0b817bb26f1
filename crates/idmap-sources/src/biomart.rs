//! Built-in local sources from the Ensembl and HGNC BioMart exports.
//!
//! A JSON snapshot is kept next to the TSV (`ensembl.tsv` → `ensembl.json`)
//! and reused on the next start instead of rebuilding the index.

use std::path::{Path, PathBuf};

use idmap_common::{FillValue, Result};
use idmap_lookup::{read_reference_file, ReferenceLayout};
use tracing::info;

use crate::local::LocalSource;

pub const ENSEMBL_SOURCE_ID: &str = "ensembl";
pub const HGNC_SOURCE_ID: &str = "hgnc";

#[derive(Debug, Clone)]
pub struct BiomartOptions {
    /// Integrate alias symbols as extra symbol keys.
    pub symbol_aliases: bool,
    /// Read/write the JSON snapshot next to the TSV.
    pub use_cache: bool,
    pub fill_value: FillValue,
}

impl Default for BiomartOptions {
    fn default() -> Self {
        Self {
            symbol_aliases: true,
            use_cache: true,
            fill_value: FillValue::default(),
        }
    }
}

/// Ensembl BioMart source (`ensg, ensp, entr, hgnc, symb`; aliases from `synonym`).
pub fn ensembl_biomart(data_path: &Path, opts: &BiomartOptions) -> Result<LocalSource> {
    from_reference(ENSEMBL_SOURCE_ID, data_path, &ReferenceLayout::ENSEMBL, opts)
}

/// HGNC BioMart source (`ensg, entr, hgnc, symb`; aliases from `synonym1`, then `synonym2`).
pub fn hgnc_biomart(data_path: &Path, opts: &BiomartOptions) -> Result<LocalSource> {
    from_reference(HGNC_SOURCE_ID, data_path, &ReferenceLayout::HGNC, opts)
}

fn snapshot_path(data_path: &Path) -> PathBuf {
    data_path.with_extension("json")
}

fn from_reference(
    source_id: &str,
    data_path: &Path,
    layout: &ReferenceLayout,
    opts: &BiomartOptions,
) -> Result<LocalSource> {
    let cache_path = snapshot_path(data_path);
    if opts.use_cache && cache_path.exists() {
        info!("{}: loading lookup tables from cache {:?}", source_id, cache_path);
        return LocalSource::load_snapshot(source_id, &cache_path, opts.fill_value.clone());
    }

    let data = read_reference_file(data_path, layout)?;
    let mut source = LocalSource::new(source_id, data.table, opts.fill_value.clone());
    if opts.symbol_aliases {
        for synonyms in &data.synonyms {
            source.integrate_synonyms(synonyms);
        }
    }

    if opts.use_cache {
        source.save_snapshot(&cache_path)?;
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IdSource;
    use idmap_common::{IdQuery, IdType, MultiHits};

    const ENSEMBL_TSV: &str = "ensg\tensp\tentr\thgnc\tsymb\tsynonym\n\
ENSG00000133703\tENSP00000256078\t3845\tHGNC:6407\tKRAS\tKRAS2\n\
ENSG00000133703\tENSP00000308495\t3845\tHGNC:6407\tKRAS\tK-RAS\n\
ENSG00000141510\tENSP00000269305\t7157\tHGNC:11998\tTP53\tP53\n";

    fn write_tsv(dir: &Path) -> PathBuf {
        let path = dir.join("ensembl.tsv");
        std::fs::write(&path, ENSEMBL_TSV).unwrap();
        path
    }

    #[test]
    fn test_ensembl_with_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsv(dir.path());
        let src = ensembl_biomart(&path, &BiomartOptions { use_cache: false, ..Default::default() }).unwrap();

        assert!(src.has_id_in_type(IdType::EnsemblProtein));
        let q: IdQuery = vec!["K-RAS", "P53"].into();
        let out = src.convert(&q, IdType::Symbol, IdType::Entrez, &MultiHits::First, false).unwrap();
        assert_eq!(out.into_many().unwrap(), vec!["3845", "7157"]);

        let proteins = src
            .convert(&"ENSG00000133703".into(), IdType::EnsemblGene, IdType::EnsemblProtein, &MultiHits::All, false)
            .unwrap();
        assert_eq!(proteins.into_single().unwrap(), "ENSP00000256078|ENSP00000308495");
    }

    #[test]
    fn test_aliases_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsv(dir.path());
        let opts = BiomartOptions { symbol_aliases: false, use_cache: false, ..Default::default() };
        let src = ensembl_biomart(&path, &opts).unwrap();
        let out = src.convert(&"P53".into(), IdType::Symbol, IdType::Entrez, &MultiHits::First, false).unwrap();
        assert_eq!(out.into_single().unwrap(), "N/A");
    }

    #[test]
    fn test_cache_written_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tsv(dir.path());
        let first = ensembl_biomart(&path, &BiomartOptions::default()).unwrap();
        assert!(snapshot_path(&path).exists());

        std::fs::remove_file(&path).unwrap();
        let second = ensembl_biomart(&path, &BiomartOptions::default()).unwrap();
        assert_eq!(second.snapshot(), first.snapshot());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = hgnc_biomart(&dir.path().join("hgnc.tsv"), &BiomartOptions::default()).unwrap_err();
        assert!(matches!(err, idmap_common::IdMapError::Io(_)));
    }
}
