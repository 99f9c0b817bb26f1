//! idmap-lookup — Per-source lookup tables built from reference identifier tables.
//!
//! - `IdTable`: the rectangular identifier table handed over by a data provider
//! - `LookupIndex`: one input → output map per ordered pair of identifier columns
//! - synonym integration for alias symbols
//! - TSV readers for the Ensembl and HGNC BioMart exports

pub mod table;
pub mod index;
pub mod synonyms;
pub mod selection;
pub mod reference;

pub use table::IdTable;
pub use index::{LookupIndex, LookupMap, build_lookup};
pub use synonyms::SynonymTable;
pub use selection::{Combiner, join_all, representative_for};
pub use reference::{ReferenceData, ReferenceLayout, read_reference, read_reference_file};
