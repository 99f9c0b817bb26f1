//! idmap-sources — Identifier sources behind one conversion contract.
//!
//! - `LocalSource`: lookup index over a reference table (Ensembl, HGNC BioMart)
//! - `RemoteSource`: batch queries against a lookup service (MyGene.info)

pub mod source;
pub mod local;
pub mod biomart;
pub mod remote;

pub use source::IdSource;
pub use local::{LocalSnapshot, LocalSource};
pub use biomart::{BiomartOptions, ensembl_biomart, hgnc_biomart, ENSEMBL_SOURCE_ID, HGNC_SOURCE_ID};
pub use remote::{MockLookupClient, RemoteHit, RemoteLookupClient, RemoteSource};
pub use remote::mygene::{mygene_source, MyGeneClient, MYGENE_BASE_URL, MYGENE_BATCH_SIZE, MYGENE_SOURCE_ID};
