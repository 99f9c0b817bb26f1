//! Named built-in source configurations.
//!
//! | keyword           | sources (priority order)  |
//! |-------------------|---------------------------|
//! | `all`             | ensembl, hgnc, mygene     |
//! | `local`           | ensembl, hgnc             |
//! | `remote`          | mygene                    |
//! | `ensembl_biomart` | ensembl                   |
//! | `hgnc_biomart`    | hgnc                      |
//! | `mygene`          | mygene                    |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use idmap_common::{IdMapError, IdType, Result};
use idmap_sources::{
    ensembl_biomart, hgnc_biomart, mygene_source, BiomartOptions, IdSource, MyGeneClient,
    RemoteLookupClient, ENSEMBL_SOURCE_ID, HGNC_SOURCE_ID, MYGENE_SOURCE_ID,
};
use idmap_sources::remote::mygene::{MYGENE_ID_IN, MYGENE_ID_OUT};
use tracing::info;

use crate::config::ResolverConfig;
use crate::resolver::IdResolver;

const ENSEMBL_TYPES: [IdType; 5] = [
    IdType::EnsemblGene,
    IdType::EnsemblProtein,
    IdType::Entrez,
    IdType::Hgnc,
    IdType::Symbol,
];
const HGNC_TYPES: [IdType; 4] = [IdType::EnsemblGene, IdType::Entrez, IdType::Hgnc, IdType::Symbol];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinSource {
    Ensembl,
    Hgnc,
    MyGene,
}

impl BuiltinSource {
    pub fn source_id(&self) -> &'static str {
        match self {
            BuiltinSource::Ensembl => ENSEMBL_SOURCE_ID,
            BuiltinSource::Hgnc    => HGNC_SOURCE_ID,
            BuiltinSource::MyGene  => MYGENE_SOURCE_ID,
        }
    }

    /// Published input capabilities.
    pub fn id_in_types(&self) -> &'static [IdType] {
        match self {
            BuiltinSource::Ensembl => &ENSEMBL_TYPES,
            BuiltinSource::Hgnc    => &HGNC_TYPES,
            BuiltinSource::MyGene  => &MYGENE_ID_IN,
        }
    }

    /// Published output capabilities.
    pub fn id_out_types(&self) -> &'static [IdType] {
        match self {
            BuiltinSource::Ensembl => &ENSEMBL_TYPES,
            BuiltinSource::Hgnc    => &HGNC_TYPES,
            BuiltinSource::MyGene  => &MYGENE_ID_OUT,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, BuiltinSource::MyGene)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceSelection {
    All,
    Local,
    Remote,
    EnsemblBiomart,
    HgncBiomart,
    MyGene,
}

impl SourceSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSelection::All            => "all",
            SourceSelection::Local          => "local",
            SourceSelection::Remote         => "remote",
            SourceSelection::EnsemblBiomart => "ensembl_biomart",
            SourceSelection::HgncBiomart    => "hgnc_biomart",
            SourceSelection::MyGene         => "mygene",
        }
    }

    /// Sources in priority order.
    pub fn builtins(&self) -> &'static [BuiltinSource] {
        use BuiltinSource::*;
        match self {
            SourceSelection::All            => &[Ensembl, Hgnc, MyGene],
            SourceSelection::Local          => &[Ensembl, Hgnc],
            SourceSelection::Remote         => &[MyGene],
            SourceSelection::EnsemblBiomart => &[Ensembl],
            SourceSelection::HgncBiomart    => &[Hgnc],
            SourceSelection::MyGene         => &[MyGene],
        }
    }
}

impl fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceSelection {
    type Err = IdMapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all"             => Ok(SourceSelection::All),
            "local"           => Ok(SourceSelection::Local),
            "remote"          => Ok(SourceSelection::Remote),
            "ensembl_biomart" => Ok(SourceSelection::EnsemblBiomart),
            "hgnc_biomart"    => Ok(SourceSelection::HgncBiomart),
            "mygene"          => Ok(SourceSelection::MyGene),
            other => Err(IdMapError::InvalidConfiguration(format!(
                "source specified ({}) is invalid", other
            ))),
        }
    }
}

/// Construct the sources of `selection`, in priority order.
///
/// `client` replaces the HTTP client of the remote source; `None` builds a
/// [`MyGeneClient`] from `config.remote`.
pub fn build_sources(
    selection: SourceSelection,
    config: &ResolverConfig,
    client: Option<Arc<dyn RemoteLookupClient>>,
) -> Result<Vec<Arc<dyn IdSource>>> {
    let fill_value = config.fill_value().unwrap_or_default();
    let opts = BiomartOptions {
        symbol_aliases: config.local.symbol_aliases,
        use_cache: config.local.use_cache,
        fill_value: fill_value.clone(),
    };

    let mut sources: Vec<Arc<dyn IdSource>> = Vec::new();
    for builtin in selection.builtins() {
        let source: Arc<dyn IdSource> = match builtin {
            BuiltinSource::Ensembl => Arc::new(ensembl_biomart(&config.ensembl_path(), &opts)?),
            BuiltinSource::Hgnc    => Arc::new(hgnc_biomart(&config.hgnc_path(), &opts)?),
            BuiltinSource::MyGene  => {
                let client: Arc<dyn RemoteLookupClient> = match &client {
                    Some(c) => c.clone(),
                    None => Arc::new(MyGeneClient::new(
                        &config.remote.base_url,
                        &config.remote.species,
                        config.remote.timeout(),
                    )?),
                };
                Arc::new(mygene_source(client, fill_value.clone()))
            }
        };
        sources.push(source);
    }
    Ok(sources)
}

/// Resolver over the sources named by `config.sources`.
pub fn build_resolver(
    config: &ResolverConfig,
    client: Option<Arc<dyn RemoteLookupClient>>,
) -> Result<IdResolver> {
    let selection = config.selection()?;
    let sources = build_sources(selection, config, client)?;
    info!(
        "Resolver ready ({}): {}",
        selection,
        sources.iter().map(|s| s.source_id()).collect::<Vec<_>>().join(", ")
    );
    IdResolver::new(sources, config.fill_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        for sel in [
            SourceSelection::All,
            SourceSelection::Local,
            SourceSelection::Remote,
            SourceSelection::EnsemblBiomart,
            SourceSelection::HgncBiomart,
            SourceSelection::MyGene,
        ] {
            assert_eq!(sel.as_str().parse::<SourceSelection>().unwrap(), sel);
        }
        assert!(matches!(
            "ncbi".parse::<SourceSelection>(),
            Err(IdMapError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            SourceSelection::All.builtins(),
            &[BuiltinSource::Ensembl, BuiltinSource::Hgnc, BuiltinSource::MyGene]
        );
        assert_eq!(SourceSelection::Remote.builtins(), &[BuiltinSource::MyGene]);
    }

    #[test]
    fn test_published_capabilities() {
        assert!(BuiltinSource::Ensembl.id_in_types().contains(&IdType::EnsemblProtein));
        assert!(!BuiltinSource::Hgnc.id_out_types().contains(&IdType::EnsemblProtein));
        assert!(!BuiltinSource::MyGene.id_in_types().contains(&IdType::Symbol));
        assert!(BuiltinSource::MyGene.id_out_types().contains(&IdType::Symbol));
        assert!(BuiltinSource::MyGene.is_remote());
    }
}
