//! Gene identifier namespaces understood by every source.
//! Tags are the short column names used in reference tables and configs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdMapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdType {
    #[serde(rename = "ensg")]
    EnsemblGene,
    #[serde(rename = "entr")]
    Entrez,
    #[serde(rename = "symb")]
    Symbol,
    #[serde(rename = "ensp")]
    EnsemblProtein,
    #[serde(rename = "hgnc")]
    Hgnc,
}

impl IdType {
    /// Every identifier type, in canonical column order.
    pub const ALL: [IdType; 5] = [
        IdType::EnsemblGene,
        IdType::Entrez,
        IdType::Symbol,
        IdType::EnsemblProtein,
        IdType::Hgnc,
    ];

    /// Short tag, e.g. `ensg`.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::EnsemblGene    => "ensg",
            IdType::Entrez         => "entr",
            IdType::Symbol         => "symb",
            IdType::EnsemblProtein => "ensp",
            IdType::Hgnc           => "hgnc",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IdType::EnsemblGene    => "Ensembl gene ID",
            IdType::Entrez         => "Entrez gene ID",
            IdType::Symbol         => "Gene symbol",
            IdType::EnsemblProtein => "Ensembl protein ID",
            IdType::Hgnc           => "HGNC ID",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdType {
    type Err = IdMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ensg" => Ok(IdType::EnsemblGene),
            "entr" => Ok(IdType::Entrez),
            "symb" => Ok(IdType::Symbol),
            "ensp" => Ok(IdType::EnsemblProtein),
            "hgnc" => Ok(IdType::Hgnc),
            other  => Err(IdMapError::unsupported("id type", other)),
        }
    }
}
