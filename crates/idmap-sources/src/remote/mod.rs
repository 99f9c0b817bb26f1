//! Remote source: identifier lookups delegated to an external service.
//!
//! The service is reached through an injected [`RemoteLookupClient`], so the
//! adapter logic (dedup, realignment, multi-hit joining) is testable offline.

pub mod mygene;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use idmap_common::multi_hits::{join_candidates, split_candidates};
use idmap_common::{FillValue, IdMapError, IdType, Result};
use tracing::debug;

use crate::source::IdSource;

/// Values the service returned for one query string.
/// An empty `values` list means "not found", distinct from an empty string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHit {
    pub query: String,
    pub values: Vec<String>,
}

/// Batch lookup against an external identifier service.
///
/// Implementations may return several hits for one query, hits in any order,
/// or no hit at all for queries they cannot resolve.
pub trait RemoteLookupClient: Send + Sync {
    fn query_many(&self, ids: &[String], scope: &str, field: &str) -> Result<Vec<RemoteHit>>;
}

pub struct RemoteSource {
    source_id: String,
    fill_value: FillValue,
    client: Arc<dyn RemoteLookupClient>,
    id_in_types: Vec<IdType>,
    id_out_types: Vec<IdType>,
    /// Identifier type → the service's field name.
    fields: HashMap<IdType, &'static str>,
}

impl RemoteSource {
    pub fn new(
        source_id: impl Into<String>,
        client: Arc<dyn RemoteLookupClient>,
        id_in_types: Vec<IdType>,
        id_out_types: Vec<IdType>,
        fields: HashMap<IdType, &'static str>,
        fill_value: FillValue,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            fill_value,
            client,
            id_in_types,
            id_out_types,
            fields,
        }
    }

    fn field(&self, id_type: IdType) -> Result<&'static str> {
        self.fields
            .get(&id_type)
            .copied()
            .ok_or_else(|| IdMapError::unsupported(format!("{}: field", self.source_id), id_type))
    }
}

impl IdSource for RemoteSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn fill_value(&self) -> &FillValue {
        &self.fill_value
    }

    fn has_id_in_type(&self, id_type: IdType) -> bool {
        self.id_in_types.contains(&id_type)
    }

    fn has_id_out_type(&self, id_type: IdType) -> bool {
        self.id_out_types.contains(&id_type)
    }

    fn lookup_raw(&self, ids: &[String], id_in: IdType, id_out: IdType) -> Result<Vec<Option<String>>> {
        let scope = self.field(id_in)?;
        let field = self.field(id_out)?;

        let mut seen = HashSet::new();
        let unique: Vec<String> = ids.iter().filter(|id| seen.insert(id.as_str())).cloned().collect();
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self.client.query_many(&unique, scope, field)?;
        debug!(source = %self.source_id, queried = unique.len(), hits = hits.len(), "remote batch");

        // Several hits for one query collapse into one multi-hit value.
        let mut values_per_query: HashMap<String, Vec<String>> = HashMap::new();
        for hit in hits {
            let values = values_per_query.entry(hit.query).or_default();
            for value in &hit.values {
                for candidate in split_candidates(value) {
                    if !values.iter().any(|v| v == candidate) {
                        values.push(candidate.to_string());
                    }
                }
            }
        }

        Ok(ids
            .iter()
            .map(|id| {
                values_per_query
                    .get(id)
                    .filter(|v| !v.is_empty())
                    .map(|v| join_candidates(v))
            })
            .collect())
    }
}

/// In-memory client for tests and offline use.
#[derive(Default)]
pub struct MockLookupClient {
    data: HashMap<(String, String, String), Vec<String>>,
    batches: Mutex<Vec<Vec<String>>>,
}

impl MockLookupClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the values returned for `query` under `scope` → `field`.
    pub fn with(mut self, scope: &str, field: &str, query: &str, values: &[&str]) -> Self {
        self.data.insert(
            (scope.to_string(), field.to_string(), query.to_string()),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Every batch received so far.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl RemoteLookupClient for MockLookupClient {
    fn query_many(&self, ids: &[String], scope: &str, field: &str) -> Result<Vec<RemoteHit>> {
        if let Ok(mut batches) = self.batches.lock() {
            batches.push(ids.to_vec());
        }
        Ok(ids
            .iter()
            .map(|id| RemoteHit {
                query: id.clone(),
                values: self
                    .data
                    .get(&(scope.to_string(), field.to_string(), id.clone()))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect())
    }
}
