//! MyGene.info batch query client.
//!
//! Endpoint: POST {base_url}/query with `q` (comma-separated ids), `scopes`,
//! `fields` and `species`. The response is a JSON array with one object per
//! hit; unresolved queries come back as `{"query": "...", "notfound": true}`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use idmap_common::{FillValue, IdMapError, IdType, Result};
use serde_json::Value;
use tracing::{debug, info};

use super::{RemoteHit, RemoteLookupClient, RemoteSource};

pub const MYGENE_SOURCE_ID: &str = "mygene";
pub const MYGENE_BASE_URL: &str = "https://mygene.info/v3";
/// Most terms MyGene accepts in one POST /query.
pub const MYGENE_BATCH_SIZE: usize = 1000;

/// Input types MyGene lookups are scoped on.
pub const MYGENE_ID_IN: [IdType; 2] = [IdType::Entrez, IdType::EnsemblGene];
/// Output types MyGene lookups can return.
pub const MYGENE_ID_OUT: [IdType; 3] = [IdType::Entrez, IdType::EnsemblGene, IdType::Symbol];

/// MyGene field name for each identifier type.
pub fn mygene_field(id_type: IdType) -> &'static str {
    match id_type {
        IdType::Entrez         => "entrezgene",
        IdType::Symbol         => "symbol",
        IdType::EnsemblGene    => "ensembl.gene",
        IdType::EnsemblProtein => "ensembl.protein",
        IdType::Hgnc           => "HGNC",
    }
}

/// The built-in remote source on top of `client`.
pub fn mygene_source(client: Arc<dyn RemoteLookupClient>, fill_value: FillValue) -> RemoteSource {
    let fields: HashMap<IdType, &'static str> = IdType::ALL.iter().map(|t| (*t, mygene_field(*t))).collect();
    RemoteSource::new(
        MYGENE_SOURCE_ID,
        client,
        MYGENE_ID_IN.to_vec(),
        MYGENE_ID_OUT.to_vec(),
        fields,
        fill_value,
    )
}

pub struct MyGeneClient {
    client: reqwest::blocking::Client,
    base_url: String,
    species: String,
}

impl MyGeneClient {
    pub fn new(base_url: &str, species: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        info!("MyGene client ready: {} (species: {})", base_url, species);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            species: species.to_string(),
        })
    }

    /// One POST /query for at most [`MYGENE_BATCH_SIZE`] ids.
    fn query_batch(&self, ids: &[String], scope: &str, field: &str) -> Result<Vec<RemoteHit>> {
        let url = format!("{}/query", self.base_url);
        let q = ids.join(",");
        let params = [
            ("q", q.as_str()),
            ("scopes", scope),
            ("fields", field),
            ("species", self.species.as_str()),
        ];

        let body: Value = self.client
            .post(&url)
            .form(&params)
            .send()?
            .error_for_status()?
            .json()?;

        let hits = parse_hits(&body, field)?;
        debug!(queried = ids.len(), count = hits.len(), "MyGene query returned hits");
        Ok(hits)
    }
}

impl RemoteLookupClient for MyGeneClient {
    fn query_many(&self, ids: &[String], scope: &str, field: &str) -> Result<Vec<RemoteHit>> {
        query_in_batches(ids, MYGENE_BATCH_SIZE, |batch| self.query_batch(batch, scope, field))
    }
}

/// Send `ids` through `query` in slices of at most `batch_size`, concatenating the hits.
/// Stops at the first failing batch.
fn query_in_batches<F>(ids: &[String], batch_size: usize, mut query: F) -> Result<Vec<RemoteHit>>
where
    F: FnMut(&[String]) -> Result<Vec<RemoteHit>>,
{
    let mut hits = Vec::new();
    for batch in ids.chunks(batch_size.max(1)) {
        hits.extend(query(batch)?);
    }
    Ok(hits)
}

/// Turn a MyGene query response into hits for `field`.
pub fn parse_hits(body: &Value, field: &str) -> Result<Vec<RemoteHit>> {
    let entries = body
        .as_array()
        .ok_or_else(|| IdMapError::MalformedResponse("expected a JSON array".to_string()))?;

    entries
        .iter()
        .map(|entry| {
            let query = match &entry["query"] {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(IdMapError::MalformedResponse(format!("hit without query: {}", entry))),
            };
            let values = if entry["notfound"].as_bool() == Some(true) {
                Vec::new()
            } else {
                field_values(entry, field)
            };
            Ok(RemoteHit { query, values })
        })
        .collect()
}

/// Values at a dotted `path` (e.g. `ensembl.gene`), flattening arrays on the way.
fn field_values(entry: &Value, path: &str) -> Vec<String> {
    // Responses requested with dotfield=true use the flat key.
    if let Some(flat) = entry.get(path) {
        let mut out = Vec::new();
        collect_leaves(flat, &mut out);
        return out;
    }

    let mut current: Vec<&Value> = vec![entry];
    for key in path.split('.') {
        let mut next = Vec::new();
        for v in current {
            match v {
                Value::Array(items) => next.extend(items.iter().filter_map(|i| i.get(key))),
                other => next.extend(other.get(key)),
            }
        }
        current = next;
    }

    let mut out = Vec::new();
    for v in current {
        collect_leaves(v, &mut out);
    }
    out
}

fn collect_leaves(v: &Value, out: &mut Vec<String>) {
    match v {
        Value::String(s) => push_unique(out, s.clone()),
        Value::Number(n) => push_unique(out, n.to_string()),
        Value::Array(items) => items.iter().for_each(|i| collect_leaves(i, out)),
        _ => {}
    }
}

fn push_unique(out: &mut Vec<String>, value: String) {
    if !out.contains(&value) {
        out.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_nested_ensembl_field() {
        let body = json!([
            {"query": "3845", "_id": "3845", "ensembl": {"gene": "ENSG00000133703"}},
            {"query": "100", "ensembl": [{"gene": "ENSG1"}, {"gene": "ENSG2"}]},
            {"query": "1", "notfound": true}
        ]);
        let hits = parse_hits(&body, "ensembl.gene").unwrap();
        assert_eq!(hits[0].values, vec!["ENSG00000133703"]);
        assert_eq!(hits[1].values, vec!["ENSG1", "ENSG2"]);
        assert!(hits[2].values.is_empty());
    }

    #[test]
    fn test_parse_numeric_entrez() {
        let body = json!([{"query": "ENSG00000141510", "entrezgene": 7157}]);
        let hits = parse_hits(&body, "entrezgene").unwrap();
        assert_eq!(hits[0].query, "ENSG00000141510");
        assert_eq!(hits[0].values, vec!["7157"]);
    }

    #[test]
    fn test_parse_flat_dotfield() {
        let body = json!([{"query": "7157", "ensembl.gene": ["ENSG00000141510"]}]);
        let hits = parse_hits(&body, "ensembl.gene").unwrap();
        assert_eq!(hits[0].values, vec!["ENSG00000141510"]);
    }

    #[test]
    fn test_malformed_response() {
        let err = parse_hits(&json!({"error": "bad"}), "symbol").unwrap_err();
        assert!(matches!(err, IdMapError::MalformedResponse(_)));
        let err = parse_hits(&json!([{"symbol": "KRAS"}]), "symbol").unwrap_err();
        assert!(matches!(err, IdMapError::MalformedResponse(_)));
    }

    #[test]
    fn test_large_queries_split_into_batches() {
        let ids: Vec<String> = (1..=2500).map(|i| i.to_string()).collect();
        let mut sizes = Vec::new();
        let hits = query_in_batches(&ids, MYGENE_BATCH_SIZE, |batch| {
            sizes.push(batch.len());
            Ok(batch
                .iter()
                .map(|q| RemoteHit { query: q.clone(), values: vec![format!("G{}", q)] })
                .collect())
        })
        .unwrap();
        assert_eq!(sizes, vec![1000, 1000, 500]);
        assert_eq!(hits.len(), 2500);
        assert_eq!(hits[1000].query, "1001");
        assert_eq!(hits[2499].values, vec!["G2500"]);
    }

    #[test]
    fn test_batching_stops_at_first_failure() {
        let ids: Vec<String> = (0..5).map(|i| i.to_string()).collect();
        let mut calls = 0;
        let err = query_in_batches(&ids, 2, |_| {
            calls += 1;
            Err(IdMapError::MalformedResponse("bad batch".to_string()))
        })
        .unwrap_err();
        assert!(matches!(err, IdMapError::MalformedResponse(_)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_empty_query_sends_nothing() {
        let mut calls = 0;
        let hits = query_in_batches(&[], MYGENE_BATCH_SIZE, |_| {
            calls += 1;
            Ok(Vec::new())
        })
        .unwrap();
        assert!(hits.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(mygene_field(IdType::EnsemblGene), "ensembl.gene");
        assert_eq!(mygene_field(IdType::Hgnc), "HGNC");
    }

    #[test]
    #[ignore] // Requires network access
    fn test_mygene_live_entrez_to_symbol() {
        let client = MyGeneClient::new(MYGENE_BASE_URL, "human", Duration::from_secs(30)).unwrap();
        let hits = client
            .query_many(&["3845".to_string(), "7157".to_string()], "entrezgene", "symbol")
            .unwrap();
        assert!(hits.iter().any(|h| h.values == vec!["KRAS".to_string()]));
    }
}
