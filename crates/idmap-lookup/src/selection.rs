//! Combiners for inputs that map to several distinct outputs.
//!
//! A combiner receives the input value and its outputs in first-seen order.

use idmap_common::multi_hits::join_candidates;
use idmap_common::IdType;

pub type Combiner = dyn Fn(&str, &[&str]) -> String + Send + Sync;

/// Keep every output, pipe-joined. Default for lookup index builds.
pub fn join_all(_input: &str, outputs: &[&str]) -> String {
    join_candidates(outputs)
}

/// A single representative output per identifier type:
/// Entrez → numerically smallest, symbol → shortest, everything else →
/// lexicographically smallest.
pub fn representative_for(id_out: IdType) -> Box<Combiner> {
    match id_out {
        IdType::Entrez => Box::new(smallest_number),
        IdType::Symbol => Box::new(shortest),
        _ => Box::new(smallest),
    }
}

fn smallest_number(_input: &str, outputs: &[&str]) -> String {
    outputs
        .iter()
        .min_by_key(|o| (o.parse::<u64>().unwrap_or(u64::MAX), o.to_string()))
        .map(|o| o.to_string())
        .unwrap_or_default()
}

fn shortest(_input: &str, outputs: &[&str]) -> String {
    outputs
        .iter()
        .min_by_key(|o| o.len())
        .map(|o| o.to_string())
        .unwrap_or_default()
}

fn smallest(_input: &str, outputs: &[&str]) -> String {
    outputs.iter().min().map(|o| o.to_string()).unwrap_or_default()
}
