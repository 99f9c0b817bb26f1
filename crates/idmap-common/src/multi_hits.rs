//! Multi-hit handling.
//!
//! A lookup that finds several distinct outputs for one input returns them
//! joined by [`MULTI_HIT_SEPARATOR`]. [`MultiHits`] decides how such values are
//! collapsed per source, and also selects the resolver's cross-source merge.

use std::fmt;
use std::sync::Arc;

/// Separator between the candidates of a multi-hit value.
pub const MULTI_HIT_SEPARATOR: char = '|';

/// Caller-supplied reduction of a candidate list to one value.
pub type CombineFn = dyn Fn(&[&str]) -> String + Send + Sync;

#[derive(Clone, Default)]
pub enum MultiHits {
    /// Keep the first candidate.
    #[default]
    First,
    /// Keep the shortest candidate; ties go to the earliest in piped order.
    Shortest,
    /// Keep every candidate, still piped.
    All,
    /// Like `All` per source; the resolver votes across sources.
    Consensus,
    Custom(Arc<CombineFn>),
    /// Unrecognised mode name. Values pass through untouched.
    Other(String),
}

impl MultiHits {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[&str]) -> String + Send + Sync + 'static,
    {
        MultiHits::Custom(Arc::new(f))
    }

    /// Parse a mode name. Unknown names become [`MultiHits::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "first"     => MultiHits::First,
            "shortest"  => MultiHits::Shortest,
            "all"       => MultiHits::All,
            "consensus" => MultiHits::Consensus,
            other       => MultiHits::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MultiHits::First     => "first",
            MultiHits::Shortest  => "shortest",
            MultiHits::All       => "all",
            MultiHits::Consensus => "consensus",
            MultiHits::Custom(_) => "custom",
            MultiHits::Other(n)  => n,
        }
    }

    pub fn is_consensus(&self) -> bool {
        matches!(self, MultiHits::Consensus)
    }

    /// Mode the resolver forwards to each source.
    pub fn per_source(&self) -> MultiHits {
        if self.is_consensus() { MultiHits::All } else { self.clone() }
    }

    /// Whether disagreement is judged on candidate-set intersection rather
    /// than on distinct collapsed values.
    pub fn compares_candidate_sets(&self) -> bool {
        matches!(self, MultiHits::All | MultiHits::Consensus)
    }

    /// Collapse one value. Values without a separator are returned as is.
    pub fn apply(&self, value: &str) -> String {
        if !value.contains(MULTI_HIT_SEPARATOR) {
            return value.to_string();
        }
        let candidates = split_candidates(value);
        match self {
            MultiHits::First => candidates[0].to_string(),
            MultiHits::Shortest => shortest(&candidates).to_string(),
            MultiHits::Custom(f) => f(&candidates),
            MultiHits::All | MultiHits::Consensus | MultiHits::Other(_) => value.to_string(),
        }
    }

    /// Collapse every resolved value, leaving unresolved positions alone.
    pub fn apply_all(&self, values: Vec<Option<String>>) -> Vec<Option<String>> {
        values
            .into_iter()
            .map(|v| v.map(|s| self.apply(&s)))
            .collect()
    }
}

/// Split a (possibly multi-hit) value into its candidates.
pub fn split_candidates(value: &str) -> Vec<&str> {
    value.split(MULTI_HIT_SEPARATOR).collect()
}

/// Join candidates into one multi-hit value.
pub fn join_candidates<S: AsRef<str>>(candidates: &[S]) -> String {
    let mut out = String::new();
    for (i, c) in candidates.iter().enumerate() {
        if i > 0 {
            out.push(MULTI_HIT_SEPARATOR);
        }
        out.push_str(c.as_ref());
    }
    out
}

fn shortest<'a>(candidates: &[&'a str]) -> &'a str {
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.len() < best.len() {
            best = c;
        }
    }
    best
}

impl fmt::Debug for MultiHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiHits::Custom(_) => f.write_str("Custom(<fn>)"),
            MultiHits::Other(name) => write!(f, "Other({name:?})"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_has_no_separator() {
        assert_eq!(MultiHits::First.apply("S1|S2|S3"), "S1");
    }

    #[test]
    fn test_shortest_tie_goes_to_earliest() {
        assert_eq!(MultiHits::Shortest.apply("ABCD|XY|AB"), "XY");
        assert_eq!(MultiHits::Shortest.apply("LONGER|B2|A1"), "B2");
    }

    #[test]
    fn test_all_and_unknown_are_noops() {
        assert_eq!(MultiHits::All.apply("a|b"), "a|b");
        assert_eq!(MultiHits::from_name("whatever").apply("a|b"), "a|b");
    }

    #[test]
    fn test_custom_combiner() {
        let last = MultiHits::custom(|c| c[c.len() - 1].to_string());
        assert_eq!(last.apply("a|b|c"), "c");
        assert_eq!(last.apply("single"), "single");
    }

    #[test]
    fn test_consensus_forwards_all() {
        assert!(matches!(MultiHits::Consensus.per_source(), MultiHits::All));
        assert!(matches!(MultiHits::Shortest.per_source(), MultiHits::Shortest));
    }

    #[test]
    fn test_join_split() {
        let joined = join_candidates(&["G1", "G2"]);
        assert_eq!(joined, "G1|G2");
        assert_eq!(split_candidates(&joined), vec!["G1", "G2"]);
    }
}
