//! Input and output shapes of a conversion call.
//!
//! A single identifier in gives a single value out; a list in gives a list
//! of the same length and order out. Callers asking for a table get a
//! per-input structure instead (the concrete table type depends on whether a
//! single source or a resolver produced it).

use serde::{Deserialize, Serialize};

/// Identifiers handed to `convert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdQuery {
    Single(String),
    Many(Vec<String>),
}

impl IdQuery {
    pub fn is_many(&self) -> bool {
        matches!(self, IdQuery::Many(_))
    }

    /// The identifiers as a list; a single identifier becomes a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            IdQuery::Single(id) => vec![id.clone()],
            IdQuery::Many(ids)  => ids.clone(),
        }
    }

    /// Re-wrap per-input `values` to match this query's shape.
    pub fn shape<T>(&self, mut values: Vec<String>) -> Conversion<T> {
        match self {
            IdQuery::Many(_) => Conversion::Many(values),
            IdQuery::Single(_) => Conversion::Single(values.pop().unwrap_or_default()),
        }
    }
}

impl From<&str> for IdQuery {
    fn from(id: &str) -> Self {
        IdQuery::Single(id.to_string())
    }
}

impl From<String> for IdQuery {
    fn from(id: String) -> Self {
        IdQuery::Single(id)
    }
}

impl From<u64> for IdQuery {
    /// Entrez IDs are often held as integers.
    fn from(id: u64) -> Self {
        IdQuery::Single(id.to_string())
    }
}

impl<T: ToString> From<Vec<T>> for IdQuery {
    fn from(ids: Vec<T>) -> Self {
        IdQuery::Many(ids.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for IdQuery {
    fn from(ids: &[T]) -> Self {
        IdQuery::Many(ids.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for IdQuery {
    fn from(ids: [T; N]) -> Self {
        IdQuery::Many(ids.iter().map(ToString::to_string).collect())
    }
}

/// Result of a conversion, shaped after the query.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion<T> {
    Single(String),
    Many(Vec<String>),
    Table(T),
}

impl<T> Conversion<T> {
    pub fn into_single(self) -> Option<String> {
        match self {
            Conversion::Single(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_many(self) -> Option<Vec<String>> {
        match self {
            Conversion::Many(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<T> {
        match self {
            Conversion::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// One source's output, keyed by input identifier in query order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedValues {
    pub source_id: String,
    pub index: Vec<String>,
    pub values: Vec<String>,
}

impl KeyedValues {
    pub fn get(&self, input: &str) -> Option<&str> {
        self.index
            .iter()
            .position(|i| i == input)
            .map(|pos| self.values[pos].as_str())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_query_unwraps() {
        let q: IdQuery = "E1".into();
        assert_eq!(q.to_list(), vec!["E1"]);
        let out: Conversion<()> = q.shape(vec!["S1".to_string()]);
        assert_eq!(out, Conversion::Single("S1".to_string()));
    }

    #[test]
    fn test_list_query_keeps_order() {
        let q: IdQuery = vec![3845u64, 7157].into();
        assert_eq!(q.to_list(), vec!["3845", "7157"]);
        let out: Conversion<()> = q.shape(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(out.into_many().unwrap(), vec!["a", "b"]);
    }
}
