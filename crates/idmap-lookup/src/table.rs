//! In-memory identifier table.
//!
//! Rows hold one optional value per column. An absent value is `None`, never
//! the empty string; providers must map empty cells to `None` before pushing.

use std::collections::HashSet;

use idmap_common::{IdMapError, IdType, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTable {
    columns: Vec<IdType>,
    rows: Vec<Vec<Option<String>>>,
}

impl IdTable {
    pub fn new(columns: Vec<IdType>) -> Result<Self> {
        let mut seen = HashSet::new();
        for c in &columns {
            if !seen.insert(*c) {
                return Err(IdMapError::InvalidConfiguration(format!(
                    "duplicate identifier column '{}'",
                    c
                )));
            }
        }
        Ok(Self { columns, rows: Vec::new() })
    }

    /// Build a table from string rows; empty strings become absent values.
    pub fn from_rows<R, S>(columns: Vec<IdType>, rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row.iter().map(|v| non_empty(v.as_ref())).collect())?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(IdMapError::InvalidConfiguration(format!(
                "row has {} values, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[IdType] {
        &self.columns
    }

    pub fn has_column(&self, id_type: IdType) -> bool {
        self.columns.contains(&id_type)
    }

    pub fn column_index(&self, id_type: IdType) -> Option<usize> {
        self.columns.iter().position(|c| *c == id_type)
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(a, b)` value pairs of every row where both columns are present, in row order.
    pub fn pairs(&self, a: IdType, b: IdType) -> impl Iterator<Item = (&str, &str)> + '_ {
        let ia = self.column_index(a);
        let ib = self.column_index(b);
        self.rows.iter().filter_map(move |row| {
            let (ia, ib) = (ia?, ib?);
            Some((row[ia].as_deref()?, row[ib].as_deref()?))
        })
    }

    /// Drop exact duplicate rows, keeping the first occurrence.
    pub fn dedup_rows(&mut self) {
        let mut seen = HashSet::new();
        self.rows.retain(|row| seen.insert(row.clone()));
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cells_are_absent() {
        let t = IdTable::from_rows(
            vec![IdType::EnsemblGene, IdType::Symbol],
            vec![vec!["E1", ""], vec!["E2", "S2"]],
        ).unwrap();
        assert_eq!(t.rows()[0][1], None);
        let pairs: Vec<_> = t.pairs(IdType::EnsemblGene, IdType::Symbol).collect();
        assert_eq!(pairs, vec![("E2", "S2")]);
    }

    #[test]
    fn test_missing_column_yields_no_pairs() {
        let t = IdTable::from_rows(vec![IdType::EnsemblGene], vec![vec!["E1"]]).unwrap();
        assert_eq!(t.pairs(IdType::EnsemblGene, IdType::Hgnc).count(), 0);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        assert!(IdTable::new(vec![IdType::Symbol, IdType::Symbol]).is_err());
    }

    #[test]
    fn test_row_width_checked() {
        let mut t = IdTable::new(vec![IdType::Symbol, IdType::Entrez]).unwrap();
        assert!(t.push_row(vec![Some("KRAS".to_string())]).is_err());
    }

    #[test]
    fn test_dedup_rows() {
        let mut t = IdTable::from_rows(
            vec![IdType::Symbol, IdType::Entrez],
            vec![vec!["KRAS", "3845"], vec!["KRAS", "3845"], vec!["TP53", "7157"]],
        ).unwrap();
        t.dedup_rows();
        assert_eq!(t.len(), 2);
    }
}
