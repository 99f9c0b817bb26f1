//! Common interface for all identifier sources.

use idmap_common::{Conversion, FillValue, IdMapError, IdQuery, IdType, KeyedValues, MultiHits, Result};
use tracing::debug;

/// A source of identifier mappings.
///
/// Implementations only provide capabilities and a raw batch lookup; type
/// validation, multi-hit filtering, filling and result shaping are shared.
pub trait IdSource: Send + Sync {
    /// Stable identifier, e.g. `ensembl`.
    fn source_id(&self) -> &str;

    /// Value reported for identifiers this source cannot resolve.
    fn fill_value(&self) -> &FillValue;

    fn has_id_in_type(&self, id_type: IdType) -> bool;

    fn has_id_out_type(&self, id_type: IdType) -> bool;

    /// Look up every id, in order. `None` marks an unresolved id; resolved
    /// values may hold several pipe-joined candidates.
    fn lookup_raw(&self, ids: &[String], id_in: IdType, id_out: IdType) -> Result<Vec<Option<String>>>;

    fn check_types(&self, id_in: IdType, id_out: IdType) -> Result<()> {
        if !self.has_id_in_type(id_in) {
            return Err(IdMapError::unsupported(format!("{}: input", self.source_id()), id_in));
        }
        if !self.has_id_out_type(id_out) {
            return Err(IdMapError::unsupported(format!("{}: output", self.source_id()), id_out));
        }
        Ok(())
    }

    /// Validated lookup with multi-hit filtering applied; unresolved ids stay `None`.
    fn resolve(
        &self,
        ids: &[String],
        id_in: IdType,
        id_out: IdType,
        multi_hits: &MultiHits,
    ) -> Result<Vec<Option<String>>> {
        self.check_types(id_in, id_out)?;
        let raw = self.lookup_raw(ids, id_in, id_out)?;
        if raw.len() != ids.len() {
            return Err(IdMapError::MalformedResponse(format!(
                "{}: {} values for {} identifiers",
                self.source_id(),
                raw.len(),
                ids.len()
            )));
        }
        debug!(
            source = self.source_id(),
            %id_in,
            %id_out,
            requested = ids.len(),
            resolved = raw.iter().filter(|v| v.is_some()).count(),
            "source lookup"
        );
        Ok(multi_hits.apply_all(raw))
    }

    /// Convert identifiers; unresolved ids get this source's fill value.
    fn convert(
        &self,
        query: &IdQuery,
        id_in: IdType,
        id_out: IdType,
        multi_hits: &MultiHits,
        as_table: bool,
    ) -> Result<Conversion<KeyedValues>> {
        let ids = query.to_list();
        let resolved = self.resolve(&ids, id_in, id_out, multi_hits)?;
        let values = self.fill_value().fill_all(&ids, resolved);

        if as_table {
            return Ok(Conversion::Table(KeyedValues {
                source_id: self.source_id().to_string(),
                index: ids,
                values,
            }));
        }
        Ok(query.shape(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Short {
        fill: FillValue,
    }

    impl IdSource for Short {
        fn source_id(&self) -> &str {
            "short"
        }

        fn fill_value(&self) -> &FillValue {
            &self.fill
        }

        fn has_id_in_type(&self, _id_type: IdType) -> bool {
            true
        }

        fn has_id_out_type(&self, _id_type: IdType) -> bool {
            true
        }

        fn lookup_raw(&self, ids: &[String], _id_in: IdType, _id_out: IdType) -> Result<Vec<Option<String>>> {
            Ok(ids.iter().skip(1).map(|id| Some(id.clone())).collect())
        }
    }

    #[test]
    fn test_short_lookup_is_malformed() {
        let q: IdQuery = vec!["A", "B"].into();
        let src = Short { fill: FillValue::NotAvailable };
        let err = src
            .convert(&q, IdType::Symbol, IdType::Entrez, &MultiHits::First, false)
            .unwrap_err();
        assert!(matches!(err, IdMapError::MalformedResponse(ref m) if m.starts_with("short: 1 values for 2")));
    }
}
