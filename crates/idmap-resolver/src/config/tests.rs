#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_defaults_select_all_sources() {
        let config = ResolverConfig::default();
        assert_eq!(config.selection().unwrap(), SourceSelection::All);
        assert!(matches!(config.multi_hits(), MultiHits::First));
        assert_eq!(config.fill_value(), None);
        assert_eq!(config.remote.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ResolverConfig::from_toml_str("").unwrap();
        assert_eq!(config.sources, "all");
        assert_eq!(config.local.ensembl_file, "ensembl.tsv");
        assert!(config.local.symbol_aliases);
        assert_eq!(config.remote.species, "human");
    }

    #[test]
    fn test_full_toml() {
        let config = ResolverConfig::from_toml_str(
            r#"
            sources = "local"
            fill_value = "passthrough"
            multi_hits = "consensus"

            [local]
            data_dir = "/data/idmap"
            symbol_aliases = false

            [remote]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.selection().unwrap(), SourceSelection::Local);
        assert_eq!(config.fill_value(), Some(FillValue::Passthrough));
        assert!(config.multi_hits().is_consensus());
        assert_eq!(config.hgnc_path(), PathBuf::from("/data/idmap/hgnc.tsv"));
        assert!(!config.local.symbol_aliases);
        assert!(config.local.use_cache);
        assert_eq!(config.remote.timeout_secs, 5);
    }

    #[test]
    fn test_unknown_source_keyword_rejected() {
        let err = ResolverConfig::from_toml_str(r#"sources = "everything""#).unwrap_err();
        assert!(matches!(err, IdMapError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = ResolverConfig::from_toml_str("multi_hits = [").unwrap_err();
        assert!(matches!(err, IdMapError::ConfigParse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idmap.toml");
        std::fs::write(&path, "sources = \"mygene\"\nfill_value = \"-\"\n").unwrap();
        let config = ResolverConfig::from_file(&path).unwrap();
        assert_eq!(config.selection().unwrap(), SourceSelection::MyGene);
        assert_eq!(config.fill_value(), Some(FillValue::Custom("-".to_string())));

        let err = ResolverConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, IdMapError::InvalidConfiguration(_)));
    }
}
