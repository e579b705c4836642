#[cfg(test)]
mod tests {
    use crate::{settings::load_config_from_env, CacheConfig, MeshCache};

    #[test]
    fn test_default_config() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.data_path, "./");
        assert!(cfg.enabled);
    }

    #[test]
    fn test_from_config_respects_enabled_flag() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MeshCache::from_config(&CacheConfig {
            data_path: dir.path().to_string_lossy().into_owned(),
            enabled: false,
        });

        assert!(!cache.is_enabled());
        assert_eq!(cache.data_path(), dir.path());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env = [
            ("MESHCACHE__DATA_PATH", "/tmp/meshcache-test/"),
            ("MESHCACHE__ENABLED", "false"),
            ("UNRELATED__ENABLED", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg = load_config_from_env(Some(env)).expect("Failed to load config");

        assert_eq!(cfg.data_path, "/tmp/meshcache-test/");
        assert!(!cfg.enabled);
    }

    #[test]
    fn test_empty_env_keeps_defaults() {
        let cfg = load_config_from_env(Some(Default::default())).expect("Failed to load config");
        assert_eq!(cfg, CacheConfig::default());
    }
}
