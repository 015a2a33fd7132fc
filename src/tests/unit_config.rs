use crate::config::{StorageBackend, WikiConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::Level;

fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<WikiConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    WikiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.backend, StorageBackend::File);
    assert_eq!(config.pages_dir, PathBuf::from("."));
    assert_eq!(config.database_url, "sqlite://wiki.db");
    assert_eq!(config.max_connections, 5);
    assert_eq!(config.template_dir, PathBuf::from("./template"));
    assert_eq!(config.static_dir, PathBuf::from("./static"));
    assert_eq!(config.bind_addr.port(), 3000);
    assert_eq!(config.log_level, Level::INFO);
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("STORAGE_BACKEND", "SQLite"),
        ("DATABASE_URL", "sqlite:///var/lib/wiki/pages.db"),
        ("MAX_CONNECTIONS", "12"),
        ("PAGES_DIR", "/srv/pages"),
        ("BIND_ADDR", "127.0.0.1:8080"),
        ("LOG_LEVEL", "debug"),
    ])
    .unwrap();

    assert_eq!(config.backend, StorageBackend::Sqlite);
    assert_eq!(config.database_url, "sqlite:///var/lib/wiki/pages.db");
    assert_eq!(config.max_connections, 12);
    assert_eq!(config.pages_dir, PathBuf::from("/srv/pages"));
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
}

// a garbage pool size keeps the default rather than failing startup
#[test]
fn test_unparsable_max_connections_uses_default() {
    let config = config_from(&[("MAX_CONNECTIONS", "lots")]).unwrap();

    assert_eq!(config.max_connections, 5);
}

#[test]
fn test_invalid_values_are_errors() {
    assert!(config_from(&[("STORAGE_BACKEND", "mysql")]).is_err());
    assert!(config_from(&[("BIND_ADDR", "localhost")]).is_err());
    assert!(config_from(&[("LOG_LEVEL", "loud")]).is_err());
}
