use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// Which storage backend the page store is built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// One `<title>.txt` file per page.
    File,
    /// One row per page in the `pages` table.
    Sqlite,
}

impl StorageBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" | "files" => Ok(Self::File),
            "sqlite" | "sql" | "db" => Ok(Self::Sqlite),
            other => Err(anyhow!(
                "Unknown STORAGE_BACKEND '{}', expected 'file' or 'sqlite'",
                other
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WikiConfig {
    pub backend: StorageBackend,
    pub pages_dir: PathBuf,
    pub database_url: String,
    pub max_connections: u32,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: Level,
}

impl WikiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source, falling back to
    /// defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => StorageBackend::parse(&raw)?,
            None => StorageBackend::File,
        };

        let pages_dir = PathBuf::from(lookup("PAGES_DIR").unwrap_or_else(|| ".".to_string()));

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://wiki.db".to_string());

        let max_connections = lookup("MAX_CONNECTIONS")
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(5);

        let template_dir =
            PathBuf::from(lookup("TEMPLATE_DIR").unwrap_or_else(|| "./template".to_string()));

        let static_dir =
            PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "./static".to_string()));

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid BIND_ADDR '{}'", raw_addr))?;

        let raw_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_level = raw_level
            .parse::<Level>()
            .map_err(|_| anyhow!("Invalid LOG_LEVEL '{}'", raw_level))?;

        Ok(Self {
            backend,
            pages_dir,
            database_url,
            max_connections,
            template_dir,
            static_dir,
            bind_addr,
            log_level,
        })
    }
}
