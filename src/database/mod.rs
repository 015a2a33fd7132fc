use crate::config::{StorageBackend, WikiConfig};
use crate::domain::Page;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod flat_file;
pub mod sqlite;

// a page repository is shared between request tasks behind an Arc.
// both backends are stateless apart from their root dir / pool, so no locking here.
// `Ok(None)` from `load_page` means the page does not exist yet; `Err` is a
// storage failure.
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn load_page(&self, title: &str) -> Result<Option<Page>>;
    async fn list_titles(&self) -> Result<Vec<String>>;

    // write operations
    async fn save_page(&self, page: &Page) -> Result<()>;
}

/// Builds the repository named by the config.
///
/// The sqlite pool connects lazily and migrations are retried on use, so a
/// database that is down at startup shows up as failing requests rather than
/// a dead server, and recovers once it is reachable.
pub async fn open_repository(config: &WikiConfig) -> Result<Arc<dyn PageRepository>> {
    match config.backend {
        StorageBackend::File => {
            tracing::info!(dir = %config.pages_dir.display(), "Using flat-file page store");
            Ok(Arc::new(flat_file::FileRepository::new(
                config.pages_dir.clone(),
            )))
        }
        StorageBackend::Sqlite => {
            tracing::info!(url = %config.database_url, "Using sqlite page store");
            let repo = sqlite::SqliteRepository::connect(
                &config.database_url,
                config.max_connections,
            )?;
            if let Err(e) = repo.prepare().await {
                let detail = format!("{:#}", e);
                tracing::error!(
                    error = %detail,
                    "Unable to prepare database, requests will fail until it is reachable"
                );
            }
            Ok(Arc::new(repo))
        }
    }
}
