use crate::database::PageRepository;
use crate::domain::Page;
use crate::features::pages::model::DbPage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tokio::sync::OnceCell;

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
    // set once migrations have succeeded; a failed run leaves it empty so the
    // next call tries again
    schema_ready: OnceCell<()>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            pool,
            schema_ready: OnceCell::new(),
        }
    }

    /// Sets up a pool without opening any connection yet. Connections create
    /// the database file when it does not exist.
    pub fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url {}", database_url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy_with(options);

        Ok(Self::new(pool))
    }

    /// Runs pending migrations now instead of on the first request.
    pub async fn prepare(&self) -> Result<()> {
        self.ensure_schema().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                sqlx::migrate!("./migrations")
                    .run(&self.pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database schema is up to date");
                Ok::<(), anyhow::Error>(())
            })
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PageRepository for SqliteRepository {
    async fn load_page(&self, title: &str) -> Result<Option<Page>> {
        self.ensure_schema().await?;

        let db_page_opt = sqlx::query_as::<_, DbPage>(
            "SELECT id, title, content FROM pages WHERE title = ?",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load page {}", title))?;

        tracing::debug!(%title, found = db_page_opt.is_some(), "sqlite load");

        Ok(db_page_opt.map(Page::from))
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        self.ensure_schema().await?;

        let titles = sqlx::query_scalar::<_, String>("SELECT title FROM pages ORDER BY title")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list pages")?;

        Ok(titles)
    }

    async fn save_page(&self, page: &Page) -> Result<()> {
        self.ensure_schema().await?;

        let db_page = DbPage::from(page);

        // one row per title, the latest save wins
        sqlx::query(
            r#"
            INSERT INTO pages (title, content)
            VALUES (?, ?)
            ON CONFLICT(title) DO UPDATE SET
                content = excluded.content
            "#,
        )
        .bind(&db_page.title)
        .bind(&db_page.content)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to save page {}", db_page))?;

        Ok(())
    }
}
