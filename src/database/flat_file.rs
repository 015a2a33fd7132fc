use crate::database::PageRepository;
use crate::domain::{validate_title, Page};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

const PAGE_EXTENSION: &str = "txt";

/// Stores every page as `<title>.txt` directly under `root_path`.
pub struct FileRepository {
    pub root_path: PathBuf,
}

impl FileRepository {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    fn page_path(&self, title: &str) -> PathBuf {
        self.root_path.join(format!("{}.{}", title, PAGE_EXTENSION))
    }
}

#[async_trait]
impl PageRepository for FileRepository {
    async fn load_page(&self, title: &str) -> Result<Option<Page>> {
        let path = self.page_path(title);

        match tokio::fs::read(&path).await {
            Ok(body) => {
                tracing::debug!(%title, bytes = body.len(), "file load");
                Ok(Some(Page::new(title, body)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Unable to read {}", path.display())),
        }
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        let root = self.root_path.clone();

        // walkdir is blocking, keep it off the request workers
        tokio::task::spawn_blocking(move || scan_titles(&root))
            .await
            .context("Page listing task failed")?
    }

    async fn save_page(&self, page: &Page) -> Result<()> {
        let path = self.page_path(&page.title);

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // owner read/write only
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&path)
            .await
            .with_context(|| format!("Unable to open {} for writing", path.display()))?;
        file.write_all(&page.body)
            .await
            .with_context(|| format!("Unable to write {}", path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Unable to flush {}", path.display()))?;

        Ok(())
    }
}

fn scan_titles(root: &Path) -> Result<Vec<String>> {
    let mut titles = Vec::new();

    // nothing saved yet
    if !root.is_dir() {
        return Ok(titles);
    }

    for result_entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = result_entry
            .with_context(|| format!("Unable to list pages in {}", root.display()))?;

        // skip anything that isn't a file
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some(PAGE_EXTENSION) {
            continue;
        }

        let Some(title) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if !validate_title(title) {
            tracing::debug!(file = %path.display(), "Skipping file with unroutable title");
            continue;
        }

        titles.push(title.to_string());
    }

    titles.sort();
    Ok(titles)
}
