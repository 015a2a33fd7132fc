use crate::database::PageRepository;
use crate::domain::Page;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Manual Mock: PageRepository ---
// keeps pages in a HashMap and counts calls, so router tests can check
// whether the store was reached at all
#[derive(Clone, Default)]
pub struct MockRepository {
    pub pages: Arc<Mutex<HashMap<String, Page>>>,
    pub call_count: Arc<Mutex<usize>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&self, title: &str, body: &str) {
        let mut pages = self.pages.lock().unwrap();
        pages.insert(title.to_string(), Page::new(title, body));
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn record_call(&self) {
        *self.call_count.lock().unwrap() += 1;
    }
}

#[async_trait]
impl PageRepository for MockRepository {
    async fn load_page(&self, title: &str) -> Result<Option<Page>> {
        self.record_call();
        let pages = self.pages.lock().unwrap();
        Ok(pages.get(title).cloned())
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        self.record_call();
        let pages = self.pages.lock().unwrap();
        let mut titles: Vec<String> = pages.keys().cloned().collect();
        titles.sort();
        Ok(titles)
    }

    async fn save_page(&self, page: &Page) -> Result<()> {
        self.record_call();
        let mut pages = self.pages.lock().unwrap();
        pages.insert(page.title.clone(), page.clone());
        Ok(())
    }
}

// --- Manual Mock: a store whose backend is gone ---
pub struct FailingRepository;

#[async_trait]
impl PageRepository for FailingRepository {
    async fn load_page(&self, _title: &str) -> Result<Option<Page>> {
        anyhow::bail!("connection refused")
    }

    async fn list_titles(&self) -> Result<Vec<String>> {
        anyhow::bail!("connection refused")
    }

    async fn save_page(&self, _page: &Page) -> Result<()> {
        anyhow::bail!("disk full")
    }
}
