use crate::domain::Page;
use derive_more::derive::Display;
use serde::Deserialize;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{}", title)]
pub struct DbPage {
    pub id: i64,
    pub title: String,
    pub content: Vec<u8>,
}

impl From<DbPage> for Page {
    fn from(db_page: DbPage) -> Self {
        Page::new(db_page.title, db_page.content)
    }
}

// bodies are stored as blobs, exactly as given
impl From<&Page> for DbPage {
    fn from(page: &Page) -> Self {
        DbPage {
            id: 0,
            title: page.title.clone(),
            content: page.body.clone(),
        }
    }
}

/// The form posted by the edit page.
#[derive(Deserialize, Debug, Default)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}
