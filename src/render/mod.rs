//! HTML rendering for the three wiki screens.
//!
//! Templates are plain HTML files with `{{NAME}}` placeholders. They are read
//! once at startup into a [`Templates`] value that the router carries in its
//! state.

use crate::domain::Page;
use crate::error::WikiError;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

pub const VIEW: &str = "view";
pub const EDIT: &str = "edit";
pub const TOP: &str = "top";

const BUILTIN: [(&str, &str); 3] = [
    (VIEW, include_str!("../../template/view.html")),
    (EDIT, include_str!("../../template/edit.html")),
    (TOP, include_str!("../../template/top.html")),
];

#[derive(Debug, Clone)]
pub struct Templates {
    sources: HashMap<String, String>,
}

impl Templates {
    /// The templates compiled into the binary.
    pub fn builtin() -> Self {
        let sources = BUILTIN
            .iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();

        Self { sources }
    }

    /// Reads `<name>.html` for each screen from `dir`. A file that does not
    /// exist keeps the builtin version.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut templates = Self::builtin();

        for (name, _) in BUILTIN {
            let path = dir.join(format!("{}.html", name));
            match std::fs::read_to_string(&path) {
                Ok(source) => {
                    tracing::debug!(template = name, path = %path.display(), "Loaded template");
                    templates.sources.insert(name.to_string(), source);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(
                        template = name,
                        path = %path.display(),
                        "Template file missing, using builtin"
                    );
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Unable to read template {}", path.display()));
                }
            }
        }

        Ok(templates)
    }

    fn source(&self, name: &str) -> Result<&str, WikiError> {
        self.sources
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| WikiError::Render(format!("no template named {:?}", name)))
    }

    /// Fills `{{TITLE}}` and `{{BODY}}` from the page.
    pub fn render_page(&self, name: &str, page: &Page) -> Result<String, WikiError> {
        let html = self
            .source(name)?
            .replace("{{TITLE}}", &escape_html(&page.title))
            .replace("{{BODY}}", &escape_html(&page.body_text()));

        Ok(html)
    }

    /// Fills `{{COUNT}}` and `{{PAGES}}`, the latter with one link per title.
    pub fn render_titles(&self, name: &str, titles: &[String]) -> Result<String, WikiError> {
        let mut items = String::new();
        for title in titles {
            let title = escape_html(title);
            items.push_str(&format!(
                "<li><a href=\"/view/{}\">{}</a></li>\n",
                title, title
            ));
        }

        let html = self
            .source(name)?
            .replace("{{COUNT}}", &titles.len().to_string())
            .replace("{{PAGES}}", &items);

        Ok(html)
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
