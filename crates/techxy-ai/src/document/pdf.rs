//! PDF loading via `lopdf`. Parsing and per-page extraction run on the
//! blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{DocumentError, DocumentLoader, PagedDocument};

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

struct PdfDocument {
    inner: Arc<lopdf::Document>,
    /// Page numbers in document order.
    pages: Vec<u32>,
}

#[async_trait]
impl DocumentLoader for PdfLoader {
    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn PagedDocument>, DocumentError> {
        let document = tokio::task::spawn_blocking(move || lopdf::Document::load_mem(&bytes))
            .await
            .map_err(|e| DocumentError::Open(e.to_string()))?
            .map_err(|e| DocumentError::Open(e.to_string()))?;

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        debug!(pages = pages.len(), "PDF opened");

        Ok(Box::new(PdfDocument {
            inner: Arc::new(document),
            pages,
        }))
    }
}

#[async_trait]
impl PagedDocument for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page_items(&self, page: u32) -> Result<Vec<String>, DocumentError> {
        let number = page
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .copied()
            .ok_or_else(|| DocumentError::Page {
                page,
                reason: "no such page".into(),
            })?;

        let document = Arc::clone(&self.inner);
        let text = tokio::task::spawn_blocking(move || document.extract_text(&[number]))
            .await
            .map_err(|e| DocumentError::Page {
                page,
                reason: e.to_string(),
            })?
            .map_err(|e| DocumentError::Page {
                page,
                reason: e.to_string(),
            })?;

        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}
