//! Document text extraction.
//!
//! A [`DocumentLoader`] opens raw bytes into a [`PagedDocument`]; pages are
//! extracted concurrently and reassembled by page index, never by
//! completion order.

mod pdf;

use std::path::Path;

use async_trait::async_trait;
use futures_util::future::try_join_all;

pub use pdf::PdfLoader;

/// Header every PDF carries within its first kilobyte.
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_HEADER_WINDOW: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to open document: {0}")]
    Open(String),

    #[error("failed to extract page {page}: {reason}")]
    Page { page: u32, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A file handed in by the user.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk, named after its last path component.
    pub async fn read(path: &Path) -> Result<Self, DocumentError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        let window = &self.bytes[..self.bytes.len().min(PDF_HEADER_WINDOW)];
        window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
    }
}

#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn PagedDocument>, DocumentError>;
}

#[async_trait]
pub trait PagedDocument: Send + Sync {
    fn page_count(&self) -> u32;

    /// Text items of a page, `page` being 1-based.
    async fn page_items(&self, page: u32) -> Result<Vec<String>, DocumentError>;
}

/// Extract the whole document: items joined by a space within a page,
/// pages joined by a newline, in page order. The first failing page fails
/// the whole extraction.
pub async fn extract_text(document: &dyn PagedDocument) -> Result<String, DocumentError> {
    let pages = (1..=document.page_count()).map(|page| async move {
        let items = document.page_items(page).await?;
        Ok::<_, DocumentError>(items.join(" "))
    });
    let texts = try_join_all(pages).await?;
    Ok(texts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Pages finish in reverse order: page N completes first and each
    /// page waits for the one after it.
    struct ReverseOrderDocument {
        pages: Vec<Vec<&'static str>>,
        done: Vec<Notify>,
        completed: Mutex<Vec<u32>>,
    }

    impl ReverseOrderDocument {
        fn new(pages: Vec<Vec<&'static str>>) -> Self {
            let done = pages.iter().map(|_| Notify::new()).collect();
            Self {
                pages,
                done,
                completed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PagedDocument for ReverseOrderDocument {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        async fn page_items(&self, page: u32) -> Result<Vec<String>, DocumentError> {
            let index = (page - 1) as usize;
            if index + 1 < self.pages.len() {
                self.done[index + 1].notified().await;
            }
            self.completed.lock().unwrap().push(page);
            self.done[index].notify_one();
            Ok(self.pages[index].iter().map(|s| s.to_string()).collect())
        }
    }

    struct FailingDocument;

    #[async_trait]
    impl PagedDocument for FailingDocument {
        fn page_count(&self) -> u32 {
            3
        }

        async fn page_items(&self, page: u32) -> Result<Vec<String>, DocumentError> {
            if page == 2 {
                return Err(DocumentError::Page {
                    page,
                    reason: "corrupt content stream".into(),
                });
            }
            Ok(vec![format!("page {page}")])
        }
    }

    #[tokio::test]
    async fn read_names_upload_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF-1.7\n").unwrap();

        let upload = Upload::read(&path).await.unwrap();
        assert_eq!(upload.file_name, "report.pdf");
        assert!(upload.is_pdf());
    }

    #[tokio::test]
    async fn read_of_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Upload::read(&dir.path().join("gone.pdf")).await.unwrap_err();
        assert!(matches!(err, DocumentError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn pages_are_reassembled_in_page_order() {
        let document = ReverseOrderDocument::new(vec![
            vec!["first", "page"],
            vec!["second"],
            vec!["third", "and", "last"],
        ]);

        let text = extract_text(&document).await.unwrap();

        assert_eq!(*document.completed.lock().unwrap(), vec![3, 2, 1]);
        assert_eq!(text, "first page\nsecond\nthird and last");
    }

    #[tokio::test]
    async fn one_failing_page_fails_the_document() {
        let err = extract_text(&FailingDocument).await.unwrap_err();
        assert!(matches!(err, DocumentError::Page { page: 2, .. }));
    }

    #[tokio::test]
    async fn empty_document_is_empty_text() {
        let document = ReverseOrderDocument::new(Vec::new());
        assert_eq!(extract_text(&document).await.unwrap(), "");
    }

    #[test]
    fn pdf_detection_uses_header() {
        assert!(Upload::new("a.pdf", b"%PDF-1.7\n%....".to_vec()).is_pdf());
        assert!(Upload::new("bom.pdf", b"\xEF\xBB\xBF%PDF-1.4".to_vec()).is_pdf());
        assert!(!Upload::new("notes.pdf", b"just some text".to_vec()).is_pdf());
        assert!(!Upload::new("empty.pdf", Vec::new()).is_pdf());
        assert!(!Upload::new("image.png", b"\x89PNG\r\n\x1a\n".to_vec()).is_pdf());
    }
}
