//! Document-level types.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::candidate::{CandidateNode, CandidateNodeBuilder};
use super::node::{DocumentNode, NodeBuilder};
use super::page::{Page, PageBuilder};
use super::reference::{ReferenceNode, ReferenceNodeBuilder};
use crate::error::Result;
use crate::eval::ErrorMode;

/// A finalized document: an ordered sequence of pages.
#[derive(Debug, Clone, Serialize)]
pub struct Document<N> {
    pages: Vec<Page<N>>,
}

/// Finalized reference transcription.
pub type ReferenceDocument = Document<ReferenceNode>;

/// Finalized OCR engine output.
pub type CandidateDocument = Document<CandidateNode>;

impl<N: DocumentNode> Document<N> {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Create a document from finalized pages.
    pub fn from_pages(pages: Vec<Page<N>>) -> Self {
        Self { pages }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page<N>) {
        self.pages.push(page);
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[Page<N>] {
        &self.pages
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by position (1-indexed).
    pub fn get_page(&self, index: usize) -> Option<&Page<N>> {
        if index == 0 {
            return None;
        }
        self.pages.get(index - 1)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of words across all pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|page| page.word_count()).sum()
    }
}

impl<N: DocumentNode> Default for Document<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A document whose page trees are not finalized yet.
///
/// This is the interchange form handed over by tree builders, usually as
/// JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "B: Deserialize<'de>"))]
pub struct DocumentBuilder<B> {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<PageBuilder<B>>,
}

/// Reference transcription before finalize.
pub type ReferenceDocumentBuilder = DocumentBuilder<ReferenceNodeBuilder>;

/// OCR engine output before finalize.
pub type CandidateDocumentBuilder = DocumentBuilder<CandidateNodeBuilder>;

impl<B: NodeBuilder> DocumentBuilder<B> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Add a page and return self.
    pub fn with_page(mut self, page: PageBuilder<B>) -> Self {
        self.pages.push(page);
        self
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageBuilder<B>) {
        self.pages.push(page);
    }

    /// Finalize every page tree.
    pub fn build(self, mode: ErrorMode) -> Result<Document<B::Node>> {
        let pages = self
            .pages
            .into_iter()
            .map(|page| page.build(mode))
            .collect::<Result<Vec<_>>>()?;
        Ok(Document::from_pages(pages))
    }
}

impl<B: NodeBuilder + DeserializeOwned> DocumentBuilder<B> {
    /// Decode a builder from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a builder from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl<B: NodeBuilder> Default for DocumentBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::PixelBounds;

    fn reference_page(number: u32, text: &str) -> PageBuilder<ReferenceNodeBuilder> {
        let mut word = ReferenceNodeBuilder::word();
        for (i, c) in text.chars().enumerate() {
            let x = 10.0 * i as f64;
            word.add_child(ReferenceNodeBuilder::char(
                c.to_string(),
                PixelBounds::new(x, 0.0, x + 9.0, 12.0),
            ));
        }
        let root = ReferenceNodeBuilder::page().with_child(
            ReferenceNodeBuilder::paragraph()
                .with_bounds(PixelBounds::new(0.0, 0.0, 500.0, 20.0))
                .with_child(ReferenceNodeBuilder::line().with_child(word)),
        );
        PageBuilder::new(number, 1000.0, 1000.0, root)
    }

    #[test]
    fn test_document_new() {
        let doc = ReferenceDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert!(doc.get_page(1).is_none());
    }

    #[test]
    fn test_build_document() {
        let doc = ReferenceDocumentBuilder::new()
            .with_page(reference_page(1, "one"))
            .with_page(reference_page(2, "two"))
            .build(ErrorMode::Strict)
            .unwrap();

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.word_count(), 2);
        assert_eq!(doc.get_page(2).unwrap().number(), 2);
        assert!(doc.get_page(0).is_none());
    }

    #[test]
    fn test_build_fails_on_bad_page() {
        let mut builder = ReferenceDocumentBuilder::new().with_page(reference_page(1, "ok"));
        builder.add_page(PageBuilder::new(2, 1000.0, 0.0, ReferenceNodeBuilder::page()));
        assert!(matches!(
            builder.build(ErrorMode::Strict),
            Err(Error::InvalidPageSize { page: 2, .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "pages": [{
                "number": 1, "width": 850, "height": 1100,
                "root": {"kind": "ocr_page", "bounds": {"left": 0, "top": 0, "right": 850, "bottom": 1100}}
            }]
        }"#;
        let builder = CandidateDocumentBuilder::from_json(json).unwrap();
        let doc = builder.build(ErrorMode::Strict).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.word_count(), 0);

        assert!(matches!(
            CandidateDocumentBuilder::from_json("{\"pages\": 3}"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_from_json_without_pages() {
        let builder = ReferenceDocumentBuilder::from_json("{}").unwrap();
        assert!(builder.pages.is_empty());

        let doc = CandidateDocumentBuilder::from_reader("{}".as_bytes())
            .unwrap()
            .build(ErrorMode::Strict)
            .unwrap();
        assert!(doc.is_empty());
    }
}
