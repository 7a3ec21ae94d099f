//! Candidate (OCR engine output) tree.
//!
//! Mirrors the hOCR hierarchy: page → content area → paragraph → line-like
//! element → word. Every element normally carries its own bounding box, and
//! words carry text and an optional confidence.

use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, PageSize, PixelBounds};
use super::node::{
    build_children, empty_page_bounds, resolve_bounds, DocumentNode, NodeBuilder,
};
use crate::error::{Error, Result};
use crate::eval::ErrorMode;

/// Highest confidence value an engine may report.
pub const MAX_CONFIDENCE: f32 = 100.0;

/// Kind of a candidate tree node, named after the hOCR classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateKind {
    #[serde(rename = "ocr_page")]
    Page,
    #[serde(rename = "ocr_carea")]
    Area,
    #[serde(rename = "ocr_par")]
    Paragraph,
    #[serde(rename = "ocr_line")]
    Line,
    #[serde(rename = "ocr_caption")]
    Caption,
    #[serde(rename = "ocr_header")]
    Header,
    #[serde(rename = "ocr_textfloat")]
    TextFloat,
    #[serde(rename = "ocrx_word")]
    Word,
}

impl CandidateKind {
    /// hOCR class name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Page => "ocr_page",
            CandidateKind::Area => "ocr_carea",
            CandidateKind::Paragraph => "ocr_par",
            CandidateKind::Line => "ocr_line",
            CandidateKind::Caption => "ocr_caption",
            CandidateKind::Header => "ocr_header",
            CandidateKind::TextFloat => "ocr_textfloat",
            CandidateKind::Word => "ocrx_word",
        }
    }

    /// Whether the kind sits at line level (lines, captions, headers, floats).
    pub fn is_line_level(&self) -> bool {
        matches!(
            self,
            CandidateKind::Line
                | CandidateKind::Caption
                | CandidateKind::Header
                | CandidateKind::TextFloat
        )
    }
}

/// Mutable candidate node, before bounds are normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateNodeBuilder {
    /// Node kind
    pub kind: CandidateKind,

    /// Element id assigned by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Measured bounds in page pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<PixelBounds>,

    /// Recognized text (words only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Word confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Children in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CandidateNodeBuilder>,
}

impl CandidateNodeBuilder {
    /// Create a node of the given kind with measured bounds.
    pub fn new(kind: CandidateKind, bounds: PixelBounds) -> Self {
        Self {
            kind,
            id: None,
            bounds: Some(bounds),
            text: None,
            confidence: None,
            children: Vec::new(),
        }
    }

    /// Create a node whose bounds will be derived from its children.
    pub fn unbounded(kind: CandidateKind) -> Self {
        Self {
            bounds: None,
            ..Self::new(kind, PixelBounds::new(0.0, 0.0, 0.0, 0.0))
        }
    }

    /// Create a word leaf.
    pub fn word(text: impl Into<String>, bounds: PixelBounds) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(CandidateKind::Word, bounds)
        }
    }

    /// Set the element id and return self.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the confidence and return self.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Add a child and return self.
    pub fn with_child(mut self, child: CandidateNodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Add a child.
    pub fn add_child(&mut self, child: CandidateNodeBuilder) {
        self.children.push(child);
    }
}

impl NodeBuilder for CandidateNodeBuilder {
    type Node = CandidateNode;

    fn build(self, size: PageSize, mode: ErrorMode) -> Result<CandidateNode> {
        let kind = self.kind;
        let name = kind.as_str();

        if let Some(confidence) = self.confidence {
            if !(0.0..=MAX_CONFIDENCE).contains(&confidence) {
                return Err(Error::malformed(
                    name,
                    format!("confidence {} outside 0-{}", confidence, MAX_CONFIDENCE),
                ));
            }
        }

        if kind == CandidateKind::Word {
            if self.bounds.is_none() {
                return Err(Error::malformed(name, "word has no bounds"));
            }
            if self.text.as_deref().map_or(true, str::is_empty) {
                return Err(Error::malformed(name, "word has no text"));
            }
        }

        let children = build_children(self.children, size, mode, name)?;
        let measured = match self.bounds {
            None if kind == CandidateKind::Page && children.is_empty() => {
                Some(empty_page_bounds(size))
            }
            bounds => bounds,
        };
        let bounds = resolve_bounds(measured.as_ref(), &children, size, name)?;

        Ok(CandidateNode {
            kind,
            id: self.id,
            bounds,
            text: self.text,
            confidence: self.confidence,
            children,
        })
    }
}

/// Finalized candidate node.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateNode {
    kind: CandidateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    bounds: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<CandidateNode>,
}

impl CandidateNode {
    /// Node kind.
    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    /// Element id assigned by the engine.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Word confidence, if reported.
    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }
}

impl DocumentNode for CandidateNode {
    fn kind_name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn is_word(&self) -> bool {
        self.kind == CandidateKind::Word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> PageSize {
        PageSize::new(1000.0, 1000.0)
    }

    #[test]
    fn test_build_line_of_words() {
        let line = CandidateNodeBuilder::new(
            CandidateKind::Caption,
            PixelBounds::new(10.0, 10.0, 300.0, 40.0),
        )
        .with_id("line_1_1")
        .with_child(
            CandidateNodeBuilder::word("Hello", PixelBounds::new(10.0, 10.0, 120.0, 40.0))
                .with_confidence(96.0),
        )
        .with_child(CandidateNodeBuilder::word(
            "world",
            PixelBounds::new(130.0, 10.0, 300.0, 40.0),
        ));

        let node = line.build(size(), ErrorMode::Strict).unwrap();
        assert!(node.kind().is_line_level());
        assert_eq!(node.id(), Some("line_1_1"));
        let words = node.words();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].confidence(), Some(96.0));
        assert_eq!(words[1].text(), Some("world"));
    }

    #[test]
    fn test_area_without_bounds_uses_children() {
        let mut area = CandidateNodeBuilder::unbounded(CandidateKind::Area);
        area.add_child(CandidateNodeBuilder::word(
            "a",
            PixelBounds::new(100.0, 200.0, 150.0, 230.0),
        ));
        let node = area.build(size(), ErrorMode::Strict).unwrap();
        assert_eq!(*node.bounds(), BoundingBox::new(100.0, 200.0, 150.0, 230.0));
    }

    #[test]
    fn test_word_requires_text() {
        let word = CandidateNodeBuilder::word("", PixelBounds::new(0.0, 0.0, 5.0, 5.0));
        assert!(matches!(
            word.build(size(), ErrorMode::Strict),
            Err(Error::MalformedNode { .. })
        ));
    }

    #[test]
    fn test_confidence_range() {
        let word = CandidateNodeBuilder::word("x", PixelBounds::new(0.0, 0.0, 5.0, 5.0))
            .with_confidence(140.0);
        assert!(word.build(size(), ErrorMode::Strict).is_err());
    }

    #[test]
    fn test_deserialize_hocr_class_names() {
        let json = r#"{
            "kind": "ocr_line",
            "bounds": {"left": 0, "top": 0, "right": 50, "bottom": 10},
            "children": [
                {"kind": "ocrx_word", "id": "word_1_1", "text": "hi", "confidence": 91,
                 "bounds": {"left": 0, "top": 0, "right": 20, "bottom": 10}}
            ]
        }"#;
        let builder: CandidateNodeBuilder = serde_json::from_str(json).unwrap();
        assert_eq!(builder.kind, CandidateKind::Line);
        let node = builder.build(size(), ErrorMode::Strict).unwrap();
        assert_eq!(node.words()[0].id(), Some("word_1_1"));
    }
}
