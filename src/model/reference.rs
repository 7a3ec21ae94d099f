//! Reference transcription tree.
//!
//! Page → (paragraph | table → row → paragraph) → line → word → char.
//! Only paragraphs and characters usually carry measured bounds; paragraphs
//! inside table cells often do not, and tables, rows, lines and words never
//! do. Those boxes are derived from their children when the tree is built.

use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, PageSize, PixelBounds};
use super::node::{
    build_children, empty_page_bounds, resolve_bounds, DocumentNode, NodeBuilder,
};
use crate::error::{Error, Result};
use crate::eval::ErrorMode;

/// Kind of a reference tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Page root
    Page,
    /// Table block
    Table,
    /// Table row
    Row,
    /// Text block (also used for table cells)
    Paragraph,
    /// Text line
    Line,
    /// Word, composed of characters
    Word,
    /// Single character
    Char,
}

impl ReferenceKind {
    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Page => "page",
            ReferenceKind::Table => "table",
            ReferenceKind::Row => "row",
            ReferenceKind::Paragraph => "paragraph",
            ReferenceKind::Line => "line",
            ReferenceKind::Word => "word",
            ReferenceKind::Char => "char",
        }
    }
}

/// Mutable reference node, before bounds and text are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceNodeBuilder {
    /// Node kind
    pub kind: ReferenceKind,

    /// Measured bounds in page pixels, if the source recorded any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<PixelBounds>,

    /// Text for characters; for words, only used when they have no characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Children in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReferenceNodeBuilder>,
}

impl ReferenceNodeBuilder {
    /// Create an empty node of the given kind.
    pub fn new(kind: ReferenceKind) -> Self {
        Self {
            kind,
            bounds: None,
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a page root.
    pub fn page() -> Self {
        Self::new(ReferenceKind::Page)
    }

    /// Create a table.
    pub fn table() -> Self {
        Self::new(ReferenceKind::Table)
    }

    /// Create a table row.
    pub fn row() -> Self {
        Self::new(ReferenceKind::Row)
    }

    /// Create a text block.
    pub fn paragraph() -> Self {
        Self::new(ReferenceKind::Paragraph)
    }

    /// Create a line.
    pub fn line() -> Self {
        Self::new(ReferenceKind::Line)
    }

    /// Create a word; its text comes from the characters added to it.
    pub fn word() -> Self {
        Self::new(ReferenceKind::Word)
    }

    /// Create a character with its measured bounds.
    pub fn char(text: impl Into<String>, bounds: PixelBounds) -> Self {
        Self {
            kind: ReferenceKind::Char,
            bounds: Some(bounds),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Set measured bounds and return self.
    pub fn with_bounds(mut self, bounds: PixelBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set explicit text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a child and return self.
    pub fn with_child(mut self, child: ReferenceNodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Add a child.
    pub fn add_child(&mut self, child: ReferenceNodeBuilder) {
        self.children.push(child);
    }
}

impl NodeBuilder for ReferenceNodeBuilder {
    type Node = ReferenceNode;

    fn build(self, size: PageSize, mode: ErrorMode) -> Result<ReferenceNode> {
        let kind = self.kind;

        // A word is all or nothing: a bad character fails the whole word
        let child_mode = if kind == ReferenceKind::Word {
            ErrorMode::Strict
        } else {
            mode
        };
        let children = build_children(self.children, size, child_mode, kind.as_str())?;

        let text = match kind {
            ReferenceKind::Char => match self.text {
                Some(text) => Some(text),
                None => return Err(Error::malformed(kind.as_str(), "missing text")),
            },
            ReferenceKind::Word => Some(word_text(self.text, &children)?),
            _ => None,
        };

        let measured = match self.bounds {
            None if kind == ReferenceKind::Page && children.is_empty() => {
                Some(empty_page_bounds(size))
            }
            bounds => bounds,
        };
        let bounds = resolve_bounds(measured.as_ref(), &children, size, kind.as_str())?;

        Ok(ReferenceNode {
            kind,
            bounds,
            text,
            children,
        })
    }
}

/// Text of a word: the concatenation of its characters, or the explicit
/// text for a word without characters.
fn word_text(explicit: Option<String>, chars: &[ReferenceNode]) -> Result<String> {
    let text = if chars.is_empty() {
        explicit.unwrap_or_default()
    } else {
        let joined: String = chars.iter().filter_map(|c| c.text()).collect();
        if let Some(explicit) = explicit.filter(|t| *t != joined) {
            log::warn!(
                "Word text {:?} disagrees with its characters {:?}, using the characters",
                explicit,
                joined
            );
        }
        joined
    };

    if text.is_empty() {
        return Err(Error::malformed("word", "word has no text"));
    }
    Ok(text)
}

/// Finalized reference node.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceNode {
    kind: ReferenceKind,
    bounds: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ReferenceNode>,
}

impl ReferenceNode {
    /// Node kind.
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }
}

impl DocumentNode for ReferenceNode {
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
        self.kind == ReferenceKind::Word
    }
}
