//! Node interface shared by reference and candidate trees.
//!
//! The two trees come from different engines and nest words differently:
//! reference words are built from character nodes, candidate words are
//! direct leaves. Both expose the same two capabilities through
//! [`DocumentNode`], which is all the scoring core relies on.

use super::geometry::{BoundingBox, PageSize, PixelBounds};
use crate::error::{Error, Result};
use crate::eval::ErrorMode;

/// A finalized, immutable node of a document tree.
pub trait DocumentNode: Sized {
    /// Human-readable kind name, used in logs and errors.
    fn kind_name(&self) -> &'static str;

    /// Bounding box in normalized page space.
    fn bounds(&self) -> &BoundingBox;

    /// Owned children in document order.
    fn children(&self) -> &[Self];

    /// Recognized text; present on word and character leaves.
    fn text(&self) -> Option<&str>;

    /// Whether this node is the atomic scoring unit.
    fn is_word(&self) -> bool;

    /// Word leaves of this subtree, depth-first and left to right.
    ///
    /// Traversal stops at a word, so characters inside a word are never
    /// visited.
    fn words(&self) -> Vec<&Self> {
        let mut words = Vec::new();
        collect_words(self, &mut words);
        words
    }

    /// Text of this node, or the empty string.
    fn text_or_empty(&self) -> &str {
        self.text().unwrap_or_default()
    }
}

fn collect_words<'a, N: DocumentNode>(node: &'a N, words: &mut Vec<&'a N>) {
    if node.is_word() {
        words.push(node);
        return;
    }
    for child in node.children() {
        collect_words(child, words);
    }
}

/// Phase-one tree node that can be finalized into a [`DocumentNode`].
///
/// Finalizing resolves every box into normalized space, derives missing
/// composite boxes from children, and fills in word text. The result never
/// changes afterwards.
pub trait NodeBuilder {
    /// Finalized node type.
    type Node: DocumentNode;

    /// Finalize this subtree against its page size.
    fn build(self, size: PageSize, mode: ErrorMode) -> Result<Self::Node>;
}

/// Finalize children in order, dropping malformed ones in lenient mode.
pub(crate) fn build_children<B: NodeBuilder>(
    children: Vec<B>,
    size: PageSize,
    mode: ErrorMode,
    parent: &str,
) -> Result<Vec<B::Node>> {
    let mut built = Vec::with_capacity(children.len());
    for child in children {
        match child.build(size, mode) {
            Ok(node) => built.push(node),
            Err(e) if mode == ErrorMode::Lenient => {
                log::warn!("Dropping malformed child of {} node: {}", parent, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(built)
}

/// Full-page bounds for a page root that has neither bounds nor children.
pub(crate) fn empty_page_bounds(size: PageSize) -> PixelBounds {
    PixelBounds::new(0.0, 0.0, size.width, size.height)
}

/// Normalize measured bounds, or derive them as the union of the children.
pub(crate) fn resolve_bounds<N: DocumentNode>(
    measured: Option<&PixelBounds>,
    children: &[N],
    size: PageSize,
    kind: &str,
) -> Result<BoundingBox> {
    match measured {
        Some(bounds) if !bounds.is_finite() => {
            Err(Error::malformed(kind, "bounds contain non-finite values"))
        }
        Some(bounds) => Ok(BoundingBox::normalize(bounds, size)),
        None => BoundingBox::union(children.iter().map(|child| child.bounds()))
            .ok_or_else(|| Error::malformed(kind, "no bounds and no children to derive them from")),
    }
}
