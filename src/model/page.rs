//! Page-level types.

use serde::{Deserialize, Serialize};

use super::geometry::PageSize;
use super::node::{DocumentNode, NodeBuilder};
use crate::error::{Error, Result};
use crate::eval::ErrorMode;

/// A single finalized page: one tree root plus the page's declared size.
#[derive(Debug, Clone, Serialize)]
pub struct Page<N> {
    number: u32,
    width: f64,
    height: f64,
    root: N,
}

impl<N: DocumentNode> Page<N> {
    /// Page number (1-indexed).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Page width in source pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Page height in source pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Page dimensions used for normalization.
    pub fn size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }

    /// Root node of the page tree.
    pub fn root(&self) -> &N {
        &self.root
    }

    /// Top-level regions (coarse blocks) of the page.
    pub fn regions(&self) -> &[N] {
        self.root.children()
    }

    /// Number of word leaves on the page.
    pub fn word_count(&self) -> usize {
        self.root.words().len()
    }

    /// Check if the page has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions().is_empty()
    }
}

/// A page before its tree is finalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBuilder<B> {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in source pixels
    pub width: f64,

    /// Page height in source pixels
    pub height: f64,

    /// Root node of the page tree
    pub root: B,
}

impl<B: NodeBuilder> PageBuilder<B> {
    /// Create a page builder.
    pub fn new(number: u32, width: f64, height: f64, root: B) -> Self {
        Self {
            number,
            width,
            height,
            root,
        }
    }

    /// Finalize the page tree against the page's size.
    pub fn build(self, mode: ErrorMode) -> Result<Page<B::Node>> {
        let size = PageSize::new(self.width, self.height);
        if !size.is_valid() {
            return Err(Error::InvalidPageSize {
                page: self.number,
                width: self.width,
                height: self.height,
            });
        }

        let root = self.root.build(size, mode)?;
        Ok(Page {
            number: self.number,
            width: self.width,
            height: self.height,
            root,
        })
    }
}
