//! Tree fixtures shared by the evaluation tests.
//!
//! Pages are `PAGE_SIZE` pixels square, so pixel coordinates and normalized
//! coordinates coincide.

use crate::model::{
    CandidateKind, CandidateNode, CandidateNodeBuilder, NodeBuilder, PageBuilder, PageSize,
    PixelBounds, ReferenceNode, ReferenceNodeBuilder,
};

use super::ErrorMode;

pub(crate) const PAGE_SIZE: f64 = 1000.0;

/// Reference word made of one character node per char, spanning exactly
/// the given box.
pub(crate) fn reference_word(text: &str, l: f64, t: f64, r: f64, b: f64) -> ReferenceNodeBuilder {
    let chars: Vec<char> = text.chars().collect();
    let step = (r - l) / chars.len() as f64;
    let mut word = ReferenceNodeBuilder::word();
    for (i, c) in chars.iter().enumerate() {
        let left = l + step * i as f64;
        let right = if i + 1 == chars.len() {
            r
        } else {
            l + step * (i + 1) as f64
        };
        word.add_child(ReferenceNodeBuilder::char(
            c.to_string(),
            PixelBounds::new(left, t, right, b),
        ));
    }
    word
}

pub(crate) fn candidate_word(text: &str, l: f64, t: f64, r: f64, b: f64) -> CandidateNodeBuilder {
    CandidateNodeBuilder::word(text, PixelBounds::new(l, t, r, b))
}

/// Paragraph holding one line of words; its box is derived.
pub(crate) fn reference_region(words: Vec<ReferenceNodeBuilder>) -> ReferenceNodeBuilder {
    let mut line = ReferenceNodeBuilder::line();
    for word in words {
        line.add_child(word);
    }
    ReferenceNodeBuilder::paragraph().with_child(line)
}

/// Content area holding one line of words; its box is derived.
pub(crate) fn candidate_region(words: Vec<CandidateNodeBuilder>) -> CandidateNodeBuilder {
    let mut line = CandidateNodeBuilder::unbounded(CandidateKind::Line);
    for word in words {
        line.add_child(word);
    }
    CandidateNodeBuilder::unbounded(CandidateKind::Area).with_child(line)
}

pub(crate) fn reference_page(
    number: u32,
    regions: Vec<ReferenceNodeBuilder>,
) -> PageBuilder<ReferenceNodeBuilder> {
    let mut root = ReferenceNodeBuilder::page();
    for region in regions {
        root.add_child(region);
    }
    PageBuilder::new(number, PAGE_SIZE, PAGE_SIZE, root)
}

pub(crate) fn candidate_page(
    number: u32,
    regions: Vec<CandidateNodeBuilder>,
) -> PageBuilder<CandidateNodeBuilder> {
    let mut root = CandidateNodeBuilder::new(
        CandidateKind::Page,
        PixelBounds::new(0.0, 0.0, PAGE_SIZE, PAGE_SIZE),
    );
    for region in regions {
        root.add_child(region);
    }
    PageBuilder::new(number, PAGE_SIZE, PAGE_SIZE, root)
}

pub(crate) fn build_reference(node: ReferenceNodeBuilder) -> ReferenceNode {
    node.build(PageSize::new(PAGE_SIZE, PAGE_SIZE), ErrorMode::Strict)
        .expect("reference fixture is well-formed")
}

pub(crate) fn build_candidate(node: CandidateNodeBuilder) -> CandidateNode {
    node.build(PageSize::new(PAGE_SIZE, PAGE_SIZE), ErrorMode::Strict)
        .expect("candidate fixture is well-formed")
}
