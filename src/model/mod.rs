//! Document tree types for reference and candidate transcriptions.
//!
//! Trees are built in two phases. Tree builders assemble mutable
//! `*NodeBuilder` values (or decode them from JSON); `build` then finalizes
//! them into immutable nodes whose boxes are normalized and whose composite
//! bounds and word texts are resolved once. The scoring core only ever sees
//! finalized trees through the [`DocumentNode`] trait.

mod candidate;
mod document;
mod geometry;
mod node;
mod page;
mod reference;

pub use candidate::{CandidateKind, CandidateNode, CandidateNodeBuilder, MAX_CONFIDENCE};
pub use document::{
    CandidateDocument, CandidateDocumentBuilder, Document, DocumentBuilder, ReferenceDocument,
    ReferenceDocumentBuilder,
};
pub use geometry::{BoundingBox, PageSize, PixelBounds, NORMALIZED_SCALE};
pub use node::{DocumentNode, NodeBuilder};
pub use page::{Page, PageBuilder};
pub use reference::{ReferenceKind, ReferenceNode, ReferenceNodeBuilder};
