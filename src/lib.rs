//! # ocreval
//!
//! Geometry-aware accuracy evaluation of OCR output.
//!
//! A candidate transcription (OCR engine output, hOCR-shaped) is scored
//! against a reference transcription (structured, presumed accurate). Words
//! are paired by bounding-box overlap and each pair contributes its IOU and,
//! when the boxes agree well enough, its character error rate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocreval::{compare_json, render, JsonFormat};
//!
//! fn main() -> ocreval::Result<()> {
//!     let reference = std::fs::read_to_string("reference.json").unwrap();
//!     let candidate = std::fs::read_to_string("candidate.json").unwrap();
//!
//!     let report = compare_json(&reference, &candidate)?;
//!     println!("{}", render::to_json(&report, JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Normalized geometry**: boxes are mapped to a 0-1000 page space
//! - **Greedy word pairing**: best IOU per reference word, ties to the first
//! - **Explicit degenerate metrics**: empty denominators report `undefined`
//! - **Parallel processing**: uses Rayon for multi-page documents

pub mod error;
pub mod eval;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use eval::{
    compare_documents, compare_page, CorpusReport, CorpusSummary, ErrorMode, EvalOptions, Metric,
    PageMismatch, PageReport, DEFAULT_IOU_THRESHOLD,
};
pub use model::{
    BoundingBox, CandidateDocument, CandidateDocumentBuilder, CandidateKind, CandidateNode,
    CandidateNodeBuilder, Document, DocumentBuilder, DocumentNode, NodeBuilder, Page, PageBuilder,
    PageSize, PixelBounds, ReferenceDocument, ReferenceDocumentBuilder, ReferenceKind,
    ReferenceNode, ReferenceNodeBuilder,
};
pub use render::JsonFormat;

/// Compare a candidate document against a reference with default options.
///
/// # Example
///
/// ```
/// use ocreval::{compare, CandidateDocument, ReferenceDocument};
///
/// let report = compare(&ReferenceDocument::new(), &CandidateDocument::new()).unwrap();
/// assert!(report.pages.is_empty());
/// ```
pub fn compare<R, C>(reference: &Document<R>, candidate: &Document<C>) -> Result<CorpusReport>
where
    R: DocumentNode + Sync,
    C: DocumentNode + Sync,
{
    compare_documents(reference, candidate, &EvalOptions::default())
}

/// Compare a candidate document against a reference with custom options.
///
/// # Example
///
/// ```no_run
/// use ocreval::{compare_with_options, EvalOptions};
/// # let reference = ocreval::ReferenceDocument::new();
/// # let candidate = ocreval::CandidateDocument::new();
///
/// let options = EvalOptions::new()
///     .with_threshold(0.5)
///     .fail_on_page_mismatch();
/// let report = compare_with_options(&reference, &candidate, &options).unwrap();
/// ```
pub fn compare_with_options<R, C>(
    reference: &Document<R>,
    candidate: &Document<C>,
    options: &EvalOptions,
) -> Result<CorpusReport>
where
    R: DocumentNode + Sync,
    C: DocumentNode + Sync,
{
    compare_documents(reference, candidate, options)
}

/// Decode, finalize and compare two documents given as JSON.
///
/// `reference` decodes to a [`ReferenceDocumentBuilder`] and `candidate`
/// to a [`CandidateDocumentBuilder`].
pub fn compare_json(reference: &str, candidate: &str) -> Result<CorpusReport> {
    Evaluator::new().compare_json(reference, candidate)
}

/// Builder for configuring and running an evaluation.
///
/// # Example
///
/// ```no_run
/// use ocreval::Evaluator;
/// # let reference = "{}";
/// # let candidate = "{}";
///
/// let report = Evaluator::new()
///     .with_threshold(0.5)
///     .lenient()
///     .sequential()
///     .compare_json(reference, candidate)?;
/// # Ok::<(), ocreval::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvalOptions,
}

impl Evaluator {
    /// Create a new evaluator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator from existing options.
    pub fn with_options(options: EvalOptions) -> Self {
        Self { options }
    }

    /// Set the IOU acceptance threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.options = self.options.with_threshold(threshold);
        self
    }

    /// Fail on malformed tree nodes.
    pub fn strict(mut self) -> Self {
        self.options = self.options.with_error_mode(ErrorMode::Strict);
        self
    }

    /// Drop malformed tree nodes and continue.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Fail when the documents have different page counts.
    pub fn fail_on_page_mismatch(mut self) -> Self {
        self.options = self.options.fail_on_page_mismatch();
        self
    }

    /// Apply Unicode NFC before computing character errors.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.options = self.options.with_unicode_normalization(normalize);
        self
    }

    /// Get the configured options.
    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Compare two finalized documents.
    pub fn compare<R, C>(
        &self,
        reference: &Document<R>,
        candidate: &Document<C>,
    ) -> Result<CorpusReport>
    where
        R: DocumentNode + Sync,
        C: DocumentNode + Sync,
    {
        compare_documents(reference, candidate, &self.options)
    }

    /// Finalize two document builders and compare them.
    pub fn compare_builders<R, C>(
        &self,
        reference: DocumentBuilder<R>,
        candidate: DocumentBuilder<C>,
    ) -> Result<CorpusReport>
    where
        R: NodeBuilder,
        C: NodeBuilder,
        R::Node: Sync,
        C::Node: Sync,
    {
        self.options.validate()?;
        let reference = reference.build(self.options.error_mode)?;
        let candidate = candidate.build(self.options.error_mode)?;
        self.compare(&reference, &candidate)
    }

    /// Decode two documents from JSON, finalize and compare them.
    pub fn compare_json(&self, reference: &str, candidate: &str) -> Result<CorpusReport> {
        let reference = ReferenceDocumentBuilder::from_json(reference)?;
        let candidate = CandidateDocumentBuilder::from_json(candidate)?;
        self.compare_builders(reference, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = r#"{
        "pages": [{
            "number": 1, "width": 2000, "height": 2000,
            "root": {"kind": "page", "children": [
                {"kind": "paragraph", "children": [
                    {"kind": "line", "children": [
                        {"kind": "word", "children": [
                            {"kind": "char", "text": "o", "bounds": {"left": 200, "top": 200, "right": 260, "bottom": 240}},
                            {"kind": "char", "text": "k", "bounds": {"left": 260, "top": 200, "right": 320, "bottom": 240}}
                        ]}
                    ]}
                ]}
            ]}
        }]
    }"#;

    const CANDIDATE: &str = r#"{
        "pages": [{
            "number": 1, "width": 2000, "height": 2000,
            "root": {"kind": "ocr_page", "bounds": {"left": 0, "top": 0, "right": 2000, "bottom": 2000}, "children": [
                {"kind": "ocr_carea", "bounds": {"left": 200, "top": 200, "right": 320, "bottom": 240}, "children": [
                    {"kind": "ocrx_word", "text": "ok", "confidence": 93,
                     "bounds": {"left": 200, "top": 200, "right": 320, "bottom": 240}}
                ]}
            ]}
        }]
    }"#;

    #[test]
    fn test_evaluator_builder() {
        let evaluator = Evaluator::new()
            .with_threshold(0.5)
            .lenient()
            .sequential()
            .fail_on_page_mismatch()
            .with_unicode_normalization(true);

        let options = evaluator.options();
        assert_eq!(options.threshold, 0.5);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.page_mismatch, PageMismatch::Fail);
        assert!(!options.parallel);
        assert!(options.normalize_unicode);

        assert_eq!(evaluator.strict().options().error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_evaluator_default() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.options().threshold, DEFAULT_IOU_THRESHOLD);
        assert!(evaluator.options().parallel);
    }

    #[test]
    fn test_compare_json_exact_match() {
        let report = compare_json(REFERENCE, CANDIDATE).unwrap();
        let page = &report.pages[0];
        assert_eq!(page.total_words, 1);
        assert_eq!(page.average_iou, Metric::Defined(1.0));
        assert_eq!(page.average_cer, Metric::Defined(0.0));
    }

    #[test]
    fn test_compare_json_invalid() {
        assert!(matches!(
            compare_json("not json", CANDIDATE),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_compare_json_rejects_bad_threshold() {
        let result = Evaluator::new()
            .with_threshold(2.0)
            .compare_json(REFERENCE, CANDIDATE);
        assert!(matches!(result, Err(Error::InvalidThreshold(_))));
    }

    #[test]
    fn test_compare_empty_documents() {
        let report = compare(&ReferenceDocument::new(), &CandidateDocument::new()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.summary.weighted_iou, Metric::Undefined);
    }

    #[test]
    fn test_compare_with_options_fails_on_mismatch() {
        let reference = ReferenceDocumentBuilder::from_json(REFERENCE)
            .unwrap()
            .build(ErrorMode::Strict)
            .unwrap();
        let options = EvalOptions::new().fail_on_page_mismatch();
        let result = compare_with_options(&reference, &CandidateDocument::new(), &options);
        assert!(matches!(result, Err(Error::PageCountMismatch { .. })));
    }
}
