//! Evaluation options and configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// IOU a word pair must exceed before its text is scored.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.3;

/// Options for comparing a candidate document against a reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Pairs with IOU above this are scored for character errors
    pub threshold: f64,

    /// Error handling mode while finalizing trees
    pub error_mode: ErrorMode,

    /// What to do when the documents have different page counts
    pub page_mismatch: PageMismatch,

    /// Whether to score page pairs in parallel
    pub parallel: bool,

    /// Apply Unicode NFC to both texts before computing edit distance
    pub normalize_unicode: bool,
}

impl EvalOptions {
    /// Create new evaluation options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the IOU acceptance threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (drop malformed nodes).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the page mismatch policy.
    pub fn with_page_mismatch(mut self, policy: PageMismatch) -> Self {
        self.page_mismatch = policy;
        self
    }

    /// Fail when the page counts differ.
    pub fn fail_on_page_mismatch(mut self) -> Self {
        self.page_mismatch = PageMismatch::Fail;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable Unicode normalization of word text.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Check that the options can be used for scoring.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_IOU_THRESHOLD,
            error_mode: ErrorMode::Strict,
            page_mismatch: PageMismatch::Truncate,
            parallel: true,
            normalize_unicode: false,
        }
    }
}

/// Error handling mode while finalizing trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Fail on any malformed node
    #[default]
    Strict,
    /// Drop malformed subtrees and continue
    Lenient,
}

/// Policy for documents with different page counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMismatch {
    /// Pair pages by position up to the shorter document and warn
    #[default]
    Truncate,
    /// Refuse to compare
    Fail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_options_builder() {
        let options = EvalOptions::new()
            .with_threshold(0.5)
            .lenient()
            .fail_on_page_mismatch()
            .sequential()
            .with_unicode_normalization(true);

        assert_eq!(options.threshold, 0.5);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.page_mismatch, PageMismatch::Fail);
        assert!(!options.parallel);
        assert!(options.normalize_unicode);
    }

    #[test]
    fn test_default_options() {
        let options = EvalOptions::default();
        assert_eq!(options.threshold, 0.3);
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.page_mismatch, PageMismatch::Truncate);
        assert!(options.parallel);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_threshold_validation() {
        assert!(EvalOptions::new().with_threshold(0.0).validate().is_ok());
        assert!(EvalOptions::new().with_threshold(1.0).validate().is_ok());
        assert!(matches!(
            EvalOptions::new().with_threshold(1.5).validate(),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(EvalOptions::new()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_options_from_json_uses_defaults() {
        let options: EvalOptions = serde_json::from_str(r#"{"threshold": 0.5}"#).unwrap();
        assert_eq!(options.threshold, 0.5);
        assert!(options.parallel);
        assert_eq!(options.page_mismatch, PageMismatch::Truncate);
    }
}
