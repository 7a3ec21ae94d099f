//! Page and corpus statistics.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use super::options::EvalOptions;
use super::pairing::WordMatch;
use crate::error::{Error, Result};
use crate::model::DocumentNode;

/// A ratio that is undefined when its denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric {
    /// The ratio has a value
    Defined(f64),
    /// The denominator was zero
    Undefined,
}

impl Metric {
    /// `numerator / denominator`, or `Undefined` for a zero denominator.
    pub fn ratio(numerator: f64, denominator: usize) -> Self {
        if denominator == 0 {
            Metric::Undefined
        } else {
            Metric::Defined(numerator / denominator as f64)
        }
    }

    /// The value, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Defined(v) => Some(*v),
            Metric::Undefined => None,
        }
    }

    /// Check if the metric has a value.
    pub fn is_defined(&self) -> bool {
        matches!(self, Metric::Defined(_))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Defined(v) => write!(f, "{:.*}", f.precision().unwrap_or(4), v),
            Metric::Undefined => write!(f, "undefined"),
        }
    }
}

/// Character error rate of `candidate` against `reference`.
///
/// Edit distance over the reference length in characters. Not clamped, so
/// it exceeds 1 when the candidate is much longer than a short reference.
/// Returns `None` for an empty reference.
pub fn character_error_rate(candidate: &str, reference: &str, normalize: bool) -> Option<f64> {
    if normalize {
        let candidate: String = candidate.nfc().collect();
        let reference: String = reference.nfc().collect();
        return raw_error_rate(&candidate, &reference);
    }
    raw_error_rate(candidate, reference)
}

fn raw_error_rate(candidate: &str, reference: &str) -> Option<f64> {
    let length = reference.chars().count();
    if length == 0 {
        return None;
    }
    Some(strsim::levenshtein(candidate, reference) as f64 / length as f64)
}

/// Running totals for one page.
///
/// Calling [`finish`](Self::finish) consumes the accumulator, so a page
/// can not receive more words once its report exists.
#[derive(Debug, Clone)]
pub struct PageAccumulator {
    threshold: f64,
    normalize_unicode: bool,
    total_words: usize,
    considered_words: usize,
    below_threshold_words: usize,
    iou_sum: f64,
    error_sum: f64,
}

impl PageAccumulator {
    /// Create an empty accumulator using the options' threshold.
    pub fn new(options: &EvalOptions) -> Self {
        Self {
            threshold: options.threshold,
            normalize_unicode: options.normalize_unicode,
            total_words: 0,
            considered_words: 0,
            below_threshold_words: 0,
            iou_sum: 0.0,
            error_sum: 0.0,
        }
    }

    /// Fold one pairing result into the totals.
    pub fn record<R, C>(&mut self, word: &WordMatch<'_, '_, R, C>)
    where
        R: DocumentNode,
        C: DocumentNode,
    {
        self.record_pair(
            word.reference.text_or_empty(),
            word.candidate.map(|c| c.text_or_empty()),
            word.iou,
        );
    }

    /// Fold one reference text, its candidate text and their IOU.
    pub fn record_pair(&mut self, reference: &str, candidate: Option<&str>, iou: f64) {
        self.total_words += 1;
        self.iou_sum += iou;

        let error = match candidate {
            Some(candidate) if iou > self.threshold => {
                character_error_rate(candidate, reference, self.normalize_unicode)
            }
            _ => None,
        };

        match error {
            Some(error) => {
                self.error_sum += error;
                self.considered_words += 1;
            }
            None => self.below_threshold_words += 1,
        }
    }

    /// Number of words recorded so far.
    pub fn total_words(&self) -> usize {
        self.total_words
    }

    /// Finalize the page.
    pub fn finish(self, page: u32) -> PageReport {
        let average_iou = Metric::ratio(self.iou_sum, self.total_words);
        let average_cer = Metric::ratio(self.error_sum, self.considered_words);

        if !average_iou.is_defined() {
            log::debug!("Page {}: no reference words, average IOU undefined", page);
        } else if !average_cer.is_defined() {
            log::debug!(
                "Page {}: no word above IOU threshold {}, average CER undefined",
                page,
                self.threshold
            );
        }

        PageReport {
            page,
            total_words: self.total_words,
            considered_words: self.considered_words,
            below_threshold_count: self.below_threshold_words,
            iou_sum: self.iou_sum,
            error_sum: self.error_sum,
            average_iou,
            average_cer,
        }
    }
}

/// Accuracy statistics for one page pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    /// Reference page number (1-indexed)
    pub page: u32,

    /// Words scored, including unpaired ones
    pub total_words: usize,

    /// Words whose IOU cleared the threshold
    pub considered_words: usize,

    /// Words at or below the threshold, unpaired words included
    pub below_threshold_count: usize,

    /// Sum of word IOUs
    pub iou_sum: f64,

    /// Sum of character error rates over considered words
    pub error_sum: f64,

    /// `iou_sum / total_words`
    pub average_iou: Metric,

    /// `error_sum / considered_words`
    pub average_cer: Metric,
}

impl PageReport {
    /// Average IOU, or `DegenerateInput` for a page without words.
    pub fn average_iou_value(&self) -> Result<f64> {
        self.average_iou.value().ok_or(Error::DegenerateInput {
            page: self.page,
            metric: "iou",
        })
    }

    /// Average CER, or `DegenerateInput` when no word cleared the threshold.
    pub fn average_cer_value(&self) -> Result<f64> {
        self.average_cer.value().ok_or(Error::DegenerateInput {
            page: self.page,
            metric: "cer",
        })
    }
}

/// Corpus-wide roll-up of page reports.
///
/// Both roll-ups are reported: `mean_page_*` averages the defined per-page
/// averages with equal weight per page, `weighted_*` pools the sums of all
/// pages so every word has equal weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Number of compared page pairs
    pub page_count: usize,

    /// Words scored across all pages
    pub total_words: usize,

    /// Words that cleared the threshold across all pages
    pub considered_words: usize,

    /// Words at or below the threshold across all pages
    pub below_threshold_count: usize,

    /// Mean of the defined per-page average IOUs
    pub mean_page_iou: Metric,

    /// Mean of the defined per-page average CERs
    pub mean_page_cer: Metric,

    /// Pooled IOU sum over pooled word count
    pub weighted_iou: Metric,

    /// Pooled error sum over pooled considered words
    pub weighted_cer: Metric,
}

impl CorpusSummary {
    /// Roll up page reports.
    pub fn from_pages(pages: &[PageReport]) -> Self {
        let mut total_words = 0;
        let mut considered_words = 0;
        let mut below_threshold_count = 0;
        let mut iou_sum = 0.0;
        let mut error_sum = 0.0;

        for page in pages {
            total_words += page.total_words;
            considered_words += page.considered_words;
            below_threshold_count += page.below_threshold_count;
            iou_sum += page.iou_sum;
            error_sum += page.error_sum;
        }

        Self {
            page_count: pages.len(),
            total_words,
            considered_words,
            below_threshold_count,
            mean_page_iou: mean_of_defined(pages.iter().map(|p| p.average_iou)),
            mean_page_cer: mean_of_defined(pages.iter().map(|p| p.average_cer)),
            weighted_iou: Metric::ratio(iou_sum, total_words),
            weighted_cer: Metric::ratio(error_sum, considered_words),
        }
    }
}

fn mean_of_defined(metrics: impl Iterator<Item = Metric>) -> Metric {
    let (sum, count) = metrics
        .filter_map(|m| m.value())
        .fold((0.0, 0), |(sum, count), v| (sum + v, count + 1));
    Metric::ratio(sum, count)
}

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    /// One report per compared page pair, in page order
    pub pages: Vec<PageReport>,

    /// Corpus-wide roll-up
    pub summary: CorpusSummary,

    /// Pages of the longer document left without a partner
    pub unmatched_pages: usize,
}

impl CorpusReport {
    /// Build a report and its summary from page reports.
    pub fn new(pages: Vec<PageReport>, unmatched_pages: usize) -> Self {
        let summary = CorpusSummary::from_pages(&pages);
        Self {
            pages,
            summary,
            unmatched_pages,
        }
    }

    /// Get the report for a reference page number.
    pub fn get_page(&self, page: u32) -> Option<&PageReport> {
        self.pages.iter().find(|p| p.page == page)
    }

    /// Check if no page pair was compared.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
