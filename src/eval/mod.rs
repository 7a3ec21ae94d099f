//! Scoring of candidate trees against reference trees.
//!
//! The pipeline per page is: filter region pairs by overlap, pair words
//! greedily by IOU, fold each pair into a [`PageAccumulator`], and finish
//! it into a [`PageReport`]. [`compare_documents`] runs that over page
//! pairs and rolls the pages up into a [`CorpusReport`].

mod aggregate;
mod compare;
mod options;
mod pairing;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{
    character_error_rate, CorpusReport, CorpusSummary, Metric, PageAccumulator, PageReport,
};
pub use compare::{compare_documents, compare_page};
pub use options::{ErrorMode, EvalOptions, PageMismatch, DEFAULT_IOU_THRESHOLD};
pub use pairing::{best_match, pair_regions, pair_words, WordMatch};
