//! Page and document comparison.

use rayon::prelude::*;

use super::aggregate::{CorpusReport, PageAccumulator, PageReport};
use super::options::{EvalOptions, PageMismatch};
use super::pairing::pair_regions;
use crate::error::{Error, Result};
use crate::model::{Document, DocumentNode, Page};

/// Score one candidate page against its reference page.
///
/// Every reference region is paired against each candidate region it
/// overlaps. Words are only scored inside overlapping region pairs, so a
/// reference region that overlaps no candidate region contributes nothing.
pub fn compare_page<R, C>(
    reference: &Page<R>,
    candidate: &Page<C>,
    options: &EvalOptions,
) -> PageReport
where
    R: DocumentNode,
    C: DocumentNode,
{
    let mut accumulator = PageAccumulator::new(options);

    for region in reference.regions() {
        for other in candidate.regions() {
            if !region.bounds().overlaps(other.bounds()) {
                continue;
            }

            let matches = pair_regions(region, other);
            log::debug!(
                "Page {}: {} region vs {} region, {} of {} words paired",
                reference.number(),
                region.kind_name(),
                other.kind_name(),
                matches.iter().filter(|m| m.is_paired()).count(),
                matches.len()
            );
            for word in &matches {
                accumulator.record(word);
            }
        }
    }

    accumulator.finish(reference.number())
}

/// Score a candidate document against a reference document.
///
/// Pages are paired by position. Extra pages on either side are handled
/// according to [`EvalOptions::page_mismatch`].
pub fn compare_documents<R, C>(
    reference: &Document<R>,
    candidate: &Document<C>,
    options: &EvalOptions,
) -> Result<CorpusReport>
where
    R: DocumentNode + Sync,
    C: DocumentNode + Sync,
{
    options.validate()?;

    let reference_pages = reference.page_count();
    let candidate_pages = candidate.page_count();
    if reference_pages != candidate_pages {
        match options.page_mismatch {
            PageMismatch::Fail => {
                return Err(Error::PageCountMismatch {
                    reference: reference_pages,
                    candidate: candidate_pages,
                });
            }
            PageMismatch::Truncate => {
                log::warn!(
                    "Page count mismatch: reference has {} pages, candidate has {}; comparing the first {}",
                    reference_pages,
                    candidate_pages,
                    reference_pages.min(candidate_pages)
                );
            }
        }
    }

    let pages: Vec<PageReport> = if options.parallel {
        reference
            .pages()
            .par_iter()
            .zip(candidate.pages().par_iter())
            .map(|(r, c)| compare_page(r, c, options))
            .collect()
    } else {
        reference
            .pages()
            .iter()
            .zip(candidate.pages())
            .map(|(r, c)| compare_page(r, c, options))
            .collect()
    };

    Ok(CorpusReport::new(
        pages,
        reference_pages.abs_diff(candidate_pages),
    ))
}
