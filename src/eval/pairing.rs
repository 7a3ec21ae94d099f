//! Greedy word pairing between a reference region and a candidate region.
//!
//! Every reference word is attributed to the candidate word it overlaps
//! best, independently of the other reference words. A candidate word may
//! therefore be the best match for several reference words.

use crate::model::DocumentNode;

/// Best candidate found for one reference word.
#[derive(Debug)]
pub struct WordMatch<'r, 'c, R, C> {
    /// The reference word
    pub reference: &'r R,

    /// Best overlapping candidate word, if any overlaps at all
    pub candidate: Option<&'c C>,

    /// IOU with the chosen candidate, `0.0` when unpaired
    pub iou: f64,
}

impl<'r, 'c, R, C> WordMatch<'r, 'c, R, C> {
    /// Check if a candidate was found.
    pub fn is_paired(&self) -> bool {
        self.candidate.is_some()
    }
}

/// Candidate with the highest IOU among those overlapping `reference`.
///
/// Candidates are scanned in document order and only a strictly higher IOU
/// replaces the current best, so ties go to the earliest candidate.
pub fn best_match<'c, R, C>(reference: &R, candidates: &[&'c C]) -> Option<(&'c C, f64)>
where
    R: DocumentNode,
    C: DocumentNode,
{
    let target = reference.bounds();
    let mut best: Option<(&'c C, f64)> = None;

    for &candidate in candidates {
        if !target.overlaps(candidate.bounds()) {
            continue;
        }
        let iou = target.iou(candidate.bounds());
        match best {
            Some((_, best_iou)) if iou <= best_iou => {}
            _ => best = Some((candidate, iou)),
        }
    }

    best
}

/// Pair every reference word with its best candidate word.
///
/// The result has one entry per reference word, in reference order.
pub fn pair_words<'r, 'c, R, C>(
    references: &[&'r R],
    candidates: &[&'c C],
) -> Vec<WordMatch<'r, 'c, R, C>>
where
    R: DocumentNode,
    C: DocumentNode,
{
    references
        .iter()
        .map(|&reference| match best_match(reference, candidates) {
            Some((candidate, iou)) => WordMatch {
                reference,
                candidate: Some(candidate),
                iou,
            },
            None => WordMatch {
                reference,
                candidate: None,
                iou: 0.0,
            },
        })
        .collect()
}

/// Extract the words of both regions and pair them.
pub fn pair_regions<'r, 'c, R, C>(
    reference: &'r R,
    candidate: &'c C,
) -> Vec<WordMatch<'r, 'c, R, C>>
where
    R: DocumentNode,
    C: DocumentNode,
{
    pair_words(&reference.words(), &candidate.words())
}
