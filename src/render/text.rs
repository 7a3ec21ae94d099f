//! Plain text rendering for accuracy reports.

use std::fmt::Write;

use crate::error::{Error, Result};
use crate::eval::{CorpusReport, PageReport};

/// Convert a report to a human-readable summary.
///
/// One line per page, followed by the corpus roll-up. Undefined averages
/// are printed as `undefined`.
pub fn to_text(report: &CorpusReport) -> Result<String> {
    write_report(report).map_err(|e| Error::Render(format!("text formatting error: {}", e)))
}

fn write_report(report: &CorpusReport) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();

    for page in &report.pages {
        write_page(&mut out, page)?;
    }
    if !report.pages.is_empty() {
        out.push('\n');
    }

    let summary = &report.summary;
    writeln!(
        out,
        "Summary: {} pages, {} words ({} considered, {} below threshold)",
        summary.page_count,
        summary.total_words,
        summary.considered_words,
        summary.below_threshold_count
    )?;
    writeln!(out, "  mean page IOU: {}", summary.mean_page_iou)?;
    writeln!(out, "  mean page CER: {}", summary.mean_page_cer)?;
    writeln!(out, "  weighted IOU:  {}", summary.weighted_iou)?;
    writeln!(out, "  weighted CER:  {}", summary.weighted_cer)?;
    if report.unmatched_pages > 0 {
        writeln!(out, "  unmatched pages: {}", report.unmatched_pages)?;
    }

    Ok(out)
}

fn write_page(out: &mut String, page: &PageReport) -> std::fmt::Result {
    writeln!(
        out,
        "Page {}: {} words, {} considered, {} below threshold, IOU {}, CER {}",
        page.page,
        page.total_words,
        page.considered_words,
        page.below_threshold_count,
        page.average_iou,
        page.average_cer
    )
}
