//! JSON rendering for accuracy reports.

use crate::error::{Error, Result};
use crate::eval::CorpusReport;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a report to JSON.
pub fn to_json(report: &CorpusReport, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
        JsonFormat::Compact => serde_json::to_string(report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{EvalOptions, PageAccumulator};

    fn report() -> CorpusReport {
        let mut page = PageAccumulator::new(&EvalOptions::default());
        page.record_pair("cat", Some("car"), 0.9);
        let empty = PageAccumulator::new(&EvalOptions::default());
        CorpusReport::new(vec![page.finish(1), empty.finish(2)], 0)
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&report(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"average_iou\""));
        assert!(json.contains("\"undefined\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&report(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pages"][0]["total_words"], 1);
        assert_eq!(value["pages"][1]["average_cer"]["status"], "undefined");
        assert_eq!(value["summary"]["page_count"], 2);
    }

    #[test]
    fn test_report_round_trips() {
        let original = report();
        let json = to_json(&original, JsonFormat::Compact).unwrap();
        let decoded: CorpusReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }
}
