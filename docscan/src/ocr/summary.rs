use serde::Serialize;

use super::recognizer::TextRegion;

/// A recognized line as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct RecognitionLine {
    pub text: String,
    /// Engine certainty in `[0, 1]`, rounded to 4 decimals.
    pub confidence: f64,
}

/// Lines kept from one recognition pass plus their aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionSummary {
    pub lines: Vec<RecognitionLine>,
    /// Kept texts joined with `\n`, in recognition order.
    pub raw_text: String,
    /// Mean confidence of kept lines as a percentage, rounded to 2 decimals.
    pub average_confidence: f64,
}

impl RecognitionSummary {
    /// Trim every region, drop the empty ones and aggregate the rest.
    ///
    /// The average is computed from unrounded confidences.
    pub fn from_regions(regions: Vec<TextRegion>) -> Self {
        let mut lines = Vec::with_capacity(regions.len());
        let mut total_confidence = 0.0;

        for region in regions {
            let text = region.text.trim();
            if text.is_empty() {
                continue;
            }
            total_confidence += region.confidence;
            lines.push(RecognitionLine {
                text: text.to_string(),
                confidence: round_to(region.confidence, 4),
            });
        }

        let average_confidence = if lines.is_empty() {
            0.0
        } else {
            round_to(total_confidence / lines.len() as f64 * 100.0, 2)
        };

        let raw_text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            lines,
            raw_text,
            average_confidence,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::recognizer::BoundingBox;
    use pretty_assertions::assert_eq;

    fn region(text: &str, confidence: f64) -> TextRegion {
        TextRegion::new(BoundingBox::default(), text, confidence)
    }

    #[test]
    fn averages_kept_confidences() {
        let summary = RecognitionSummary::from_regions(vec![region("A", 0.9), region("B", 0.7)]);
        assert_eq!(summary.average_confidence, 80.0);
        assert_eq!(summary.raw_text, "A\nB");
    }

    #[test]
    fn trims_and_drops_empty_regions() {
        let summary = RecognitionSummary::from_regions(vec![
            region("  PASSPORT ", 0.95),
            region("   ", 0.10),
            region("", 0.20),
            region("\tUTOPIA\n", 0.85),
        ]);

        let texts: Vec<&str> = summary.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["PASSPORT", "UTOPIA"]);
        assert_eq!(summary.raw_text, "PASSPORT\nUTOPIA");
        assert_eq!(summary.average_confidence, 90.0);
    }

    #[test]
    fn empty_result_has_zero_confidence() {
        let summary = RecognitionSummary::from_regions(Vec::new());
        assert!(summary.lines.is_empty());
        assert_eq!(summary.raw_text, "");
        assert_eq!(summary.average_confidence, 0.0);
    }

    #[test]
    fn preserves_recognition_order() {
        let summary =
            RecognitionSummary::from_regions(vec![region("z", 0.1), region("a", 0.9), region("m", 0.5)]);
        assert_eq!(summary.raw_text, "z\na\nm");
    }

    #[test]
    fn rounds_line_and_average_confidence() {
        let summary =
            RecognitionSummary::from_regions(vec![region("x", 0.123456), region("y", 0.654322)]);
        assert_eq!(summary.lines[0].confidence, 0.1235);
        assert_eq!(summary.lines[1].confidence, 0.6543);
        assert_eq!(summary.average_confidence, 38.89);
    }
}
