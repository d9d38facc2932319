use serde::{Deserialize, Serialize};

/// Body of the analyze call: `{"text": ...}` carrying the input exactly as
/// typed. Validation happens on the trimmed text, but the payload is not
/// trimmed; whitespace context is part of what the classifier scores.
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
}

/// Successful classification. The service guarantees `sentiment`; everything
/// else is optional and tolerated as absent or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Analysis {
    pub sentiment: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub scores: Option<ScoreBreakdown>,
}

/// Per-class detail the backend attaches under `scores`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreBreakdown {
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
    #[serde(default)]
    pub compound: Option<f64>,
}

/// Error payload a well-behaved backend sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
}

/// Reply of the health route at the service origin.
#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl Analysis {
    /// Label as displayed: upper-cased.
    pub fn display_label(&self) -> String {
        self.sentiment.to_uppercase()
    }

    /// Compound score as displayed.
    pub fn display_score(&self) -> String {
        format_score(self.score)
    }
}

/// Four decimal places, or the fixed placeholder when the service sent no
/// usable number.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.4}", value),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_formats_to_four_decimals() {
        assert_eq!(format_score(Some(0.8765)), "0.8765");
        assert_eq!(format_score(Some(-0.05)), "-0.0500");
        assert_eq!(format_score(Some(0.0)), "0.0000");
    }

    #[test]
    fn missing_score_formats_as_placeholder() {
        assert_eq!(format_score(None), "N/A");
    }

    #[test]
    fn label_upper_cases() {
        let analysis = Analysis {
            sentiment: "positive".into(),
            score: Some(0.8765),
            scores: None,
        };
        assert_eq!(analysis.display_label(), "POSITIVE");
        assert_eq!(analysis.display_score(), "0.8765");
    }

    #[test]
    fn full_backend_body_parses() {
        let body = r#"{
            "sentiment": "negative",
            "score": -0.5719,
            "scores": {"neg": 0.571, "neu": 0.429, "pos": 0.0, "compound": -0.5719}
        }"#;
        let analysis: Analysis = serde_json::from_str(body).unwrap();
        assert_eq!(analysis.sentiment, "negative");
        assert_eq!(analysis.score, Some(-0.5719));
        let detail = analysis.scores.unwrap();
        assert_eq!(detail.neg, 0.571);
        assert_eq!(detail.compound, Some(-0.5719));
    }

    #[test]
    fn minimal_body_parses_without_detail() {
        let analysis: Analysis =
            serde_json::from_str(r#"{"sentiment": "neutral"}"#).unwrap();
        assert_eq!(analysis.score, None);
        assert!(analysis.scores.is_none());
        assert_eq!(analysis.display_score(), "N/A");
    }

    #[test]
    fn null_score_is_treated_as_absent() {
        let analysis: Analysis =
            serde_json::from_str(r#"{"sentiment": "neutral", "score": null}"#).unwrap();
        assert_eq!(analysis.display_score(), "N/A");
    }

    #[test]
    fn request_serializes_untrimmed_text() {
        let request = AnalyzeRequest { text: "  ok then  " };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"text":"  ok then  "}"#
        );
    }

    #[test]
    fn error_body_without_error_key_yields_empty_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "nope"}"#).unwrap();
        assert!(body.error.is_empty());
    }
}
