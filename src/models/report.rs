use serde::{Deserialize, Serialize};

/// Output contract version, carried on every report.
pub const REPORT_VERSION: &str = "1.0.0";

/// Fallback improvement estimate when the backend omits one.
pub const DEFAULT_ESTIMATED_IMPROVEMENT: &str =
    "Applying the listed optimizations is expected to raise the overall score by 1-2 points.";

/// Optimization categories - restricted enum to reduce hallucination.
///
/// Declaration order doubles as the tie-break priority when ranking
/// optimizations with equal impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationCategory {
    Delivery,
    Confidence,
    Content,
    Structure,
    Pacing,
}

impl OptimizationCategory {
    /// All allowed categories, in priority order.
    pub const ALL: [OptimizationCategory; 5] = [
        OptimizationCategory::Delivery,
        OptimizationCategory::Confidence,
        OptimizationCategory::Content,
        OptimizationCategory::Structure,
        OptimizationCategory::Pacing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationCategory::Delivery => "delivery",
            OptimizationCategory::Confidence => "confidence",
            OptimizationCategory::Content => "content",
            OptimizationCategory::Structure => "structure",
            OptimizationCategory::Pacing => "pacing",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == raw)
    }

    /// Rank within the declaration order, used as a stable sort tie-break.
    pub fn priority(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(Self::ALL.len())
    }
}

/// A single ranked, actionable optimization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Optimization {
    pub category: OptimizationCategory,
    pub issue: String,
    pub suggestion: String,
    /// Estimated impact (0-1) when the backend supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<f64>,
    /// Illustrative quote from the transcript, when the backend supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_before: Option<String>,
    /// Suggested rewording of that quote
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_after: Option<String>,
}

/// Scored summary of the presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Integer score, 0-10 inclusive
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Overall improvement recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub estimated_improvement: String,
    /// Category names in suggested order of attack, when the backend
    /// supplied them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_priority: Vec<String>,
}

/// The final feedback report. Assembled once per request, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub presentation_id: String,
    pub summary: Summary,
    /// Most impactful first
    pub optimizations: Vec<Optimization>,
    pub overall_recommendations: Recommendations,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in OptimizationCategory::ALL {
            assert_eq!(
                OptimizationCategory::parse(category.as_str()),
                Some(category)
            );
        }
        assert_eq!(OptimizationCategory::parse("charisma"), None);
    }

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&OptimizationCategory::Pacing).unwrap();
        assert_eq!(json, "\"pacing\"");

        let parsed: OptimizationCategory = serde_json::from_str("\"delivery\"").unwrap();
        assert_eq!(parsed, OptimizationCategory::Delivery);
    }

    #[test]
    fn test_report_serializes_to_contract_shape() {
        let report = FeedbackReport {
            presentation_id: "PRES-1".to_string(),
            summary: Summary {
                overall_score: 7,
                strengths: vec!["Clear opening".to_string()],
                weaknesses: vec![],
            },
            optimizations: vec![Optimization {
                category: OptimizationCategory::Pacing,
                issue: "Rushed middle section".to_string(),
                suggestion: "Pause after each main point".to_string(),
                impact: Some(0.6),
                example_before: None,
                example_after: None,
            }],
            overall_recommendations: Recommendations {
                estimated_improvement: "7 -> 8".to_string(),
                action_priority: vec![],
            },
            version: REPORT_VERSION.to_string(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["presentation_id"], "PRES-1");
        assert_eq!(value["summary"]["overall_score"], 7);
        assert_eq!(value["optimizations"][0]["category"], "pacing");
        assert_eq!(value["overall_recommendations"]["estimated_improvement"], "7 -> 8");
    }
}
