use serde::Deserialize;

/// Deserialization target for the raw backend reply.
///
/// Deliberately loose: string categories, float score, every field defaulted.
/// Unknown extra fields are ignored for forward compatibility with rubric
/// changes. Nothing past the validator ever sees this type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftReport {
    /// Backend's echo of the id; never trusted, always overwritten on assembly
    #[serde(default)]
    pub presentation_id: Option<String>,
    #[serde(default)]
    pub summary: DraftSummary,
    #[serde(default)]
    pub optimizations: Vec<DraftOptimization>,
    #[serde(default)]
    pub overall_recommendations: DraftRecommendations,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftSummary {
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftOptimization {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub impact: Option<f64>,
    #[serde(default)]
    pub example_before: Option<String>,
    #[serde(default)]
    pub example_after: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftRecommendations {
    #[serde(default)]
    pub estimated_improvement: Option<String>,
    #[serde(default)]
    pub action_priority: Vec<String>,
}

impl DraftReport {
    /// Whether any optimization carries an impact score.
    pub fn has_impact_scores(&self) -> bool {
        self.optimizations.iter().any(|o| o.impact.is_some())
    }
}
