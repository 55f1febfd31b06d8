use crate::models::{DraftReport, OptimizationCategory};

/// Validation outcome for a draft report.
#[derive(Debug, Clone)]
pub struct ReportValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ReportValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

/// Parse raw backend text into a draft report and check every schema
/// invariant. On failure the error string lists everything wrong, suitable
/// for embedding in the repair prompt.
pub fn parse_and_validate(raw: &str) -> Result<DraftReport, String> {
    let json = extract_json(raw);

    let draft: DraftReport = serde_json::from_str(json)
        .map_err(|e| format!("reply is not valid JSON matching the schema: {}", e))?;

    let validation = validate_draft(&draft);
    if validation.is_valid {
        Ok(draft)
    } else {
        Err(validation.errors.join("; "))
    }
}

/// Validate a parsed draft against the output contract.
///
/// Mirrors the data-model invariants exactly: score range, non-empty strings,
/// category membership, impact range. Unknown extra fields were already
/// dropped during deserialization.
pub fn validate_draft(draft: &DraftReport) -> ReportValidation {
    let mut errors = Vec::new();

    match draft.summary.overall_score {
        None => errors.push("summary.overall_score is missing".to_string()),
        Some(score) => {
            if !score.is_finite() || !(0.0..=10.0).contains(&score) {
                errors.push(format!(
                    "summary.overall_score {} is outside [0, 10]",
                    score
                ));
            }
        }
    }

    for (index, entry) in draft.summary.strengths.iter().enumerate() {
        if entry.trim().is_empty() {
            errors.push(format!("summary.strengths[{}] is empty", index));
        }
    }
    for (index, entry) in draft.summary.weaknesses.iter().enumerate() {
        if entry.trim().is_empty() {
            errors.push(format!("summary.weaknesses[{}] is empty", index));
        }
    }

    for (index, opt) in draft.optimizations.iter().enumerate() {
        if OptimizationCategory::parse(&opt.category).is_none() {
            errors.push(format!(
                "optimizations[{}].category \"{}\" is not one of the allowed categories",
                index, opt.category
            ));
        }
        if opt.issue.trim().is_empty() {
            errors.push(format!("optimizations[{}].issue is empty", index));
        }
        if opt.suggestion.trim().is_empty() {
            errors.push(format!("optimizations[{}].suggestion is empty", index));
        }
        if let Some(impact) = opt.impact {
            if !impact.is_finite() || !(0.0..=1.0).contains(&impact) {
                errors.push(format!(
                    "optimizations[{}].impact {} is outside [0, 1]",
                    index, impact
                ));
            }
        }
    }

    if errors.is_empty() {
        ReportValidation::valid()
    } else {
        ReportValidation::invalid(errors)
    }
}

/// Pull the JSON object out of a reply that may wrap it in a markdown fence
/// or surrounding prose. Returns the input unchanged when no wrapping is
/// detected.
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.strip_prefix("```json").or_else(|| trimmed.strip_prefix("```")) {
        if let Some(inner) = rest.rsplit_once("```") {
            return inner.0.trim();
        }
    }

    if !trimmed.starts_with('{') {
        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if start < end {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}
