use crate::models::{
    DraftReport, FeedbackReport, Optimization, OptimizationCategory, PresentationInput,
    Recommendations, Summary, DEFAULT_ESTIMATED_IMPROVEMENT, REPORT_VERSION,
};

/// Perform the final assembly stage: map a validated draft into the output
/// contract.
///
/// Pure and infallible; the draft has already passed validation. The caller's
/// `presentation_id` always overwrites whatever the backend echoed. When the
/// backend supplied impact scores the optimizations are stable-sorted most
/// impactful first; otherwise backend order is authoritative.
pub fn assemble(input: &PresentationInput, draft: DraftReport) -> FeedbackReport {
    let score = draft.summary.overall_score.unwrap_or(0.0);
    let overall_score = score.round().clamp(0.0, 10.0) as u8;

    let rank_by_impact = draft.has_impact_scores();

    let mut optimizations: Vec<Optimization> = draft
        .optimizations
        .into_iter()
        .filter_map(|opt| {
            OptimizationCategory::parse(&opt.category).map(|category| Optimization {
                category,
                issue: opt.issue,
                suggestion: opt.suggestion,
                impact: opt.impact,
                example_before: opt.example_before.filter(|s| !s.trim().is_empty()),
                example_after: opt.example_after.filter(|s| !s.trim().is_empty()),
            })
        })
        .collect();

    if rank_by_impact {
        optimizations.sort_by(|a, b| {
            let impact_a = a.impact.unwrap_or(0.0);
            let impact_b = b.impact.unwrap_or(0.0);
            impact_b
                .partial_cmp(&impact_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.priority().cmp(&b.category.priority()))
        });
    }

    let estimated_improvement = match draft.overall_recommendations.estimated_improvement {
        Some(text) if !text.trim().is_empty() => text,
        _ => DEFAULT_ESTIMATED_IMPROVEMENT.to_string(),
    };

    FeedbackReport {
        presentation_id: input.presentation_id.clone(),
        summary: Summary {
            overall_score,
            strengths: draft.summary.strengths,
            weaknesses: draft.summary.weaknesses,
        },
        optimizations,
        overall_recommendations: Recommendations {
            estimated_improvement,
            action_priority: draft.overall_recommendations.action_priority,
        },
        version: REPORT_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DraftOptimization, DraftRecommendations, DraftSummary, PresentationMetadata,
        TranscriptSegment,
    };

    fn input_with_id(id: &str) -> PresentationInput {
        PresentationInput {
            presentation_id: id.to_string(),
            segments: vec![TranscriptSegment {
                text: "hello".to_string(),
                start_time: 0.0,
                end_time: 1.0,
                confidence: None,
            }],
            metadata: PresentationMetadata::default(),
            duration_secs: 1.0,
        }
    }

    fn draft_opt(category: &str, issue: &str, impact: Option<f64>) -> DraftOptimization {
        DraftOptimization {
            category: category.to_string(),
            issue: issue.to_string(),
            suggestion: format!("fix: {}", issue),
            impact,
            ..Default::default()
        }
    }

    #[test]
    fn test_presentation_id_always_overwritten() {
        let draft = DraftReport {
            presentation_id: Some("WRONG-ID".to_string()),
            summary: DraftSummary {
                overall_score: Some(7.0),
                ..Default::default()
            },
            ..Default::default()
        };

        let report = assemble(&input_with_id("PRES-2025-001"), draft);
        assert_eq!(report.presentation_id, "PRES-2025-001");
    }

    #[test]
    fn test_fractional_score_rounds_to_integer() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(7.6),
                ..Default::default()
            },
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        assert_eq!(report.summary.overall_score, 8);
    }

    #[test]
    fn test_impact_ranking_most_impactful_first() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(6.0),
                ..Default::default()
            },
            optimizations: vec![
                draft_opt("pacing", "rushed", Some(0.3)),
                draft_opt("content", "thin evidence", Some(0.9)),
                draft_opt("delivery", "monotone", Some(0.6)),
            ],
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        let issues: Vec<&str> = report.optimizations.iter().map(|o| o.issue.as_str()).collect();
        assert_eq!(issues, vec!["thin evidence", "monotone", "rushed"]);
    }

    #[test]
    fn test_backend_order_preserved_without_impact_scores() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(6.0),
                ..Default::default()
            },
            optimizations: vec![
                draft_opt("pacing", "first", None),
                draft_opt("delivery", "second", None),
                draft_opt("content", "third", None),
            ],
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        let issues: Vec<&str> = report.optimizations.iter().map(|o| o.issue.as_str()).collect();
        assert_eq!(issues, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_equal_impact_tie_breaks_on_category_order() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(6.0),
                ..Default::default()
            },
            optimizations: vec![
                draft_opt("pacing", "pacing issue", Some(0.5)),
                draft_opt("delivery", "delivery issue", Some(0.5)),
            ],
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        assert_eq!(report.optimizations[0].category, OptimizationCategory::Delivery);
        assert_eq!(report.optimizations[1].category, OptimizationCategory::Pacing);
    }

    #[test]
    fn test_default_estimated_improvement_substituted() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(5.0),
                ..Default::default()
            },
            overall_recommendations: DraftRecommendations {
                estimated_improvement: None,
                ..Default::default()
            },
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        assert_eq!(
            report.overall_recommendations.estimated_improvement,
            DEFAULT_ESTIMATED_IMPROVEMENT
        );
        assert_eq!(report.version, REPORT_VERSION);
    }

    #[test]
    fn test_examples_and_action_priority_carried_through() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(6.0),
                ..Default::default()
            },
            optimizations: vec![DraftOptimization {
                category: "delivery".to_string(),
                issue: "filler words".to_string(),
                suggestion: "pause instead".to_string(),
                impact: None,
                example_before: Some("um, so, basically".to_string()),
                example_after: Some("next, the results".to_string()),
            }],
            overall_recommendations: DraftRecommendations {
                estimated_improvement: Some("6 -> 7".to_string()),
                action_priority: vec!["delivery".to_string(), "pacing".to_string()],
            },
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        assert_eq!(
            report.optimizations[0].example_before.as_deref(),
            Some("um, so, basically")
        );
        assert_eq!(
            report.optimizations[0].example_after.as_deref(),
            Some("next, the results")
        );
        assert_eq!(
            report.overall_recommendations.action_priority,
            vec!["delivery", "pacing"]
        );
    }

    #[test]
    fn test_blank_examples_dropped() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(6.0),
                ..Default::default()
            },
            optimizations: vec![DraftOptimization {
                category: "pacing".to_string(),
                issue: "rushed".to_string(),
                suggestion: "slow down".to_string(),
                example_before: Some("  ".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        assert_eq!(report.optimizations[0].example_before, None);
    }

    #[test]
    fn test_backend_improvement_estimate_kept() {
        let draft = DraftReport {
            summary: DraftSummary {
                overall_score: Some(5.0),
                ..Default::default()
            },
            overall_recommendations: DraftRecommendations {
                estimated_improvement: Some("expect 5 -> 7".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let report = assemble(&input_with_id("p"), draft);
        assert_eq!(
            report.overall_recommendations.estimated_improvement,
            "expect 5 -> 7"
        );
    }
}
