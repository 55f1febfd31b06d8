use crate::error::EngineError;
use crate::models::{OptimizationCategory, PresentationInput};

/// System prompt for the backend: the analysis rubric and the output contract.
pub const RUBRIC_PROMPT: &str = r#"You are an expert presentation coach analyzing a recorded presentation transcript. You MUST follow these rules:

1. Score the presentation on delivery, confidence, content, structure, and pacing.
2. Output MUST be a single JSON object matching the provided schema. No prose outside the JSON.
3. "overall_score" MUST be an integer from 0 to 10.
4. Every optimization MUST have a non-empty "issue" and a non-empty "suggestion".
5. Every "category" MUST be one of: delivery, confidence, content, structure, pacing.
6. Order optimizations most impactful first and include an "impact" score from 0.0 to 1.0 for each.
7. Base every observation on the transcript text and timing; do not invent content the speaker never said.

OUTPUT SCHEMA:
{
  "summary": {
    "overall_score": <integer 0-10>,
    "strengths": [<string>, ...],
    "weaknesses": [<string>, ...]
  },
  "optimizations": [
    {"category": <string>, "issue": <string>, "suggestion": <string>, "impact": <number 0.0-1.0>, "example_before": <optional string quoting the transcript>, "example_after": <optional string rewording it>}
  ],
  "overall_recommendations": {
    "estimated_improvement": <string describing the expected score change if the optimizations are applied>,
    "action_priority": [<category names in suggested order of attack>]
  }
}"#;

/// Build the analysis prompt for a normalized presentation.
///
/// Deterministic: the same input always renders the same prompt. Fails with
/// `InputTooLarge` instead of truncating when the transcript exceeds the
/// configured maximum.
pub fn build_analysis_prompt(
    input: &PresentationInput,
    max_transcript_chars: usize,
) -> Result<String, EngineError> {
    let transcript = render_transcript(input);
    // The limit applies to the rendered body, timing annotations included,
    // since that is what the backend is actually sent.
    if transcript.len() > max_transcript_chars {
        return Err(EngineError::InputTooLarge {
            size: transcript.len(),
            max: max_transcript_chars,
        });
    }

    let mut prompt = String::new();

    prompt.push_str(&format!("# Presentation: {}\n", input.presentation_id));
    prompt.push_str(&format!(
        "Duration: {:.1}s across {} segments\n",
        input.duration_secs,
        input.segments.len()
    ));

    if !input.metadata.is_empty() {
        prompt.push_str("\n## Metadata\n");
        if let Some(topic) = &input.metadata.topic {
            prompt.push_str(&format!("- Topic: {}\n", topic));
        }
        if let Some(minutes) = input.metadata.duration_minutes {
            prompt.push_str(&format!("- Declared duration: {} minutes\n", minutes));
        }
        if let Some(audience) = &input.metadata.target_audience {
            prompt.push_str(&format!("- Target audience: {}\n", audience));
        }
        if let Some(language) = &input.metadata.language {
            prompt.push_str(&format!("- Language: {}\n", language));
        }
    }

    prompt.push_str("\n## Transcript\n");
    prompt.push_str(&transcript);

    prompt.push_str("\n## Instructions\n");
    prompt.push_str("Analyze the transcript against the rubric and reply with the JSON object only.\n");
    prompt.push_str(&format!(
        "Allowed optimization categories: {}.\n",
        OptimizationCategory::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    Ok(prompt)
}

/// Render the transcript body: one line per segment with timing annotations.
fn render_transcript(input: &PresentationInput) -> String {
    let mut body = String::new();
    for segment in &input.segments {
        match segment.confidence {
            Some(confidence) => body.push_str(&format!(
                "[{:.1}s - {:.1}s] (conf {:.2}) {}\n",
                segment.start_time, segment.end_time, confidence, segment.text
            )),
            None => body.push_str(&format!(
                "[{:.1}s - {:.1}s] {}\n",
                segment.start_time, segment.end_time, segment.text
            )),
        }
    }
    body
}

/// Build the correction prompt for the single repair cycle: the original
/// request, the malformed reply, and what was wrong with it.
pub fn build_repair_prompt(original_prompt: &str, malformed_output: &str, errors: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Your previous reply to the request below was not valid.\n\n");
    prompt.push_str("## Validation errors\n");
    prompt.push_str(errors);
    prompt.push_str("\n\n## Your previous reply\n");
    prompt.push_str(malformed_output);
    prompt.push_str("\n\n## Original request\n");
    prompt.push_str(original_prompt);
    prompt.push_str(
        "\n\n## Instructions\nReply again with ONLY a corrected JSON object that conforms to the schema. Fix every validation error listed above.\n",
    );

    prompt
}
