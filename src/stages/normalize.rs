use crate::error::EngineError;
use crate::models::{PresentationInput, RawPresentation, TranscriptSegment};

/// Perform the normalization stage: validate the raw payload and produce the
/// canonical PresentationInput.
///
/// This stage:
/// 1. Rejects empty transcripts and blank segment text
/// 2. Rejects negative, non-finite, or inverted timestamps
/// 3. Rejects sequences whose start times regress (non-monotonic input)
/// 4. Stably sorts segments by start time and computes total duration
///
/// No side effects; runs before any backend call.
pub fn normalize(raw: RawPresentation) -> Result<PresentationInput, EngineError> {
    if raw.segments.is_empty() {
        return Err(EngineError::InvalidInput(
            "transcript contains no segments".to_string(),
        ));
    }

    let mut segments = Vec::with_capacity(raw.segments.len());

    for (index, segment) in raw.segments.iter().enumerate() {
        if segment.text.trim().is_empty() {
            return Err(EngineError::InvalidInput(format!(
                "segment {} has empty text",
                index
            )));
        }

        if !segment.start_time.is_finite() || !segment.end_time.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "segment {} has a non-finite timestamp",
                index
            )));
        }

        if segment.start_time < 0.0 || segment.end_time < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "segment {} has a negative timestamp",
                index
            )));
        }

        if segment.start_time >= segment.end_time {
            return Err(EngineError::InvalidInput(format!(
                "segment {} has start_time {} >= end_time {}",
                index, segment.start_time, segment.end_time
            )));
        }

        if let Some(confidence) = segment.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(EngineError::InvalidInput(format!(
                    "segment {} has confidence {} outside [0, 1]",
                    index, confidence
                )));
            }
        }

        segments.push(TranscriptSegment {
            text: segment.text.trim().to_string(),
            start_time: segment.start_time,
            end_time: segment.end_time,
            confidence: segment.confidence,
        });
    }

    // Start times must not regress across the sequence. Overlapping intervals
    // with non-decreasing starts are accepted (cross-talk in recordings).
    for pair in segments.windows(2) {
        if pair[1].start_time < pair[0].start_time {
            return Err(EngineError::InvalidInput(format!(
                "segments are not in chronological order: start_time {} follows {}",
                pair[1].start_time, pair[0].start_time
            )));
        }
    }

    // Stable sort; identity for valid input, canonical ordering for ties.
    segments.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let first_start = segments
        .iter()
        .map(|s| s.start_time)
        .fold(f64::INFINITY, f64::min);
    let last_end = segments
        .iter()
        .map(|s| s.end_time)
        .fold(f64::NEG_INFINITY, f64::max);

    let presentation_id = match raw.presentation_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => uuid::Uuid::new_v4().to_string(),
    };

    Ok(PresentationInput {
        presentation_id,
        segments,
        metadata: raw.metadata.unwrap_or_default(),
        duration_secs: last_end - first_start,
    })
}
