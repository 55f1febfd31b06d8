use serde::{Deserialize, Serialize};

/// Raw request payload as it arrives from the caller, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPresentation {
    /// Caller-supplied identifier; generated when absent
    #[serde(default)]
    pub presentation_id: Option<String>,
    /// Timed transcript segments, expected in chronological order
    pub segments: Vec<RawSegment>,
    /// Optional declared metadata about the presentation
    #[serde(default)]
    pub metadata: Option<PresentationMetadata>,
}

/// A single segment record as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Declared metadata about the presentation, rendered into the prompt as
/// context but never validated against the transcript itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresentationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl PresentationMetadata {
    pub fn is_empty(&self) -> bool {
        self.duration_minutes.is_none()
            && self.topic.is_none()
            && self.target_audience.is_none()
            && self.language.is_none()
    }
}

/// A validated, timed unit of speech. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Canonical form of a presentation after normalization: segments sorted by
/// start time, duration computed, identifier pinned.
#[derive(Debug, Clone)]
pub struct PresentationInput {
    pub presentation_id: String,
    pub segments: Vec<TranscriptSegment>,
    pub metadata: PresentationMetadata,
    /// max(end_time) - min(start_time), in seconds
    pub duration_secs: f64,
}

