use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{FeedbackReport, RawPresentation};

/// Parse a presentation input file (JSON) for the one-shot CLI mode.
pub fn parse_presentation_file(path: &Path) -> Result<RawPresentation> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_presentation_json(&content)
}

/// Parse a presentation input JSON string.
pub fn parse_presentation_json(json: &str) -> Result<RawPresentation> {
    serde_json::from_str(json).context("Failed to parse presentation JSON")
}

/// Write a feedback report as pretty-printed JSON.
pub fn write_report_file(report: &FeedbackReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write file: {:?}", path))?;
    Ok(())
}
