use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::llm::{build_analysis_prompt, build_repair_prompt, generate_with_retry, parse_and_validate, GenerativeBackend};
use crate::models::{FeedbackReport, RawPresentation};
use crate::stages::{assemble, normalize};

/// Repair ceiling: how many correction round-trips a malformed backend reply
/// gets before the request fails. Fixed at one to bound cost and latency.
pub const REPAIR_ATTEMPTS: usize = 1;

/// The feedback engine: configuration plus a generative backend.
///
/// Stateless per request; safe to share across concurrent requests behind an
/// `Arc` since the config is read-only and the backend holds no request state.
pub struct FeedbackEngine<B> {
    backend: B,
    config: EngineConfig,
}

impl<B: GenerativeBackend> FeedbackEngine<B> {
    pub fn new(backend: B, config: EngineConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the full pipeline for one request:
    /// normalize -> build prompt -> invoke backend -> validate/repair -> assemble.
    ///
    /// Fails with a typed `EngineError`; never returns a partial report.
    pub async fn analyze(&self, raw: RawPresentation) -> Result<FeedbackReport, EngineError> {
        let input = normalize(raw)?;
        info!(
            "analyzing presentation {} ({} segments, {:.1}s)",
            input.presentation_id,
            input.segments.len(),
            input.duration_secs
        );

        let prompt = build_analysis_prompt(&input, self.config.max_transcript_chars)?;

        let reply = generate_with_retry(
            &self.backend,
            &prompt,
            self.config.max_retries,
            self.config.retry_base_delay_ms,
        )
        .await?;

        let draft = match parse_and_validate(&reply) {
            Ok(draft) => draft,
            Err(first_error) => {
                self.repair(&input.presentation_id, &prompt, &reply, &first_error)
                    .await?
            }
        };

        let report = assemble(&input, draft);
        info!(
            "presentation {} scored {} with {} optimizations",
            report.presentation_id,
            report.summary.overall_score,
            report.optimizations.len()
        );
        Ok(report)
    }

    /// The single bounded repair cycle: re-invoke the backend with the
    /// malformed reply and the validation errors, then validate once more.
    async fn repair(
        &self,
        presentation_id: &str,
        prompt: &str,
        malformed_reply: &str,
        errors: &str,
    ) -> Result<crate::models::DraftReport, EngineError> {
        let mut last_error = errors.to_string();

        for attempt in 1..=REPAIR_ATTEMPTS {
            warn!(
                "presentation {}: reply failed validation ({}), repair attempt {} of {}",
                presentation_id, last_error, attempt, REPAIR_ATTEMPTS
            );

            let repair_prompt = build_repair_prompt(prompt, malformed_reply, &last_error);
            let repaired = generate_with_retry(
                &self.backend,
                &repair_prompt,
                self.config.max_retries,
                self.config.retry_base_delay_ms,
            )
            .await?;

            match parse_and_validate(&repaired) {
                Ok(draft) => return Ok(draft),
                Err(e) => last_error = e,
            }
        }

        Err(EngineError::MalformedBackendOutput(last_error))
    }
}
