use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::engine::FeedbackEngine;
use crate::error::EngineError;
use crate::llm::GenerativeBackend;
use crate::models::{FeedbackReport, RawPresentation};

/// Build the transport router: the single processing endpoint plus liveness.
pub fn router<B: GenerativeBackend + 'static>(engine: Arc<FeedbackEngine<B>>) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler::<B>))
        .route("/health", get(health_handler))
        .with_state(engine)
}

/// Bind and serve until the process is stopped.
pub async fn serve<B: GenerativeBackend + 'static>(
    engine: Arc<FeedbackEngine<B>>,
    port: u16,
) -> anyhow::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

async fn analyze_handler<B: GenerativeBackend + 'static>(
    State(engine): State<Arc<FeedbackEngine<B>>>,
    Json(raw): Json<RawPresentation>,
) -> Result<Json<FeedbackReport>, (StatusCode, Json<serde_json::Value>)> {
    match engine.analyze(raw).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            warn!("analysis failed: {}", e);
            Err((error_status(&e), Json(json!({ "error": e.to_string() }))))
        }
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "lectern",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn error_status(e: &EngineError) -> StatusCode {
    match e {
        EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        EngineError::InputTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        EngineError::BackendTimeout => StatusCode::GATEWAY_TIMEOUT,
        EngineError::BackendRateLimited | EngineError::BackendUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        EngineError::BackendAuthError
        | EngineError::BackendRejected(_)
        | EngineError::MalformedBackendOutput(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&EngineError::InvalidInput("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&EngineError::InputTooLarge { size: 2, max: 1 }),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            error_status(&EngineError::BackendTimeout),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            error_status(&EngineError::BackendRateLimited),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            error_status(&EngineError::MalformedBackendOutput("junk".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }
}
