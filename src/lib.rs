pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod server;
pub mod stages;

pub use config::EngineConfig;
pub use engine::{FeedbackEngine, REPAIR_ATTEMPTS};
pub use error::EngineError;
pub use io::{parse_presentation_file, parse_presentation_json, write_report_file};
pub use llm::{GeminiClient, GenerativeBackend};
pub use models::{
    FeedbackReport, Optimization, OptimizationCategory, PresentationInput, RawPresentation,
    Recommendations, Summary, TranscriptSegment,
};
pub use stages::{assemble, normalize};
