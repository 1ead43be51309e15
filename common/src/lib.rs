//! Scan AI Common Library
//!
//! CLIとデスクトップで共有される型と状態遷移

pub mod types;
pub mod error;
pub mod state;
pub mod parser;
pub mod display;
pub mod settings;

pub use types::{ImageRef, Prediction, PredictionResponse, ServiceStatus, IMAGE_EXTENSIONS};
pub use error::{Error, Result};
pub use state::{reduce, SubmissionEvent, SubmissionPhase, SubmissionState};
pub use parser::{parse_prediction_response, validate_response};
pub use display::{format_confidence, result_lines, FAILURE_ALERT};
pub use settings::UploadSettings;
