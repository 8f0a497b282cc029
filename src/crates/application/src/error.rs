use domain::job::JobError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Job error: {0}")]
    JobError(#[from] JobError),

    // non-2xx from the image API; body kept verbatim for the job record
    #[error("Image API returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Image API request failed: {0}")]
    UpstreamRequest(String),

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}
