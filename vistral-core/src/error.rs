use thiserror::Error;

/// Errors surfaced by the client library. Everything is fail fast: no retries
/// are attempted anywhere.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not decode stream chunk as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stream chunk is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("unknown conversation template: `{0}`")]
    UnknownTemplate(String),
}
