//! Wire types for the controller and worker HTTP surfaces.

use serde::{Deserialize, Serialize};

/// Controller endpoint that re-registers every live worker.
pub const REFRESH_ALL_WORKERS_PATH: &str = "/refresh_all_workers";
/// Controller endpoint listing the registered model names.
pub const LIST_MODELS_PATH: &str = "/list_models";
/// Controller endpoint mapping a model name to a worker address.
pub const GET_WORKER_ADDRESS_PATH: &str = "/get_worker_address";
/// Worker endpoint producing a NUL-delimited JSON generation stream.
pub const WORKER_GENERATE_STREAM_PATH: &str = "/worker_generate_stream";

/// `User-Agent` sent on generation requests.
pub const USER_AGENT: &str = "Vistral Client";

/// Sampling temperature is fixed for the demo client.
pub const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Deserialize)]
pub struct ListModelsResponse {
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerAddressRequest {
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerAddressResponse {
    pub address: String,
}

/// Payload for `/worker_generate_stream`. Constructed fresh per call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub max_new_tokens: usize,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    pub images: Vec<String>,
}

/// One streamed response object. The `text` field holds the full cumulative
/// generation so far, not a delta; arrival order is significant.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateChunk {
    pub text: String,
}
