//! HTTP clients for the controller (worker discovery) and the worker
//! (streaming generation).

use tracing::info;

use crate::error::ClientError;
use crate::protocol::{
    GenerateRequest, ListModelsResponse, WorkerAddressRequest, WorkerAddressResponse,
    GET_WORKER_ADDRESS_PATH, LIST_MODELS_PATH, REFRESH_ALL_WORKERS_PATH, USER_AGENT,
    WORKER_GENERATE_STREAM_PATH,
};
use crate::streaming::ChunkReader;

/// An empty worker address means no worker serves the model; the caller is
/// expected to exit without attempting generation.
pub fn normalize_worker_addr(addr: &str) -> Option<String> {
    if addr.is_empty() {
        None
    } else {
        Some(addr.to_string())
    }
}

/// Client for the controller's registry endpoints.
pub struct ControllerClient {
    base_url: String,
    http: reqwest::Client,
}

impl ControllerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Ask the controller to re-register every live worker. The response body
    /// is discarded.
    pub async fn refresh_all_workers(&self) -> Result<(), ClientError> {
        self.http
            .post(format!("{}{REFRESH_ALL_WORKERS_PATH}", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn list_models(&self) -> Result<Vec<String>, ClientError> {
        let response: ListModelsResponse = self
            .http
            .post(format!("{}{LIST_MODELS_PATH}", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.models)
    }

    pub async fn get_worker_address(&self, model: &str) -> Result<String, ClientError> {
        let response: WorkerAddressResponse = self
            .http
            .post(format!("{}{GET_WORKER_ADDRESS_PATH}", self.base_url))
            .json(&WorkerAddressRequest {
                model: model.to_string(),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.address)
    }

    /// Full discovery sequence: refresh workers, log the sorted model list,
    /// look up the worker address for `model`. An empty address maps to
    /// `None` rather than an error.
    pub async fn resolve_worker(&self, model: &str) -> Result<Option<String>, ClientError> {
        self.refresh_all_workers().await?;

        let mut models = self.list_models().await?;
        models.sort();
        info!("Models: {models:?}");

        let address = self.get_worker_address(model).await?;
        info!("worker_addr: {address}");
        Ok(normalize_worker_addr(&address))
    }
}

/// Client for a worker's streaming generation endpoint.
pub struct WorkerClient {
    base_url: String,
    http: reqwest::Client,
}

impl WorkerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// POST a generation request and hand back the chunk reader over the
    /// streamed response body.
    pub async fn generate_stream(
        &self,
        request: &GenerateRequest,
    ) -> Result<ChunkReader, ClientError> {
        let response = self
            .http
            .post(format!("{}{WORKER_GENERATE_STREAM_PATH}", self.base_url))
            .header("User-Agent", USER_AGENT)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(ChunkReader::from_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_worker_addr_is_none() {
        assert_eq!(normalize_worker_addr(""), None);
        assert_eq!(
            normalize_worker_addr("http://x:9"),
            Some("http://x:9".to_string())
        );
    }
}
