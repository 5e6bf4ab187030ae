use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;

use crate::cli::error::{CliError, CliResult};

pub const DEFAULT_API_URL: &str = "http://localhost:7070";

/// API client for communicating with the bookmarks REST API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

/// Error body returned by the API
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. BM_API_URL environment variable
    /// 3. Default: http://localhost:7070
    pub fn new(api_url: Option<String>) -> Self {
        let base_url = api_url
            .or_else(|| env::var("BM_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a GET request builder
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Create a POST request builder
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Create a PUT request builder
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path))
    }

    /// Create a PATCH request builder
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.patch(self.url(path))
    }

    /// Create a DELETE request builder
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or a CliError::ApiError on non-success status codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> CliResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Handle a response that carries no body on success
    pub async fn handle_empty(response: Response) -> CliResult<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: Response) -> CliError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        CliError::ApiError {
            status,
            message: error_message(&text),
        }
    }
}

/// Pull the `error` field out of a JSON error body, falling back to the raw
/// text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}
