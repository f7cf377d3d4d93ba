//! Cloud Run Admin API client.
//!
//! # Responsibilities
//! - Fetch an access token from the metadata server
//! - List the project's production services
//! - Hand the raw JSON items to the decoder untouched

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::value::RawValue;
use thiserror::Error;

/// Production Admin API endpoint.
const RUN_API_BASE: &str = "https://run.googleapis.com";

/// Metadata server that vends access tokens inside the platform.
const METADATA_BASE: &str = "http://metadata.google.internal";

/// Server-side label filter: production deployments only.
const LIST_SELECTOR: &str = "env=prod";

/// Field mask limiting the list response to what the decoder reads.
const LIST_FIELDS: &str =
    "items(status/address/url,metadata(labels,name),spec(template/metadata/annotations))";

/// Errors talking to the control plane.
#[derive(Debug, Error)]
pub enum ControlPlaneError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("control-plane request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The list call answered with a non-success status.
    #[error("control plane returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The token endpoint answered with a non-success status.
    #[error("metadata token request returned HTTP {0}")]
    TokenStatus(u16),

    /// The list response body was not the expected JSON shape.
    #[error("malformed list response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Listing seam between the directory builder and the control plane.
#[async_trait]
pub trait ServiceLister {
    /// List the project's production services as raw JSON items.
    async fn list_services(&self, project: &str)
        -> Result<Vec<Box<RawValue>>, ControlPlaneError>;
}

/// Access token as vended by the metadata server.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// The slice of the list response we keep: the items, raw.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListResponse {
    items: Vec<Box<RawValue>>,
}

/// Cloud Run Admin API client over plain HTTPS.
///
/// A token is fetched per call; the directory is built once per process,
/// so there is nothing worth caching.
#[derive(Debug, Clone)]
pub struct CloudRunClient {
    http: reqwest::Client,
    api_base: String,
    metadata_base: String,
}

impl CloudRunClient {
    /// Client against the production API and metadata endpoints.
    pub fn new() -> Self {
        Self::with_bases(RUN_API_BASE, METADATA_BASE)
    }

    /// Client with overridden endpoints, for tests and local runs.
    pub fn with_bases(api_base: impl Into<String>, metadata_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            metadata_base: metadata_base.into(),
        }
    }

    /// Fetch an access token for the default service account.
    async fn access_token(&self) -> Result<String, ControlPlaneError> {
        let url = format!(
            "{}/computeMetadata/v1/instance/service-accounts/default/token",
            self.metadata_base
        );
        let response = self
            .http
            .get(url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ControlPlaneError::TokenStatus(response.status().as_u16()));
        }
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

impl Default for CloudRunClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceLister for CloudRunClient {
    async fn list_services(
        &self,
        project: &str,
    ) -> Result<Vec<Box<RawValue>>, ControlPlaneError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/apis/serving.knative.dev/v1/namespaces/{}/services",
            self.api_base, project
        );
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("labelSelector", LIST_SELECTOR), ("fields", LIST_FIELDS)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ControlPlaneError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let list: ListResponse = serde_json::from_slice(&body)?;
        Ok(list.items)
    }
}
