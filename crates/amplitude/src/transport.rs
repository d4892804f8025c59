//! HTTP transport for posting event packages.

use crate::config::Config;
use crate::types::EventPackage;
use crate::Error;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

/// HTTP transport for sending packages to the Amplitude HTTP API.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = match &config.http_client {
            Some(client) => client.clone(),
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = config.timeout() {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(Self {
            client,
            endpoint: config.api_uri().to_owned(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a package and hand back the raw response.
    ///
    /// The status code is not inspected; a non-2xx answer is still `Ok`.
    pub async fn post(&self, package: &EventPackage) -> Result<reqwest::Response, Error> {
        let body = serde_json::to_vec(package)?;

        debug!(
            endpoint = %self.endpoint,
            event_count = package.events.len(),
            "sending events"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "*/*")
            .body(body)
            .send()
            .await?;

        debug!(status = %response.status(), "events posted");

        Ok(response)
    }
}
