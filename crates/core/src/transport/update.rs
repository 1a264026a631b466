//! Outbound `POST /update` requests
//!
//! Requests are independent of the listening stream: they carry no ordering
//! relative to inbound messages and never touch local state. The server echoes
//! accepted moves back through the stream.

use reqwest::{Client, Url};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::types::{Position, UpdateRequest};
use crate::{ClientConfig, CoreError, Result};

/// Sends position update requests
#[derive(Debug, Clone)]
pub struct UpdateClient {
    client: Client,
    url: Url,
}

impl UpdateClient {
    /// Use a caller-provided client
    pub fn new(url: Url, client: Client) -> Self {
        Self { url, client }
    }

    /// Build from config; the client gets the configured request timeout
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let url = config.update_url()?;
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::new(url, client))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Ask the server to move the active cell
    ///
    /// Any non-success status is an error. The response body is not read.
    pub async fn send(&self, position: Position) -> Result<()> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&UpdateRequest::new(position))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::UpdateRejected {
                status: status.as_u16(),
            });
        }

        debug!("Update to ({}, {}) accepted", position.x, position.y);
        Ok(())
    }

    /// Fire and forget: send on a separate task, log failure, never retry
    pub fn spawn_send(&self, position: Position) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            if let Err(e) = this.send(position).await {
                error!("Failed to update position to ({}, {}): {}", position.x, position.y, e);
            }
        })
    }
}
