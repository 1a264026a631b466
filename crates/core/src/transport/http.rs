//! reqwest-backed stream source for `GET /listening`

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, Url};

use super::{ByteStream, StreamSource};
use crate::{ClientConfig, CoreError, Result};

/// Opens the listening endpoint with a plain GET
#[derive(Debug, Clone)]
pub struct HttpStreamSource {
    client: Client,
    url: Url,
}

impl HttpStreamSource {
    /// Use a caller-provided client (timeouts, proxies, etc.)
    ///
    /// The client must not carry an overall request timeout: the stream is
    /// expected to stay open indefinitely.
    pub fn new(url: Url, client: Client) -> Self {
        Self { url, client }
    }

    /// Build from config with a default client
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let url = config.listening_url()?;
        let client = Client::builder().build()?;
        Ok(Self::new(url, client))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl StreamSource for HttpStreamSource {
    async fn open(&self) -> Result<Box<dyn ByteStream>> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(Box::new(HttpByteStream { response }))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Body of an accepted `/listening` response
struct HttpByteStream {
    response: Response,
}

#[async_trait]
impl ByteStream for HttpByteStream {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        Ok(self.response.chunk().await?)
    }
}
