use async_trait::async_trait;
use reqwest::Client;

use crate::{error::ArtworkError, media::ArtworkSource};

/// Fetches artwork with a plain HTTP GET. Any non-2xx status is a failure.
#[derive(Debug, Clone, Default)]
pub struct HttpArtwork {
    client: Client,
}

impl HttpArtwork {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtworkSource for HttpArtwork {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, ArtworkError> {
        let response = self.client.get(locator).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtworkError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
