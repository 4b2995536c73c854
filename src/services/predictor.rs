use super::{check_status, GeocodeResult};

use crate::{config::Config, IssBotError};

use async_trait::async_trait;
use log::*;

#[async_trait]
pub trait PassPredictionService: Send + Sync {
    /// Raw predictor payload for a place; see `passes::normalizer` for its shape.
    async fn predict(&self, place: &GeocodeResult) -> Result<String, IssBotError>;
}

/// Pass predictions from the AstroViewer predictor.
pub struct AstroViewerService {
    client: reqwest::Client,
    endpoint: String,
}

impl AstroViewerService {
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(&config.predictor_url)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        AstroViewerService {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl PassPredictionService for AstroViewerService {
    async fn predict(&self, place: &GeocodeResult) -> Result<String, IssBotError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, "request")
            .query(&[
                ("var", "passesData".to_string()),
                ("lat", place.coordinates.lat.to_string()),
                ("lon", place.coordinates.lng.to_string()),
                ("name", place.formatted_address.clone()),
            ])
            .send()
            .await?;
        let body = check_status(response)?.text().await?;
        trace!("Received {} bytes from AstroViewer predictor.", body.len());
        Ok(body)
    }
}
