use std::{str::FromStr, time::Duration};

use super::{check_status, Coordinates};

use crate::{config::Config, IssBotError, ParseError};

use async_trait::async_trait;
use log::*;
use rust_decimal::Decimal;
use serde::Deserialize;

#[async_trait]
pub trait PositionService: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, IssBotError>;
}

/// Live ISS position from the Open Notify API.
pub struct OpenNotifyService {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    iss_position: IssPosition,
}

#[derive(Debug, Deserialize)]
struct IssPosition {
    latitude: String,
    longitude: String,
}

impl OpenNotifyService {
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(&config.iss_now_url, config.position_timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Self {
        OpenNotifyService {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            timeout,
        }
    }

    fn classify(&self, err: reqwest::Error) -> IssBotError {
        if err.is_timeout() {
            IssBotError::Timeout(self.endpoint.clone())
        } else if err.is_decode() {
            ParseError::Json(err.to_string()).into()
        } else {
            IssBotError::Network(err)
        }
    }
}

fn parse_coordinate(raw: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(raw.trim()).map_err(|_| ParseError::Coordinate(raw.to_string()))
}

#[async_trait]
impl PositionService for OpenNotifyService {
    async fn current_position(&self) -> Result<Coordinates, IssBotError> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| self.classify(err))?;
        let body = check_status(response)?
            .json::<IssNowResponse>()
            .await
            .map_err(|err| self.classify(err))?;
        trace!("Received ISS position from Open Notify.");

        Ok(Coordinates {
            lat: parse_coordinate(&body.iss_position.latitude)?,
            lng: parse_coordinate(&body.iss_position.longitude)?,
        })
    }
}
