use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod geocoding;
pub mod position;
pub mod predictor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "{},{}", lat, lng)]
pub struct Coordinates {
    pub lat: Decimal,
    pub lng: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub coordinates: Coordinates,
}

/// Rejects non-success HTTP statuses so callers only see bodies worth parsing.
pub(crate) fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, crate::IssBotError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(crate::IssBotError::HttpStatus {
            url: response.url().to_string(),
            status,
        })
    }
}
