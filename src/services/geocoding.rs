use super::{Coordinates, GeocodeResult};

use crate::{config::Config, IssBotError};

use async_trait::async_trait;
use google_maps::{
    geocoding::{error::Error as GeocodingError, response::status::Status},
    GoogleMapsClient, GoogleMapsError, LatLng,
};
use log::*;

#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Candidates for a free-text place; empty when the geocoder knows none.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, IssBotError>;
    /// Candidates for a point; empty when nothing is there (open water).
    async fn reverse(&self, coordinates: Coordinates) -> Result<Vec<GeocodeResult>, IssBotError>;
}

pub struct GoogleMapsService {
    client: GoogleMapsClient,
}

impl GoogleMapsService {
    pub fn new(config: &Config) -> Self {
        GoogleMapsService {
            client: GoogleMapsClient::new(&config.google_maps_token),
        }
    }
}

/// `ZERO_RESULTS` comes back as an error; it only means nothing is there.
fn no_results_or_error(err: GoogleMapsError) -> Result<Vec<GeocodeResult>, IssBotError> {
    match err {
        GoogleMapsError::Geocoding(GeocodingError::GoogleMapsService(Status::ZeroResults, _)) => {
            trace!("Google Maps geocoding API found nothing.");
            Ok(Vec::new())
        }
        other => Err(IssBotError::Geocoding(other.to_string())),
    }
}

#[async_trait]
impl GeocodingService for GoogleMapsService {
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, IssBotError> {
        let response = match self.client.geocoding().with_address(address).execute().await {
            Ok(response) => response,
            Err(err) => return no_results_or_error(err.into()),
        };
        trace!("Received {} candidates from Google Maps geocoding API.", response.results.len());

        Ok(response
            .results
            .into_iter()
            .map(|candidate| GeocodeResult {
                formatted_address: candidate.formatted_address,
                coordinates: Coordinates {
                    lat: candidate.geometry.location.lat,
                    lng: candidate.geometry.location.lng,
                },
            })
            .collect())
    }

    async fn reverse(&self, coordinates: Coordinates) -> Result<Vec<GeocodeResult>, IssBotError> {
        let point = LatLng::try_from_dec(coordinates.lat, coordinates.lng)
            .map_err(|err| IssBotError::Geocoding(err.to_string()))?;
        let response = match self.client.reverse_geocoding(point).execute().await {
            Ok(response) => response,
            Err(err) => return no_results_or_error(err.into()),
        };
        trace!("Received {} candidates from Google Maps reverse geocoding API.", response.results.len());

        Ok(response
            .results
            .into_iter()
            .map(|candidate| GeocodeResult {
                formatted_address: candidate.formatted_address,
                coordinates: Coordinates {
                    lat: candidate.geometry.location.lat,
                    lng: candidate.geometry.location.lng,
                },
            })
            .collect())
    }
}
