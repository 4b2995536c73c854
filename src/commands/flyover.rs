use log::*;

use crate::{
    passes::{format_report, parse_report},
    services::{geocoding::GeocodingService, predictor::PassPredictionService},
    IssBotError,
};

pub const LOCATION_NOT_FOUND: &str = "Couldn't find a location by that name";

/// Drops sentence punctuation after a place name. Closing brackets stay, and a
/// final '.' stays when it ends an abbreviation such as `D.C.`.
pub fn clean_location(text: &str) -> &str {
    let mut location = text
        .trim()
        .trim_end_matches(|c: char| matches!(c, '?' | '!' | ',' | ';' | ':') || c.is_whitespace());
    while let Some(rest) = location.strip_suffix('.') {
        let last_word = rest.rsplit(char::is_whitespace).next().unwrap_or(rest);
        if last_word.contains('.') {
            break;
        }
        location = rest.trim_end_matches(|c: char| {
            matches!(c, '?' | '!' | ',' | ';' | ':') || c.is_whitespace()
        });
    }
    location
}

/// Upcoming ISS passes over a free-text place.
pub async fn when_does_the_iss_pass(
    geocoder: &dyn GeocodingService,
    predictor: &dyn PassPredictionService,
    location: &str,
) -> Result<String, IssBotError> {
    let location = clean_location(location);
    if location.is_empty() {
        return Ok(LOCATION_NOT_FOUND.to_string());
    }

    let place = match geocoder.geocode(location).await?.into_iter().next() {
        Some(place) => place,
        None => {
            debug!("No geocoding results for {:?}.", location);
            return Ok(LOCATION_NOT_FOUND.to_string());
        }
    };
    trace!("Geocoded {:?} to {}.", location, place.formatted_address);

    let body = predictor.predict(&place).await?;
    let report = parse_report(&body)?;
    trace!("Parsed {} passes for {}.", report.events.len(), report.location_name);

    Ok(format_report(&report)?)
}
