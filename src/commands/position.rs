use log::*;

use crate::{
    services::{geocoding::GeocodingService, position::PositionService, Coordinates},
    IssBotError,
};

pub const OVER_WATER: &str = "Looks like it's over water";
pub const UNKNOWN_PLACE: &str = "Couldn't tell what it's over right now";

const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap?zoom=2&size=400x400";

pub fn static_map_url(coordinates: Coordinates, key: Option<&str>) -> String {
    let mut url = format!("{}&markers={}", STATIC_MAP_URL, coordinates);
    if let Some(key) = key {
        url.push_str("&key=");
        url.push_str(key);
    }
    url
}

/// Where the ISS is now: the place underneath (if any) and a map.
pub async fn where_is_the_iss(
    position: &dyn PositionService,
    geocoder: &dyn GeocodingService,
    static_map_key: Option<&str>,
) -> Result<String, IssBotError> {
    let coordinates = position.current_position().await?;
    trace!("ISS is at {}.", coordinates);
    let map = static_map_url(coordinates, static_map_key);

    let place = match geocoder.reverse(coordinates).await {
        Ok(candidates) => match candidates.into_iter().next() {
            Some(first) => first.formatted_address,
            None => OVER_WATER.to_string(),
        },
        Err(why) => {
            warn!("Reverse geocoding {} failed: {}", coordinates, why);
            UNKNOWN_PLACE.to_string()
        }
    };

    Ok(format!("{}\n{}", place, map))
}
