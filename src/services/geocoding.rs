// src/services/geocoding.rs
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::GeocodingConfig;
use crate::models::{DataSource, GeoPoint};
use crate::BoxError;

// Geographic centre of the contiguous US, used when nothing else matches.
const DEFAULT_PIN: (f64, f64) = (39.8283, -98.5795);

const KNOWN_CITIES: [(&str, f64, f64); 6] = [
    ("austin", 30.2672, -97.7431),
    ("nashville", 36.1627, -86.7816),
    ("denver", 39.7392, -104.9903),
    ("tulsa", 36.1540, -95.9928),
    ("fresno", 36.7378, -119.7871),
    ("charlotte", 35.2271, -80.8431),
];

/// Static pin for a location: a known city if one is named, otherwise the
/// US centroid.
pub fn fallback_pin(location: &str) -> GeoPoint {
    let lowered = location.to_lowercase();
    let (latitude, longitude) = KNOWN_CITIES
        .iter()
        .find(|(city, _, _)| lowered.contains(city))
        .map(|(_, lat, lon)| (*lat, *lon))
        .unwrap_or(DEFAULT_PIN);

    GeoPoint {
        latitude,
        longitude,
        label: location.to_string(),
        source: DataSource::Fallback,
    }
}

// Nominatim returns coordinates as strings
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

pub struct GeocodingService {
    client: Client,
    config: GeocodingConfig,
}

impl GeocodingService {
    pub fn new(config: GeocodingConfig, timeout: Duration) -> Result<Self, BoxError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .build()?;
        Ok(GeocodingService { client, config })
    }

    pub async fn search(&self, location: &str) -> Result<GeoPoint, BoxError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        info!("Geocoding location {:?}", location);

        let mut query = vec![("q", location), ("format", "json"), ("limit", "1")];
        if let Some(key) = &self.config.api_key {
            query.push(("key", key.as_str()));
        }

        let hits = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<SearchHit>>()
            .await?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| format!("No geocoding match for {:?}", location))?;

        Ok(GeoPoint {
            latitude: hit.lat.trim().parse::<f64>()?,
            longitude: hit.lon.trim().parse::<f64>()?,
            label: hit.display_name.unwrap_or_else(|| location.to_string()),
            source: DataSource::Live,
        })
    }

    /// Live coordinates, or a static pin when the lookup fails.
    pub async fn locate(&self, location: &str) -> GeoPoint {
        if location.trim().is_empty() {
            return fallback_pin(location);
        }
        match self.search(location).await {
            Ok(point) => point,
            Err(e) => {
                warn!("Geocoding failed for {:?}, using fallback pin: {}", location, e);
                fallback_pin(location)
            }
        }
    }
}
