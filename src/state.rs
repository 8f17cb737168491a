// src/state.rs
use crate::config::AppConfig;
use crate::services::currency::CurrencyService;
use crate::services::geocoding::GeocodingService;
use crate::services::session::SessionStore;
use crate::BoxError;

/// Everything a request handler can reach.
pub struct AppState {
    pub session: SessionStore,
    pub currency: CurrencyService,
    pub geocoder: GeocodingService,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, BoxError> {
        Ok(AppState {
            session: SessionStore::new(),
            currency: CurrencyService::new(config.exchange_rates.clone(), config.http_timeout)?,
            geocoder: GeocodingService::new(config.geocoding.clone(), config.http_timeout)?,
        })
    }
}
