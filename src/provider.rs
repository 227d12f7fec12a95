use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;

use crate::constants::{OPEN_METEO_API_BASE, USER_AGENT};
use crate::error::WeatherError;
use crate::models::{CurrentVariable, LocationForecast, OpenMeteoErrorBody, OpenMeteoPayload};

/// Source of current conditions for a coordinate pair
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches current conditions for a single location. The result holds
    /// one entry per requested location.
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<LocationForecast>, WeatherError>;
}

/// Where and how to reach Open-Meteo
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Open-Meteo forecast API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Arc<Client>,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: ProviderConfig) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(config.user_agent).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forecast URL asking for the current variables of one location, with
    /// the timezone inferred from the coordinates.
    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone=auto",
            self.base_url,
            latitude,
            longitude,
            CurrentVariable::query_list()
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<LocationForecast>, WeatherError> {
        let url = self.forecast_url(latitude, longitude);
        tracing::debug!("Open-Meteo request: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        parse_response(status, &body)
    }
}

/// Turns a forecast response into locations, or into the provider's own
/// rejection reason when the status is not a success.
fn parse_response(status: StatusCode, body: &str) -> Result<Vec<LocationForecast>, WeatherError> {
    if !status.is_success() {
        let reason = serde_json::from_str::<OpenMeteoErrorBody>(body)
            .map(|error| error.reason)
            .unwrap_or_else(|_| format!("Request failed with status: {}", status));
        tracing::warn!("Open-Meteo rejected request ({}): {}", status, reason);
        return Err(WeatherError::Api(reason));
    }

    let payload = serde_json::from_str::<OpenMeteoPayload>(body)?;
    Ok(payload.into_locations())
}
