use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::WeatherError;

// ============================================================================
// Current-conditions variables
// ============================================================================

/// The variables requested from the provider. The discriminant is the
/// position of the value in the current block, so the query list and the
/// extraction order both come from `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentVariable {
    Temperature = 0,
    WeatherCode = 1,
    WindSpeed = 2,
    WindDirection = 3,
}

impl CurrentVariable {
    pub const ALL: [CurrentVariable; 4] = [
        CurrentVariable::Temperature,
        CurrentVariable::WeatherCode,
        CurrentVariable::WindSpeed,
        CurrentVariable::WindDirection,
    ];

    /// Name of the variable in the Open-Meteo API
    pub fn api_name(self) -> &'static str {
        match self {
            CurrentVariable::Temperature => "temperature_2m",
            CurrentVariable::WeatherCode => "weather_code",
            CurrentVariable::WindSpeed => "wind_speed_10m",
            CurrentVariable::WindDirection => "wind_direction_10m",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Comma separated list for the `current=` query parameter
    pub fn query_list() -> String {
        Self::ALL
            .iter()
            .map(|variable| variable.api_name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for CurrentVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

// ============================================================================
// Provider response model
// ============================================================================

/// Current values for one location, held in `CurrentVariable` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentBlock {
    values: Vec<Option<f64>>,
}

impl CurrentBlock {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// Positional accessor, `None` when the slot is absent
    pub fn variable(&self, variable: CurrentVariable) -> Option<f64> {
        self.values.get(variable.index()).copied().flatten()
    }

    fn require(&self, variable: CurrentVariable) -> Result<f64, WeatherError> {
        self.variable(variable)
            .ok_or(WeatherError::MissingVariable(variable))
    }
}

/// One per-location entry of a provider response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationForecast {
    pub current: Option<CurrentBlock>,
}

/// Snapshot of the conditions at one location, lives for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    pub weather_code: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_degrees: f64,
}

impl CurrentConditions {
    /// Reads the first location's current block by position.
    pub fn from_locations(locations: &[LocationForecast]) -> Result<Self, WeatherError> {
        let location = locations.first().ok_or(WeatherError::NoLocation)?;
        let current = location
            .current
            .as_ref()
            .ok_or(WeatherError::MissingCurrent)?;

        Ok(Self {
            temperature_celsius: current.require(CurrentVariable::Temperature)?,
            weather_code: current.require(CurrentVariable::WeatherCode)?,
            wind_speed_kmh: current.require(CurrentVariable::WindSpeed)?,
            wind_direction_degrees: current.require(CurrentVariable::WindDirection)?,
        })
    }
}

// ============================================================================
// Open-Meteo API Models
// ============================================================================

/// A single coordinate pair yields an object, several yield an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OpenMeteoPayload {
    Many(Vec<OpenMeteoResponse>),
    One(OpenMeteoResponse),
}

impl OpenMeteoPayload {
    pub fn into_locations(self) -> Vec<LocationForecast> {
        match self {
            OpenMeteoPayload::Many(responses) => {
                responses.into_iter().map(LocationForecast::from).collect()
            }
            OpenMeteoPayload::One(response) => vec![LocationForecast::from(response)],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub current: Option<Map<String, Value>>,
}

impl From<OpenMeteoResponse> for LocationForecast {
    fn from(response: OpenMeteoResponse) -> Self {
        let current = response.current.map(|block| {
            CurrentBlock::new(
                CurrentVariable::ALL
                    .iter()
                    .map(|variable| block.get(variable.api_name()).and_then(Value::as_f64))
                    .collect(),
            )
        });
        LocationForecast { current }
    }
}

/// Body returned by Open-Meteo alongside a 4xx status
#[derive(Debug, Deserialize)]
pub struct OpenMeteoErrorBody {
    pub reason: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Vec<LocationForecast> {
        serde_json::from_str::<OpenMeteoPayload>(body)
            .unwrap()
            .into_locations()
    }

    #[test]
    fn query_list_follows_extraction_order() {
        assert_eq!(
            CurrentVariable::query_list(),
            "temperature_2m,weather_code,wind_speed_10m,wind_direction_10m"
        );
        for (position, variable) in CurrentVariable::ALL.iter().enumerate() {
            assert_eq!(variable.index(), position);
        }
    }

    #[test]
    fn decodes_single_location_object() {
        let locations = decode(
            r#"{
                "latitude": 52.52,
                "longitude": 13.419998,
                "timezone": "Europe/Berlin",
                "current_units": {"temperature_2m": "°C"},
                "current": {
                    "time": "2024-05-01T12:00",
                    "interval": 900,
                    "wind_direction_10m": 270,
                    "temperature_2m": 18.3,
                    "wind_speed_10m": 7.9,
                    "weather_code": 3
                }
            }"#,
        );

        let conditions = CurrentConditions::from_locations(&locations).unwrap();
        assert_eq!(
            conditions,
            CurrentConditions {
                temperature_celsius: 18.3,
                weather_code: 3.0,
                wind_speed_kmh: 7.9,
                wind_direction_degrees: 270.0,
            }
        );
    }

    #[test]
    fn decodes_location_array_and_uses_first_entry() {
        let locations = decode(
            r#"[
                {"current": {"temperature_2m": 1.0, "weather_code": 0, "wind_speed_10m": 2.0, "wind_direction_10m": 10}},
                {"current": {"temperature_2m": 9.0, "weather_code": 61, "wind_speed_10m": 4.0, "wind_direction_10m": 20}}
            ]"#,
        );

        assert_eq!(locations.len(), 2);
        let conditions = CurrentConditions::from_locations(&locations).unwrap();
        assert_eq!(conditions.temperature_celsius, 1.0);
        assert_eq!(conditions.wind_direction_degrees, 10.0);
    }

    #[test]
    fn missing_current_block_is_reported() {
        let locations = decode(r#"{"latitude": 0.0, "longitude": 0.0}"#);
        let err = CurrentConditions::from_locations(&locations).unwrap_err();
        assert!(matches!(err, WeatherError::MissingCurrent));
    }

    #[test]
    fn missing_or_non_numeric_variable_is_reported() {
        let locations = decode(
            r#"{"current": {"temperature_2m": 12.0, "weather_code": 1, "wind_direction_10m": 90}}"#,
        );
        let err = CurrentConditions::from_locations(&locations).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MissingVariable(CurrentVariable::WindSpeed)
        ));

        let locations = decode(
            r#"{"current": {"temperature_2m": null, "weather_code": 1, "wind_speed_10m": 3.0, "wind_direction_10m": 90}}"#,
        );
        let err = CurrentConditions::from_locations(&locations).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MissingVariable(CurrentVariable::Temperature)
        ));
    }

    #[test]
    fn empty_location_list_is_reported() {
        let err = CurrentConditions::from_locations(&[]).unwrap_err();
        assert!(matches!(err, WeatherError::NoLocation));
    }

    #[test]
    fn short_block_reads_as_absent() {
        let block = CurrentBlock::new(vec![Some(20.0)]);
        assert_eq!(block.variable(CurrentVariable::Temperature), Some(20.0));
        assert_eq!(block.variable(CurrentVariable::WindDirection), None);
    }
}
