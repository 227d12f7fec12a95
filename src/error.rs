use thiserror::Error;

use crate::models::CurrentVariable;

/// Everything that can go wrong between asking the provider for current
/// conditions and having a report ready.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider could not be reached or the connection broke.
    #[error("{0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("{0}")]
    Api(String),

    /// The body was not a forecast document.
    #[error("Failed to decode forecast response: {0}")]
    Decode(String),

    #[error("Provider returned no location data")]
    NoLocation,

    #[error("Provider response has no current conditions")]
    MissingCurrent,

    #[error("Provider response is missing current variable {0}")]
    MissingVariable(CurrentVariable),

    /// A failure that carries no message of its own.
    #[error("Unknown error")]
    Unknown,
}

impl WeatherError {
    /// Message shown to the caller. Falls back to "Unknown error" when the
    /// underlying error had nothing to say.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            Self::Unknown.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WeatherError::Decode(err.to_string())
        } else {
            WeatherError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_provider_reason() {
        let err = WeatherError::Api(
            "Latitude must be in range of -90 to 90°. Given: 91.0.".to_string(),
        );
        assert_eq!(
            err.user_message(),
            "Latitude must be in range of -90 to 90°. Given: 91.0."
        );
    }

    #[test]
    fn empty_messages_become_unknown_error() {
        assert_eq!(WeatherError::Transport(String::new()).user_message(), "Unknown error");
        assert_eq!(WeatherError::Transport("  ".into()).user_message(), "Unknown error");
        assert_eq!(WeatherError::Unknown.user_message(), "Unknown error");
    }

    #[test]
    fn missing_variable_names_the_slot() {
        let err = WeatherError::MissingVariable(CurrentVariable::WindSpeed);
        assert_eq!(
            err.user_message(),
            "Provider response is missing current variable wind_speed_10m"
        );
    }
}
