use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::error::WeatherError;
use crate::formatters::format_current_weather;
use crate::models::{CurrentConditions, GetWeatherRequest};
use crate::provider::WeatherProvider;

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    provider: Arc<dyn WeatherProvider>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service backed by the given provider
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            tool_router: Self::tool_router(),
        }
    }

    /// Fetches and formats the report; every failure ends up in the `Err`
    async fn report_for(&self, latitude: f64, longitude: f64) -> Result<String, WeatherError> {
        let locations = self.provider.fetch_current(latitude, longitude).await?;
        let conditions = CurrentConditions::from_locations(&locations)?;
        Ok(format_current_weather(&conditions))
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "Weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Current weather conditions powered by the Open-Meteo API. \
                Provide latitude and longitude to get_weather for a short report."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets current conditions for a coordinate pair
    #[tool(description = "Gets the current weather for a location")]
    async fn get_weather(
        &self,
        Parameters(request): Parameters<GetWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting current weather for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        match self.report_for(request.latitude, request.longitude).await {
            Ok(report) => Ok(CallToolResult::success(vec![Content::text(report)])),
            Err(e) => {
                tracing::warn!("Failed to fetch current weather: {}", e);
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error fetching weather: {}",
                    e.user_message()
                ))]))
            }
        }
    }
}
