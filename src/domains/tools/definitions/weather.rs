//! Weather tool definition.
//!
//! Returns canned weather data for a city. Swap `execute` for a real API call.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::domains::tools::{BoundArguments, ParamKind, ParamSpec, ToolError, ToolHandler, ToolSpec};

/// Weather report payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: i64,
    pub condition: String,
    pub humidity: i64,
    pub wind_speed: i64,
    pub message: String,
}

/// Weather tool - mock lookup by city name.
pub struct WeatherTool;

impl WeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get weather information for a specific city. Returns temperature, condition, humidity and wind speed.";

    /// Execute the tool logic.
    pub fn execute(city: &str) -> WeatherReport {
        info!("Weather tool called for city: {}", city);

        WeatherReport {
            city: city.to_string(),
            temperature: 72,
            condition: "Sunny".to_string(),
            humidity: 45,
            wind_speed: 10,
            message: "This is sample data. Integrate with a real weather API.".to_string(),
        }
    }

    /// Build the registry entry for this tool.
    pub fn spec() -> ToolSpec {
        ToolSpec::new(Self::NAME, Self::DESCRIPTION, Self).with_param(
            ParamSpec::required("city", ParamKind::String)
                .describe("Name of the city to get weather information for"),
        )
    }
}

#[async_trait]
impl ToolHandler for WeatherTool {
    async fn call(&self, args: BoundArguments) -> Result<Value, ToolError> {
        let report = Self::execute(args.str("city")?);
        serde_json::to_value(report).map_err(|e| ToolError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weather_mock_payload() {
        let report = WeatherTool::execute("Paris");
        assert_eq!(
            serde_json::to_value(report).unwrap(),
            json!({
                "city": "Paris",
                "temperature": 72,
                "condition": "Sunny",
                "humidity": 45,
                "wind_speed": 10,
                "message": "This is sample data. Integrate with a real weather API."
            })
        );
    }

    #[test]
    fn test_weather_spec() {
        let spec = WeatherTool::spec();
        assert_eq!(spec.name(), "get_weather");
        assert_eq!(spec.parameters()[0].name, "city");
        assert_eq!(spec.parameters()[0].kind, ParamKind::String);
    }
}
