use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::ToolError;
use crate::tool::Tool;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Current conditions for a Brazilian city via Open-Meteo.
///
/// Geocodes the city name, then fetches temperature (°C), humidity (%),
/// precipitation (mm) and wind (km/h).
pub struct WeatherTool {
    client: reqwest::Client,
    timeout: Duration,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherTool {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_urls(mut self, geocoding: String, forecast: String) -> Self {
        self.geocoding_url = geocoding;
        self.forecast_url = forecast;
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    admin1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    precipitation: f64,
    wind_speed_10m: f64,
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "open_meteo"
    }

    fn description(&self) -> &str {
        "Condições meteorológicas atuais de uma cidade (informe o nome da cidade)"
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(ToolError::InvalidResponse(
                "nome de cidade vazio".to_string(),
            ));
        }

        debug!(%city, "geocoding lookup");
        let geocoding: GeocodingResponse = self
            .client
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1"), ("language", "pt")])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = geocoding.results.into_iter().next().ok_or_else(|| {
            ToolError::InvalidResponse(format!("cidade não encontrada: '{city}'"))
        })?;

        let lat = place.latitude.to_string();
        let lon = place.longitude.to_string();
        let forecast: ForecastResponse = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m",
                ),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(format_conditions(&place, &forecast.current))
    }
}

fn format_conditions(place: &GeocodingResult, current: &CurrentConditions) -> String {
    let location = match &place.admin1 {
        Some(state) => format!("{} ({state})", place.name),
        None => place.name.clone(),
    };

    format!(
        "🌤️ Clima em {location}:\n\
         Temperatura: {:.1}°C\n\
         Umidade: {:.0}%\n\
         Precipitação: {:.1} mm\n\
         Vento: {:.1} km/h\n\
         Fonte: Open-Meteo",
        current.temperature_2m,
        current.relative_humidity_2m,
        current.precipitation,
        current.wind_speed_10m
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn conditions_use_brazilian_units() {
        let place = GeocodingResult {
            name: "Recife".to_string(),
            latitude: -8.05,
            longitude: -34.9,
            admin1: Some("Pernambuco".to_string()),
        };
        let current = CurrentConditions {
            temperature_2m: 28.4,
            relative_humidity_2m: 78.0,
            precipitation: 0.2,
            wind_speed_10m: 14.3,
        };

        let text = format_conditions(&place, &current);
        assert!(text.contains("Clima em Recife (Pernambuco)"));
        assert!(text.contains("28.4°C"));
        assert!(text.contains("78%"));
        assert!(text.contains("0.2 mm"));
        assert!(text.contains("14.3 km/h"));
    }

    #[tokio::test]
    async fn invoke_chains_geocoding_and_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode"))
            .and(query_param("name", "Brasília"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "name": "Brasília",
                    "latitude": -15.78,
                    "longitude": -47.93,
                    "admin1": "Distrito Federal"
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {
                    "temperature_2m": 24.0,
                    "relative_humidity_2m": 45.0,
                    "precipitation": 0.0,
                    "wind_speed_10m": 9.7
                }
            })))
            .mount(&server)
            .await;

        let tool = WeatherTool::new(reqwest::Client::new(), Duration::from_secs(5))
            .with_base_urls(
                format!("{}/geocode", server.uri()),
                format!("{}/forecast", server.uri()),
            );
        let result = tool.invoke("Brasília").await.unwrap();

        assert!(result.contains("Clima em Brasília (Distrito Federal)"));
        assert!(result.contains("24.0°C"));
    }

    #[tokio::test]
    async fn unknown_city_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": []
            })))
            .mount(&server)
            .await;

        let tool = WeatherTool::new(reqwest::Client::new(), Duration::from_secs(5))
            .with_base_urls(server.uri(), server.uri());
        let result = tool.invoke("Atlântida").await;

        assert!(matches!(result, Err(ToolError::InvalidResponse(_))));
    }
}
