//! Current weather from the OpenWeatherMap API.

use anyhow::{Context, Result};
use log::debug;
use serde_json::{Map, Value};

pub const OPENWEATHER_API_BASE: &str = "http://api.openweathermap.org";

pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetches the current weather for `city` in metric units.
    ///
    /// A non-success status is returned as an error carrying the status code.
    pub async fn fetch_current(&self, city: &str) -> Result<Value> {
        let url = format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'));
        debug!("GET {} for `{}`", url, city);

        let payload = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .with_context(|| format!("Weather request for `{city}` failed"))?
            .error_for_status()?
            .json()
            .await
            .context("Weather response is not JSON")?;

        Ok(payload)
    }
}

/// Keeps the top-level entries of `payload` named in `keys`. Keys the payload
/// doesn't have are skipped.
pub fn extract<S: AsRef<str>>(payload: &Value, keys: &[S]) -> Map<String, Value> {
    let mut extracted = Map::new();
    let Some(object) = payload.as_object() else {
        return extracted;
    };

    for key in keys {
        let key = key.as_ref();
        if let Some(value) = object.get(key) {
            extracted.insert(key.to_string(), value.clone());
        }
    }

    extracted
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn should_extract_requested_keys() {
        let payload = json!({ "main": { "temp": 10 }, "wind": { "speed": 3.6, "deg": 220 } });

        let extracted = extract(&payload, &["main"]);

        assert_eq!(Value::Object(extracted), json!({ "main": { "temp": 10 } }));
    }

    #[test]
    fn should_skip_missing_keys() {
        assert!(extract(&json!({}), &["main"]).is_empty());

        let payload = json!({ "name": "Berlin", "visibility": 10000 });
        let extracted = extract(&payload, &["name", "rain", "visibility"]);
        assert_eq!(
            Value::Object(extracted),
            json!({ "name": "Berlin", "visibility": 10000 })
        );
    }

    #[test]
    fn should_extract_nothing_from_non_object() {
        assert!(extract(&json!([1, 2, 3]), &["main"]).is_empty());
    }

    #[tokio::test]
    async fn should_fetch_current_weather() {
        let server = MockServer::start_async().await;
        let weather_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/data/2.5/weather")
                    .query_param("q", "Hamburg")
                    .query_param("appid", "test-key")
                    .query_param("units", "metric");
                then.status(200).json_body(json!({
                    "name": "Hamburg",
                    "main": { "temp": 4.2, "humidity": 87 },
                    "wind": { "speed": 6.1 }
                }));
            })
            .await;

        let client = WeatherClient::with_base_url("test-key".to_string(), server.base_url());
        let payload = client.fetch_current("Hamburg").await.unwrap();

        weather_mock.assert_async().await;
        assert_eq!(payload["main"]["humidity"], json!(87));
    }

    #[tokio::test]
    async fn should_surface_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data/2.5/weather");
                then.status(401)
                    .json_body(json!({ "cod": 401, "message": "Invalid API key." }));
            })
            .await;

        let client = WeatherClient::with_base_url("bad-key".to_string(), server.base_url());
        let err = client.fetch_current("Hamburg").await.unwrap_err();

        let status = err.downcast_ref::<reqwest::Error>().and_then(|e| e.status());
        assert_eq!(status, Some(reqwest::StatusCode::UNAUTHORIZED));
    }
}
