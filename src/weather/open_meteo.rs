use std::io::Read;
use std::time::Duration;

use serde::Deserialize;

use super::WeatherSource;
use crate::{record::WeatherRecord, Error, Result};

pub const DEFAULT_WEATHER_URL: &str = "http://api.open-meteo.com/v1/forecast";
pub const DEFAULT_LATITUDE: f64 = 40.7799;
pub const DEFAULT_LONGITUDE: f64 = -73.8051;
pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 15_000;
/// Responses for the `current` block are a few hundred bytes.
pub const MAX_RESPONSE_BYTES: u64 = 4096;

const CURRENT_FIELDS: &str = "temperature_2m,precipitation,weather_code";

/// Location and units for the current-conditions request.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl Default for WeatherQuery {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_URL.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl WeatherQuery {
    /// Query parameters in request order; values are encoded by the client.
    pub fn params(&self) -> [(&'static str, String); 6] {
        [
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", self.timezone.clone()),
            ("temperature_unit", "fahrenheit".to_string()),
            ("precipitation_unit", "inch".to_string()),
        ]
    }

    pub fn request(&self, agent: &ureq::Agent) -> ureq::Request {
        self.params()
            .iter()
            .fold(agent.get(&self.base_url), |req, (key, value)| {
                req.query(key, value)
            })
    }
}

#[derive(Deserialize)]
struct ForecastRoot {
    current: Option<CurrentBlock>,
}

#[derive(Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<f64>,
}

/// Extract the current-conditions record from a forecast response body.
pub fn parse_current(body: &str) -> Result<WeatherRecord> {
    let root: ForecastRoot =
        serde_json::from_str(body).map_err(|e| Error::Parse(format!("json: {e}")))?;
    let current = root
        .current
        .ok_or_else(|| Error::Parse("response has no 'current' block".into()))?;
    let temperature = current
        .temperature_2m
        .ok_or_else(|| Error::Parse("missing temperature_2m".into()))?;
    let precipitation = current
        .precipitation
        .ok_or_else(|| Error::Parse("missing precipitation".into()))?;
    let code = current
        .weather_code
        .ok_or_else(|| Error::Parse("missing weather_code".into()))?;
    if !code.is_finite() {
        return Err(Error::Parse(format!("weather_code {code} is not a number")));
    }
    Ok(WeatherRecord {
        temperature_f: temperature as f32,
        precipitation_in: precipitation as f32,
        weather_code: code as i32,
    })
}

/// Blocking HTTP client for the Open-Meteo forecast API.
pub struct OpenMeteoSource {
    query: WeatherQuery,
    agent: ureq::Agent,
}

impl OpenMeteoSource {
    pub fn new(query: &WeatherQuery, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            query: query.clone(),
            agent,
        }
    }

    /// Fully encoded request URL.
    pub fn url(&self) -> String {
        self.query.request(&self.agent).url().to_string()
    }

    fn get_body(&self) -> Result<String> {
        let response = self.query.request(&self.agent).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => Error::Fetch(format!("HTTP status {code}")),
            other => Error::Fetch(other.to_string()),
        })?;

        let mut body = String::new();
        response
            .into_reader()
            .take(MAX_RESPONSE_BYTES + 1)
            .read_to_string(&mut body)?;
        if body.len() as u64 > MAX_RESPONSE_BYTES {
            return Err(Error::Fetch(format!(
                "response exceeds {MAX_RESPONSE_BYTES} bytes"
            )));
        }
        Ok(body)
    }
}

impl WeatherSource for OpenMeteoSource {
    fn fetch(&mut self) -> Result<WeatherRecord> {
        let body = self.get_body()?;
        parse_current(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_matches_feed_contract() {
        let source = OpenMeteoSource::new(&WeatherQuery::default(), Duration::from_secs(1));
        let url = source.url();
        assert!(url.starts_with(
            "http://api.open-meteo.com/v1/forecast?latitude=40.7799&longitude=-73.8051&"
        ));
        assert!(url.contains("&current=temperature_2m%2Cprecipitation%2Cweather_code&"));
        assert!(url.contains("&timezone=America%2FNew_York&"));
        assert!(url.ends_with("&temperature_unit=fahrenheit&precipitation_unit=inch"));
    }

    #[test]
    fn timezone_with_spaces_is_encoded() {
        let query = WeatherQuery {
            timezone: "Etc/GMT+5 test".into(),
            ..WeatherQuery::default()
        };
        let url = OpenMeteoSource::new(&query, Duration::from_secs(1)).url();
        assert!(url.contains("timezone=Etc%2FGMT%2B5+test"), "{url}");
    }

    #[test]
    fn parses_current_block() {
        let body = r#"{
            "latitude": 40.78,
            "current_units": {"temperature_2m": "°F"},
            "current": {
                "time": "2024-07-04T13:00",
                "interval": 900,
                "temperature_2m": 72.4,
                "precipitation": 0.15,
                "weather_code": 63
            }
        }"#;
        let record = parse_current(body).unwrap();
        assert_eq!(record.weather_code, 63);
        assert!((record.temperature_f - 72.4).abs() < 1e-4);
        assert!((record.precipitation_in - 0.15).abs() < 1e-6);
    }

    #[test]
    fn missing_field_is_an_error() {
        let body = r#"{"current":{"temperature_2m":70.0,"weather_code":1}}"#;
        let err = parse_current(body).unwrap_err();
        assert!(format!("{err}").contains("precipitation"));
    }

    #[test]
    fn missing_current_block_is_an_error() {
        let err = parse_current(r#"{"error":true,"reason":"bad lat"}"#).unwrap_err();
        assert!(format!("{err}").contains("current"));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(parse_current("<html>"), Err(Error::Parse(_))));
    }

    #[test]
    fn unreachable_host_fails_without_panicking() {
        let query = WeatherQuery {
            base_url: "http://127.0.0.1:9/v1/forecast".into(),
            ..WeatherQuery::default()
        };
        let mut source = OpenMeteoSource::new(&query, Duration::from_millis(200));
        assert!(source.url().starts_with("http://127.0.0.1:9/"));
        assert!(matches!(source.fetch(), Err(Error::Fetch(_))));
    }
}
