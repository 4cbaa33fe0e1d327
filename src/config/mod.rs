use crate::{Error, Result};
use std::path::Path;

pub mod loader;

pub use crate::channel::DEFAULT_QUEUE_CAPACITY;
pub use crate::clock::{DEFAULT_OBSERVE_DST, DEFAULT_UTC_OFFSET_MINUTES};
use crate::display::layout::MIN_COLS;
pub use crate::display::panel::{DEFAULT_COLS, DEFAULT_ROWS};
pub use crate::display::surface::DEFAULT_REFRESH_MS;
pub use crate::time_sync::DEFAULT_SYNC_POLL_MS;
pub use crate::weather::open_meteo::{
    DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE,
    DEFAULT_WEATHER_URL,
};
pub use crate::app::poller::DEFAULT_WEATHER_INTERVAL_SECS;

pub const DEFAULT_TICK_MS: u64 = 1000;
const CONFIG_DIR_NAME: &str = ".meteoclock";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User-supplied settings loaded from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub weather_url: String,
    pub utc_offset_minutes: i32,
    pub observe_dst: bool,
    pub weather_interval_secs: u64,
    pub http_timeout_ms: u64,
    pub tick_ms: u64,
    pub queue_capacity: usize,
    pub refresh_ms: u64,
    pub time_sync_poll_ms: u64,
    pub panel_cols: u8,
    pub panel_rows: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            timezone: DEFAULT_TIMEZONE.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            observe_dst: DEFAULT_OBSERVE_DST,
            weather_interval_secs: DEFAULT_WEATHER_INTERVAL_SECS,
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            tick_ms: DEFAULT_TICK_MS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            refresh_ms: DEFAULT_REFRESH_MS,
            time_sync_poll_ms: DEFAULT_SYNC_POLL_MS,
            panel_cols: DEFAULT_COLS,
            panel_rows: DEFAULT_ROWS,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        loader::load_or_default()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        loader::load_from_path(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        loader::save_to_path(self, path)
    }
}

pub(crate) fn validate(cfg: &Config) -> Result<()> {
    if !(-90.0..=90.0).contains(&cfg.latitude) {
        return Err(Error::InvalidArgs(
            "latitude must be between -90 and 90".into(),
        ));
    }
    if !(-180.0..=180.0).contains(&cfg.longitude) {
        return Err(Error::InvalidArgs(
            "longitude must be between -180 and 180".into(),
        ));
    }
    if cfg.timezone.trim().is_empty() {
        return Err(Error::InvalidArgs("timezone must not be empty".into()));
    }
    if !(cfg.weather_url.starts_with("http://") || cfg.weather_url.starts_with("https://")) {
        return Err(Error::InvalidArgs(
            "weather_url must start with http:// or https://".into(),
        ));
    }
    if !(-840..=840).contains(&cfg.utc_offset_minutes) {
        return Err(Error::InvalidArgs(
            "utc_offset_minutes must be between -840 and 840".into(),
        ));
    }
    if cfg.weather_interval_secs < 60 {
        return Err(Error::InvalidArgs(
            "weather_interval_secs must be at least 60".into(),
        ));
    }
    if cfg.http_timeout_ms < 100 {
        return Err(Error::InvalidArgs(
            "http_timeout_ms must be at least 100".into(),
        ));
    }
    if cfg.tick_ms == 0 {
        return Err(Error::InvalidArgs("tick_ms must be at least 1".into()));
    }
    if !(1..=64).contains(&cfg.queue_capacity) {
        return Err(Error::InvalidArgs(
            "queue_capacity must be between 1 and 64".into(),
        ));
    }
    if cfg.refresh_ms < 10 {
        return Err(Error::InvalidArgs("refresh_ms must be at least 10".into()));
    }
    if cfg.time_sync_poll_ms < 10 {
        return Err(Error::InvalidArgs(
            "time_sync_poll_ms must be at least 10".into(),
        ));
    }
    if !(MIN_COLS..=40).contains(&cfg.panel_cols) {
        return Err(Error::InvalidArgs(format!(
            "panel_cols must be between {MIN_COLS} and 40"
        )));
    }
    if !(3..=8).contains(&cfg.panel_rows) {
        return Err(Error::InvalidArgs(
            "panel_rows must be between 3 and 8".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        validate(&Config::default()).unwrap();
    }

    #[test]
    fn rejects_zero_capacity() {
        let cfg = Config {
            queue_capacity: 0,
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(format!("{err}").contains("queue_capacity"));
    }

    #[test]
    fn rejects_panel_narrower_than_layout() {
        let cfg = Config {
            panel_cols: 12,
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(format!("{err}").contains("panel_cols must be between 16 and 40"));
        validate(&Config {
            panel_cols: 16,
            ..Config::default()
        })
        .unwrap();
    }

    #[test]
    fn rejects_bad_url_scheme() {
        let cfg = Config {
            weather_url: "ftp://example.com".into(),
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
    }
}
