use crate::{
    cli::RunOptions,
    clock::TimeZoneRule,
    config::Config,
    display::{Panel, TerminalSink},
    time_sync::SystemClockSource,
    weather::{OpenMeteoSource, WeatherQuery},
    Error, Result,
};
use std::{path::Path, str::FromStr, sync::Arc, time::Duration};

pub mod dispatcher;
mod lifecycle;
mod logger;
pub mod poller;
pub mod ticker;

pub use lifecycle::{start, Pipeline, PipelineSettings};
pub use logger::{LogLevel, Logger};

/// Config for the daemon: file values with CLI overrides applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
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
    pub cols: u8,
    pub rows: u8,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

pub struct App {
    config: AppConfig,
    logger: Arc<Logger>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let logger = Arc::new(Logger::new(config.log_level, config.log_file.clone()));
        Self { config, logger }
    }

    pub fn from_options(opts: RunOptions) -> Result<Self> {
        let cfg_file = match opts.config_path.as_deref() {
            Some(path) => Config::load_from_path(Path::new(path))?,
            None => Config::load_or_default()?,
        };
        let merged = AppConfig::from_sources(cfg_file, opts)?;
        Ok(Self::new(merged))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Entry point for the daemon. Runs until the dispatcher fails.
    pub fn run(&self) -> Result<()> {
        let config = &self.config;
        self.logger.info(format!(
            "daemon start (lat={}, lon={}, cols={}, rows={})",
            config.latitude, config.longitude, config.cols, config.rows
        ));

        let panel = Panel::new(
            config.cols,
            config.rows,
            Box::new(TerminalSink::stdout(config.cols)),
        )?;
        let weather = OpenMeteoSource::new(
            &config.weather_query(),
            Duration::from_millis(config.http_timeout_ms),
        );
        self.logger.debug(format!("weather: polling {}", weather.url()));
        let mut time = SystemClockSource::new(Duration::from_millis(config.time_sync_poll_ms));

        let pipeline = start(
            config.pipeline_settings(),
            config.time_zone(),
            &mut time,
            Box::new(weather),
            panel,
            Arc::clone(&self.logger),
        )?;
        pipeline.wait()
    }
}

impl AppConfig {
    fn from_config(config: Config) -> Self {
        Self {
            latitude: config.latitude,
            longitude: config.longitude,
            timezone: config.timezone,
            weather_url: config.weather_url,
            utc_offset_minutes: config.utc_offset_minutes,
            observe_dst: config.observe_dst,
            weather_interval_secs: config.weather_interval_secs,
            http_timeout_ms: config.http_timeout_ms,
            tick_ms: config.tick_ms,
            queue_capacity: config.queue_capacity,
            refresh_ms: config.refresh_ms,
            time_sync_poll_ms: config.time_sync_poll_ms,
            cols: config.panel_cols,
            rows: config.panel_rows,
            log_level: LogLevel::default(),
            log_file: None,
        }
    }

    pub fn from_sources(config: Config, opts: RunOptions) -> Result<Self> {
        let mut merged = Self::from_config(config);
        if let Some(lat) = opts.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(Error::InvalidArgs(
                    "latitude must be between -90 and 90".into(),
                ));
            }
            merged.latitude = lat;
        }
        if let Some(lon) = opts.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(Error::InvalidArgs(
                    "longitude must be between -180 and 180".into(),
                ));
            }
            merged.longitude = lon;
        }
        if let Some(level) = opts.log_level.as_deref() {
            merged.log_level = LogLevel::from_str(level).map_err(Error::InvalidArgs)?;
        }
        merged.log_file = opts.log_file;
        Ok(merged)
    }

    pub fn time_zone(&self) -> TimeZoneRule {
        TimeZoneRule {
            utc_offset_minutes: self.utc_offset_minutes,
            observe_dst: self.observe_dst,
        }
    }

    pub fn weather_query(&self) -> WeatherQuery {
        WeatherQuery {
            base_url: self.weather_url.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            queue_capacity: self.queue_capacity,
            tick: Duration::from_millis(self.tick_ms),
            weather_interval: Duration::from_secs(self.weather_interval_secs),
            refresh_interval: Duration::from_millis(self.refresh_ms),
        }
    }
}
