use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{Error, Result};

use super::{Config, CONFIG_DIR_NAME, CONFIG_FILE_NAME};

pub fn load_or_default() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        let cfg = Config::default();
        cfg.save_to_path(&path)?;
        super::validate(&cfg)?;
        return Ok(cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        let cfg = Config::default();
        super::validate(&cfg)?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = format!(
        "# meteoclock config\n\
latitude = {}\n\
longitude = {}\n\
timezone = \"{}\"\n\
weather_url = \"{}\"\n\
utc_offset_minutes = {}\n\
observe_dst = {}\n\
weather_interval_secs = {}\n\
http_timeout_ms = {}\n\
tick_ms = {}\n\
queue_capacity = {}\n\
refresh_ms = {}\n\
time_sync_poll_ms = {}\n\
panel_cols = {}\n\
panel_rows = {}\n",
        config.latitude,
        config.longitude,
        config.timezone,
        config.weather_url,
        config.utc_offset_minutes,
        config.observe_dst,
        config.weather_interval_secs,
        config.http_timeout_ms,
        config.tick_ms,
        config.queue_capacity,
        config.refresh_ms,
        config.time_sync_poll_ms,
        config.panel_cols,
        config.panel_rows,
    );
    fs::write(path, contents)?;
    Ok(())
}

pub fn parse(raw: &str) -> Result<Config> {
    let mut cfg = Config::default();

    for (idx, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = trimmed.split_once('=').ok_or_else(|| {
            Error::InvalidArgs(format!("invalid config line {}: '{}'", idx + 1, line))
        })?;

        let key = key.trim();
        let value = value.trim().trim_matches('"');
        let line_no = idx + 1;
        match key {
            "latitude" => cfg.latitude = parse_value(key, value, line_no)?,
            "longitude" => cfg.longitude = parse_value(key, value, line_no)?,
            "timezone" => cfg.timezone = value.to_string(),
            "weather_url" => cfg.weather_url = value.to_string(),
            "utc_offset_minutes" => cfg.utc_offset_minutes = parse_value(key, value, line_no)?,
            "observe_dst" => cfg.observe_dst = parse_value(key, value, line_no)?,
            "weather_interval_secs" => {
                cfg.weather_interval_secs = parse_value(key, value, line_no)?
            }
            "http_timeout_ms" => cfg.http_timeout_ms = parse_value(key, value, line_no)?,
            "tick_ms" => cfg.tick_ms = parse_value(key, value, line_no)?,
            "queue_capacity" => cfg.queue_capacity = parse_value(key, value, line_no)?,
            "refresh_ms" => cfg.refresh_ms = parse_value(key, value, line_no)?,
            "time_sync_poll_ms" => cfg.time_sync_poll_ms = parse_value(key, value, line_no)?,
            "panel_cols" => cfg.panel_cols = parse_value(key, value, line_no)?,
            "panel_rows" => cfg.panel_rows = parse_value(key, value, line_no)?,
            other => {
                return Err(Error::InvalidArgs(format!(
                    "unknown config key '{other}' on line {line_no}"
                )));
            }
        }
    }

    super::validate(&cfg)?;
    Ok(cfg)
}

fn parse_value<T: FromStr>(key: &str, value: &str, line_no: usize) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::InvalidArgs(format!("invalid {key} value on line {line_no}")))
}

fn config_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .ok_or_else(|| Error::InvalidArgs("HOME is not set; pass --config".into()))?;
    Ok(PathBuf::from(home)
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_from_path(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn parses_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let contents = r#"
            # home
            latitude = 51.5072
            longitude = -0.1276
            timezone = "Europe/London"
            utc_offset_minutes = 0
            observe_dst = false
            weather_interval_secs = 1800
            queue_capacity = 8
            panel_cols = 20
        "#;
        fs::write(&path, contents).unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.latitude, 51.5072);
        assert_eq!(cfg.longitude, -0.1276);
        assert_eq!(cfg.timezone, "Europe/London");
        assert_eq!(cfg.utc_offset_minutes, 0);
        assert!(!cfg.observe_dst);
        assert_eq!(cfg.weather_interval_secs, 1800);
        assert_eq!(cfg.queue_capacity, 8);
        assert_eq!(cfg.panel_cols, 20);
        assert_eq!(cfg.tick_ms, super::super::DEFAULT_TICK_MS);
    }

    #[test]
    fn rejects_unknown_key() {
        let err = parse("nope = 1").unwrap_err();
        assert!(format!("{err}").contains("unknown config key"));
    }

    #[test]
    fn rejects_unparsable_value() {
        let err = parse("\n\nqueue_capacity = lots").unwrap_err();
        assert!(format!("{err}").contains("invalid queue_capacity value on line 3"));
    }

    #[test]
    fn rejects_line_without_equals() {
        let err = parse("latitude 40").unwrap_err();
        assert!(format!("{err}").contains("invalid config line 1"));
    }

    #[test]
    fn rejects_out_of_range_rows() {
        let err = parse("panel_rows = 1").unwrap_err();
        assert!(format!("{err}").contains("panel_rows must"));
    }

    #[test]
    fn saves_and_loads_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            latitude: -33.8688,
            longitude: 151.2093,
            timezone: "Australia/Sydney".into(),
            utc_offset_minutes: 600,
            observe_dst: false,
            refresh_ms: 250,
            ..Config::default()
        };
        cfg.save_to_path(&path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), cfg);
    }
}
