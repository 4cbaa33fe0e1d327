use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::{LogLevel, Logger};
use crate::{
    channel::UpdateReceiver,
    display::{
        labels::{format_date, format_precipitation, format_temperature, format_time},
        DisplaySurface, WeatherLabel,
    },
    record::{TimeRecord, UpdateRecord, WeatherRecord},
    weather::WeatherCategory,
    Error, Result,
};

/// Apply one record to the display labels. Everything is formatted first;
/// the surface lock is then held only for the field writes and is released
/// on every return path when the guard drops.
pub fn apply(surface: &DisplaySurface, record: &UpdateRecord, logger: &Logger) -> Result<()> {
    if logger.enabled(LogLevel::Debug) {
        logger.debug(format!(
            "dispatch: {} record (length tag {}) {:?}",
            record.kind(),
            record.tag(),
            record.to_fields()
        ));
    }
    match record {
        UpdateRecord::Time(time) => apply_time(surface, time),
        UpdateRecord::Weather(weather) => apply_weather(surface, weather),
    }
}

fn apply_time(surface: &DisplaySurface, time: &TimeRecord) -> Result<()> {
    let time_text = format_time(time);
    let date_text = format_date(time);
    let mut guard = surface.lock()?;
    guard.set_time(time_text);
    guard.set_date(date_text);
    Ok(())
}

fn apply_weather(surface: &DisplaySurface, weather: &WeatherRecord) -> Result<()> {
    let temperature = format_temperature(weather.temperature_f);
    let precipitation = format_precipitation(weather.precipitation_in);
    let mut guard = surface.lock()?;
    let category = WeatherCategory::classify(weather.weather_code)
        .ok_or(Error::UnknownWeatherCode(weather.weather_code))?;
    guard.set_temperature(temperature);
    guard.set_weather(WeatherLabel::from(category));
    guard.set_precipitation(precipitation);
    Ok(())
}

/// Decode a positional (length-tagged) record and apply it.
pub fn apply_fields(surface: &DisplaySurface, fields: &[f32], logger: &Logger) -> Result<()> {
    logger.trace(format!("dispatch: raw fields {fields:?}"));
    let record = UpdateRecord::try_from(fields)?;
    apply(surface, &record, logger)
}

/// Drain the channel forever, one record at a time. Bad records are logged
/// and skipped; the display keeps whatever it showed before.
pub fn run_dispatcher(rx: &UpdateReceiver, surface: &DisplaySurface, logger: &Logger) -> Result<()> {
    loop {
        let record = rx.dequeue()?;
        match apply(surface, &record, logger) {
            Ok(()) => {}
            Err(err @ Error::DisplayLock) => return Err(err),
            Err(err) => logger.error(format!("dispatch: {err}; display left unchanged")),
        }
    }
}

pub fn spawn_dispatcher(
    rx: UpdateReceiver,
    surface: Arc<DisplaySurface>,
    logger: Arc<Logger>,
) -> Result<JoinHandle<Result<()>>> {
    let handle = thread::Builder::new()
        .name("meteoclock-dispatch".into())
        .spawn(move || run_dispatcher(&rx, &surface, &logger))?;
    Ok(handle)
}
