use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::Logger;
use crate::{channel::UpdateSender, record::UpdateRecord, weather::WeatherSource, Result};

pub const DEFAULT_WEATHER_INTERVAL_SECS: u64 = 60 * 60;

/// One fetch cycle: a weather record on success, nothing on failure.
pub fn poll_once<S: WeatherSource + ?Sized>(
    source: &mut S,
    tx: &UpdateSender,
    logger: &Logger,
) -> Result<bool> {
    match source.fetch() {
        Ok(weather) => {
            let record = UpdateRecord::Weather(weather);
            logger.info(format!("poller: {record}"));
            tx.enqueue(record)?;
            Ok(true)
        }
        Err(err) => {
            logger.warn(format!("poller: fetch failed: {err}; next try in one interval"));
            Ok(false)
        }
    }
}

/// Spawn the weather poller: fetch now, then once per `interval`, whatever
/// the previous outcome was.
pub fn spawn_poller(
    mut source: Box<dyn WeatherSource>,
    tx: UpdateSender,
    interval: Duration,
    logger: Arc<Logger>,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("meteoclock-poller".into())
        .spawn(move || loop {
            if let Err(err) = poll_once(source.as_mut(), &tx, &logger) {
                logger.error(format!("poller: {err}; stopping"));
                return;
            }
            thread::sleep(interval);
        })?;
    Ok(handle)
}
