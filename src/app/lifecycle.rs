use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::{dispatcher, poller, ticker, Logger};
use crate::{
    channel,
    clock::{Clock, TimeZoneRule},
    display::{DisplaySurface, Panel},
    record::UpdateRecord,
    time_sync::TimeSource,
    weather::WeatherSource,
    Error, Result,
};

/// Timing and sizing knobs for the running pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub queue_capacity: usize,
    pub tick: Duration,
    pub weather_interval: Duration,
    pub refresh_interval: Duration,
}

/// Handles to the running tasks. Only the dispatcher is ever joined.
pub struct Pipeline {
    surface: Arc<DisplaySurface>,
    dispatcher: JoinHandle<Result<()>>,
    _ticker: JoinHandle<()>,
    _poller: JoinHandle<()>,
    _refresh: JoinHandle<()>,
}

impl Pipeline {
    pub fn surface(&self) -> &Arc<DisplaySurface> {
        &self.surface
    }

    /// Block on the dispatcher. Returns only if it stops with an error.
    pub fn wait(self) -> Result<()> {
        self.dispatcher
            .join()
            .map_err(|_| Error::Io(std::io::Error::other("dispatcher thread panicked")))?
    }
}

/// Bring the display up, seed the clock from `time`, render the first time
/// record, then start the ticker, poller, dispatcher and refresh tasks.
pub fn start<T: TimeSource + ?Sized>(
    settings: PipelineSettings,
    zone: TimeZoneRule,
    time: &mut T,
    weather: Box<dyn WeatherSource>,
    mut panel: Panel,
    logger: Arc<Logger>,
) -> Result<Pipeline> {
    panel.render_boot_message()?;
    logger.info(format!(
        "boot: panel {}x{}, waiting for time sync",
        panel.cols(),
        panel.rows()
    ));

    let seed = time.wait_for_sync(&logger)?;
    let clock = Clock::new(seed, zone);

    let surface = Arc::new(DisplaySurface::new());
    dispatcher::apply(&surface, &UpdateRecord::Time(clock.snapshot()), &logger)?;

    let (tx, rx) = channel::bounded(settings.queue_capacity)?;

    let refresh = surface.spawn_refresh(panel, settings.refresh_interval, Arc::clone(&logger))?;
    let ticker = ticker::spawn_ticker(clock, tx.clone(), settings.tick, Arc::clone(&logger))?;
    let poller =
        poller::spawn_poller(weather, tx, settings.weather_interval, Arc::clone(&logger))?;
    let dispatcher = dispatcher::spawn_dispatcher(rx, Arc::clone(&surface), Arc::clone(&logger))?;

    logger.info("boot: all tasks started");
    Ok(Pipeline {
        surface,
        dispatcher,
        _ticker: ticker,
        _poller: poller,
        _refresh: refresh,
    })
}
