use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::labels::{LabelSet, WeatherLabel};
use super::layout::compose;
use super::panel::Panel;
use super::text::LabelText;
use crate::app::Logger;
use crate::{Error, Result};

pub const DEFAULT_REFRESH_MS: u64 = 100;

struct Inner {
    labels: LabelSet,
    dirty: bool,
}

/// Label set shared by the render dispatcher and the panel refresh task.
/// All access goes through [`DisplaySurface::lock`].
pub struct DisplaySurface {
    inner: Mutex<Inner>,
}

/// Scoped access to the labels; the lock is released when this drops.
pub struct SurfaceGuard<'a> {
    inner: MutexGuard<'a, Inner>,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                labels: LabelSet::default(),
                dirty: true,
            }),
        }
    }

    pub fn lock(&self) -> Result<SurfaceGuard<'_>> {
        let inner = self.inner.lock().map_err(|_| Error::DisplayLock)?;
        Ok(SurfaceGuard { inner })
    }

    /// Non-blocking variant; `None` while someone else holds the lock.
    pub fn try_lock(&self) -> Option<SurfaceGuard<'_>> {
        self.inner.try_lock().ok().map(|inner| SurfaceGuard { inner })
    }

    pub fn snapshot(&self) -> Result<LabelSet> {
        Ok(self.lock()?.labels().clone())
    }

    /// Push the labels to `panel` if anything changed since the last redraw.
    /// Returns whether a frame was presented. A frame that fails to reach
    /// the panel leaves the surface dirty so the next call tries again.
    pub fn redraw(&self, panel: &mut Panel) -> Result<bool> {
        let lines = {
            let mut guard = self.lock()?;
            if !guard.inner.dirty {
                return Ok(false);
            }
            guard.inner.dirty = false;
            compose(&guard.inner.labels, panel.cols(), panel.rows())
        };
        if let Err(err) = Self::paint(panel, &lines) {
            self.lock()?.inner.dirty = true;
            return Err(err);
        }
        Ok(true)
    }

    fn paint(panel: &mut Panel, lines: &[String]) -> Result<()> {
        panel.clear();
        for (row, line) in lines.iter().enumerate() {
            panel.write_line(row as u8, line)?;
        }
        panel.present()
    }

    /// Background redraw task. Runs for the life of the process.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        mut panel: Panel,
        interval: Duration,
        logger: Arc<Logger>,
    ) -> Result<JoinHandle<()>> {
        let surface = Arc::clone(self);
        let handle = thread::Builder::new()
            .name("meteoclock-refresh".into())
            .spawn(move || loop {
                if let Err(err) = surface.redraw(&mut panel) {
                    logger.warn(format!("refresh: redraw failed: {err}"));
                }
                thread::sleep(interval);
            })?;
        Ok(handle)
    }
}

impl SurfaceGuard<'_> {
    pub fn labels(&self) -> &LabelSet {
        &self.inner.labels
    }

    pub fn set_time(&mut self, text: LabelText) {
        self.inner.labels.time = text;
        self.inner.dirty = true;
    }

    pub fn set_date(&mut self, text: LabelText) {
        self.inner.labels.date = text;
        self.inner.dirty = true;
    }

    pub fn set_temperature(&mut self, text: LabelText) {
        self.inner.labels.temperature = text;
        self.inner.dirty = true;
    }

    pub fn set_precipitation(&mut self, text: LabelText) {
        self.inner.labels.precipitation = text;
        self.inner.dirty = true;
    }

    pub fn set_weather(&mut self, label: WeatherLabel) {
        self.inner.labels.weather = label;
        self.inner.dirty = true;
    }
}
