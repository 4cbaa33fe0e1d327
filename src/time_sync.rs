use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

use crate::app::Logger;
use crate::Result;

pub const DEFAULT_SYNC_POLL_MS: u64 = 1000;
/// A clock reading before this (2001-09-09) means it has not been set yet.
const MIN_SYNCED_EPOCH_SECS: u64 = 1_000_000_000;

/// Source of network time, used once at boot to seed the in-process clock.
pub trait TimeSource {
    /// Block until a trustworthy time is available and return it.
    fn wait_for_sync(&mut self, logger: &Logger) -> Result<DateTime<Utc>>;
}

/// Reads the OS clock, which NTP keeps disciplined. Waits while the clock
/// still reads near the epoch (fresh boot, no sync yet).
pub struct SystemClockSource {
    poll: Duration,
}

impl SystemClockSource {
    pub fn new(poll: Duration) -> Self {
        Self { poll }
    }
}

impl Default for SystemClockSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SYNC_POLL_MS))
    }
}

impl TimeSource for SystemClockSource {
    fn wait_for_sync(&mut self, logger: &Logger) -> Result<DateTime<Utc>> {
        loop {
            let now = SystemTime::now();
            let secs = now
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            if secs >= MIN_SYNCED_EPOCH_SECS {
                logger.info(format!(
                    "time: sync done ({})",
                    humantime::format_rfc3339_seconds(now)
                ));
                return Ok(DateTime::<Utc>::from(now));
            }
            logger.info("time: sync in progress");
            thread::sleep(self.poll);
        }
    }
}

/// Always reports the same instant. Handy for demos and tests.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn wait_for_sync(&mut self, _logger: &Logger) -> Result<DateTime<Utc>> {
        Ok(self.instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LogLevel;
    use chrono::TimeZone;

    #[test]
    fn system_clock_is_already_synced_on_a_host() {
        let logger = Logger::new(LogLevel::Error, None);
        let mut source = SystemClockSource::new(Duration::from_millis(10));
        let now = source.wait_for_sync(&logger).unwrap();
        assert!(now.timestamp() as u64 >= MIN_SYNCED_EPOCH_SECS);
    }

    #[test]
    fn fixed_source_returns_its_instant() {
        let logger = Logger::new(LogLevel::Error, None);
        let instant = Utc.with_ymd_and_hms(2024, 7, 4, 16, 59, 59).unwrap();
        let mut source = FixedTimeSource::new(instant);
        assert_eq!(source.wait_for_sync(&logger).unwrap(), instant);
    }
}
