use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc, Weekday};

use crate::record::TimeRecord;

pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -300;
pub const DEFAULT_OBSERVE_DST: bool = true;

/// Fixed UTC offset with an optional US daylight-saving rule
/// (second Sunday of March 02:00 to first Sunday of November 02:00, local).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneRule {
    pub utc_offset_minutes: i32,
    pub observe_dst: bool,
}

impl Default for TimeZoneRule {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            observe_dst: DEFAULT_OBSERVE_DST,
        }
    }
}

impl TimeZoneRule {
    pub fn utc() -> Self {
        Self {
            utc_offset_minutes: 0,
            observe_dst: false,
        }
    }

    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        let standard = instant.naive_utc() + Duration::minutes(i64::from(self.utc_offset_minutes));
        if self.observe_dst && in_us_dst(standard) {
            standard + Duration::hours(1)
        } else {
            standard
        }
    }
}

// `standard` is local standard time, so the November switch (02:00 daylight)
// is 01:00 on the standard clock.
fn in_us_dst(standard: NaiveDateTime) -> bool {
    let year = standard.year();
    let start = sunday_at(year, 3, 2, 2);
    let end = sunday_at(year, 11, 1, 1);
    match (start, end) {
        (Some(start), Some(end)) => standard >= start && standard < end,
        _ => false,
    }
}

fn sunday_at(year: i32, month: u32, nth: u8, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, nth)?.and_hms_opt(hour, 0, 0)
}

/// In-process wall clock, seeded once from network time and advanced one
/// second per tick by the ticker task. Nothing else mutates it.
#[derive(Debug, Clone)]
pub struct Clock {
    now: DateTime<Utc>,
    zone: TimeZoneRule,
    last_minute: Option<i64>,
}

impl Clock {
    pub fn new(seed: DateTime<Utc>, zone: TimeZoneRule) -> Self {
        Self {
            now: seed,
            zone,
            last_minute: None,
        }
    }

    /// Advance one second. Returns the new local time only when a minute has
    /// just begun.
    pub fn tick(&mut self) -> Option<TimeRecord> {
        self.now = self.now + Duration::seconds(1);
        let local = self.zone.to_local(self.now);
        if local.second() != 0 {
            return None;
        }
        let minute = self.now.timestamp().div_euclid(60);
        if self.last_minute == Some(minute) {
            return None;
        }
        self.last_minute = Some(minute);
        Some(TimeRecord::from_local(&local))
    }

    pub fn snapshot(&self) -> TimeRecord {
        TimeRecord::from_local(&self.local())
    }

    pub fn local(&self) -> NaiveDateTime {
        self.zone.to_local(self.now)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
