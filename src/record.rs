//! Update records carried from the producers to the render dispatcher.
//!
//! On the wire a record is a float array whose first element is a length
//! tag (6 for time, 4 for weather). In memory it is a sum type; the
//! positional form is only used for logging and for decoding raw frames,
//! and decoding is where bad tags get rejected.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::{Error, Result};

/// Slots in the positional form, tag included.
pub const RECORD_CAPACITY: usize = 6;
pub const TIME_TAG: u8 = 6;
pub const WEATHER_TAG: u8 = 4;

/// Wall-clock snapshot taken on a minute boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRecord {
    pub day: u8,
    /// 1-based.
    pub month: u8,
    pub year: i32,
    /// 0-23.
    pub hour: u8,
    pub minute: u8,
}

impl TimeRecord {
    pub fn from_local(local: &NaiveDateTime) -> Self {
        Self {
            day: local.day() as u8,
            month: local.month() as u8,
            year: local.year(),
            hour: local.hour() as u8,
            minute: local.minute() as u8,
        }
    }
}

/// Current conditions as reported by the weather feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRecord {
    pub temperature_f: f32,
    pub precipitation_in: f32,
    pub weather_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateRecord {
    Time(TimeRecord),
    Weather(WeatherRecord),
}

impl UpdateRecord {
    /// Length tag: slots occupied in the positional form, tag included.
    pub fn tag(&self) -> u8 {
        match self {
            UpdateRecord::Time(_) => TIME_TAG,
            UpdateRecord::Weather(_) => WEATHER_TAG,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UpdateRecord::Time(_) => "time",
            UpdateRecord::Weather(_) => "weather",
        }
    }

    /// Encode into the positional form; unused trailing slots are zero.
    pub fn to_fields(&self) -> [f32; RECORD_CAPACITY] {
        let mut fields = [0.0; RECORD_CAPACITY];
        fields[0] = f32::from(self.tag());
        match self {
            UpdateRecord::Time(t) => {
                fields[1] = f32::from(t.day);
                fields[2] = f32::from(t.month);
                fields[3] = t.year as f32;
                fields[4] = f32::from(t.hour);
                fields[5] = f32::from(t.minute);
            }
            UpdateRecord::Weather(w) => {
                fields[1] = w.temperature_f;
                fields[2] = w.precipitation_in;
                fields[3] = w.weather_code as f32;
            }
        }
        fields
    }
}

impl TryFrom<&[f32]> for UpdateRecord {
    type Error = Error;

    fn try_from(fields: &[f32]) -> Result<Self> {
        let raw_tag = *fields
            .first()
            .ok_or_else(|| Error::MalformedRecord("empty record".into()))?;
        if raw_tag.fract() != 0.0 {
            return Err(Error::MalformedRecord(format!("length tag {raw_tag}")));
        }
        let tag = raw_tag as i64;
        let needed = usize::try_from(tag).unwrap_or(usize::MAX);
        if tag != i64::from(TIME_TAG) && tag != i64::from(WEATHER_TAG) {
            return Err(Error::MalformedRecord(format!("length tag {tag}")));
        }
        if fields.len() < needed {
            return Err(Error::MalformedRecord(format!(
                "tag {tag} needs {needed} fields, got {}",
                fields.len()
            )));
        }

        if tag == i64::from(TIME_TAG) {
            let day = field_in(fields[1], 1, 31, "day")?;
            let month = field_in(fields[2], 1, 12, "month")?;
            let year = field_in(fields[3], 0, 9999, "year")?;
            let hour = field_in(fields[4], 0, 23, "hour")?;
            let minute = field_in(fields[5], 0, 59, "minute")?;
            Ok(UpdateRecord::Time(TimeRecord {
                day: day as u8,
                month: month as u8,
                year,
                hour: hour as u8,
                minute: minute as u8,
            }))
        } else {
            if !fields[3].is_finite() {
                return Err(Error::MalformedRecord("weather code is not finite".into()));
            }
            Ok(UpdateRecord::Weather(WeatherRecord {
                temperature_f: fields[1],
                precipitation_in: fields[2],
                weather_code: fields[3] as i32,
            }))
        }
    }
}

fn field_in(value: f32, min: i32, max: i32, name: &str) -> Result<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::MalformedRecord(format!("{name} {value} is not an integer")));
    }
    let value = value as i32;
    if value < min || value > max {
        return Err(Error::MalformedRecord(format!(
            "{name} {value} outside {min}..={max}"
        )));
    }
    Ok(value)
}

impl fmt::Display for UpdateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateRecord::Time(t) => write!(
                f,
                "time {:02}-{:02}-{:04} {:02}:{:02}",
                t.day, t.month, t.year, t.hour, t.minute
            ),
            UpdateRecord::Weather(w) => write!(
                f,
                "weather {:.1}F {:.2}in code {}",
                w.temperature_f, w.precipitation_in, w.weather_code
            ),
        }
    }
}
