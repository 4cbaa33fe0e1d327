use std::fmt::Write;

use super::text::LabelText;
use crate::record::TimeRecord;
use crate::weather::WeatherCategory;

/// Icon and caption shown in the weather slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherLabel {
    pub glyph: char,
    pub name: &'static str,
}

impl WeatherLabel {
    pub fn loading() -> Self {
        Self {
            glyph: WeatherCategory::ClearSky.glyph(),
            name: "LOADING",
        }
    }
}

impl From<WeatherCategory> for WeatherLabel {
    fn from(category: WeatherCategory) -> Self {
        Self {
            glyph: category.glyph(),
            name: category.label(),
        }
    }
}

/// The five renderable fields. Records overwrite a subset in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    pub time: LabelText,
    pub date: LabelText,
    pub temperature: LabelText,
    pub precipitation: LabelText,
    pub weather: WeatherLabel,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            time: LabelText::from_str_truncated("X:XX"),
            date: LabelText::from_str_truncated("XX/XX/XX"),
            temperature: LabelText::from_str_truncated("XX°F"),
            precipitation: LabelText::from_str_truncated("X.XX"),
            weather: WeatherLabel::loading(),
        }
    }
}

/// `HH:MM` on a 12-hour clock with an `AM`/`PM` suffix.
pub fn format_time(record: &TimeRecord) -> LabelText {
    let hour12 = (u32::from(record.hour) + 11) % 12 + 1;
    let suffix = if record.hour < 12 { "AM" } else { "PM" };
    let mut text = LabelText::new();
    let _ = write!(text, "{hour12:02}:{:02}{suffix}", record.minute);
    text
}

/// `MM/DD/YY`.
pub fn format_date(record: &TimeRecord) -> LabelText {
    let mut text = LabelText::new();
    let _ = write!(
        text,
        "{:02}/{:02}/{:02}",
        record.month,
        record.day,
        record.year.rem_euclid(100)
    );
    text
}

/// Whole degrees (truncated), at least two digits, with a `°F` suffix.
pub fn format_temperature(temperature_f: f32) -> LabelText {
    let mut text = LabelText::new();
    let _ = write!(text, "{:02}°F", temperature_f as i32);
    text
}

pub fn format_precipitation(precipitation_in: f32) -> LabelText {
    let mut text = LabelText::new();
    let _ = write!(text, "{precipitation_in:.2}");
    text
}
