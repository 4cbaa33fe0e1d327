/// Precipitation glyph in the weather symbol font.
pub const PRECIP_GLYPH: char = '\u{f043}';

/// Closed set of conditions the display can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    ClearSky,
    Cloudy,
    Drizzle,
    Rain,
    Thunder,
    Snow,
}

impl WeatherCategory {
    pub const ALL: [WeatherCategory; 6] = [
        WeatherCategory::ClearSky,
        WeatherCategory::Cloudy,
        WeatherCategory::Drizzle,
        WeatherCategory::Rain,
        WeatherCategory::Thunder,
        WeatherCategory::Snow,
    ];

    /// Map an Open-Meteo (WMO) weather code. Codes in the gaps between
    /// ranges, and negative codes, have no category.
    pub fn classify(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::ClearSky),
            1..=48 => Some(Self::Cloudy),
            49..=57 => Some(Self::Drizzle),
            61..=67 | 80..=82 => Some(Self::Rain),
            71..=77 | 85..=86 => Some(Self::Thunder),
            95.. => Some(Self::Snow),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ClearSky => "Clear Sky",
            Self::Cloudy => "Cloudy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Thunder => "Thunder",
            Self::Snow => "Snow",
        }
    }

    /// Codepoint of the icon in the weather symbol font.
    pub fn glyph(self) -> char {
        match self {
            Self::ClearSky => '\u{f111}',
            Self::Cloudy => '\u{f0c2}',
            Self::Drizzle => '\u{f73d}',
            Self::Rain => '\u{f740}',
            Self::Thunder => '\u{f75a}',
            Self::Snow => '\u{f2dc}',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(WeatherCategory::classify(0), Some(WeatherCategory::ClearSky));
        assert_eq!(WeatherCategory::classify(63), Some(WeatherCategory::Rain));
        assert_eq!(WeatherCategory::classify(96), Some(WeatherCategory::Snow));
        assert_eq!(WeatherCategory::classify(59), None);
    }

    #[test]
    fn range_edges() {
        let cases = [
            (1, Some(WeatherCategory::Cloudy)),
            (48, Some(WeatherCategory::Cloudy)),
            (49, Some(WeatherCategory::Drizzle)),
            (57, Some(WeatherCategory::Drizzle)),
            (60, None),
            (61, Some(WeatherCategory::Rain)),
            (67, Some(WeatherCategory::Rain)),
            (68, None),
            (71, Some(WeatherCategory::Thunder)),
            (77, Some(WeatherCategory::Thunder)),
            (79, None),
            (80, Some(WeatherCategory::Rain)),
            (82, Some(WeatherCategory::Rain)),
            (84, None),
            (85, Some(WeatherCategory::Thunder)),
            (86, Some(WeatherCategory::Thunder)),
            (87, None),
            (94, None),
            (95, Some(WeatherCategory::Snow)),
            (-1, None),
        ];
        for (code, expected) in cases {
            assert_eq!(WeatherCategory::classify(code), expected, "code {code}");
        }
    }

    #[test]
    fn glyphs_and_labels_are_distinct() {
        for (i, a) in WeatherCategory::ALL.iter().enumerate() {
            for b in &WeatherCategory::ALL[i + 1..] {
                assert_ne!(a.glyph(), b.glyph());
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
