use crate::{record::WeatherRecord, Result};

mod category;
pub mod open_meteo;

pub use category::{WeatherCategory, PRECIP_GLYPH};
pub use open_meteo::{OpenMeteoSource, WeatherQuery};

/// Anything that can produce current conditions on demand. `fetch` may block
/// for a full network round trip.
pub trait WeatherSource: Send {
    fn fetch(&mut self) -> Result<WeatherRecord>;
}
