pub mod app;
pub mod channel;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod record;
pub mod time_sync;
pub mod weather;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    InvalidArgs(String),
    Io(std::io::Error),
    Parse(String),
    Fetch(String),
    MalformedRecord(String),
    UnknownWeatherCode(i32),
    ChannelClosed,
    DisplayLock,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgs(msg) => write!(f, "invalid arguments: {msg}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
            Error::Fetch(msg) => write!(f, "fetch failed: {msg}"),
            Error::MalformedRecord(msg) => write!(f, "malformed record: {msg}"),
            Error::UnknownWeatherCode(code) => write!(f, "unknown weather code {code}"),
            Error::ChannelClosed => write!(f, "update channel closed"),
            Error::DisplayLock => write!(f, "display lock poisoned"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(
            Error::UnknownWeatherCode(59).to_string(),
            "unknown weather code 59"
        );
        let io = Error::from(std::io::Error::other("boom"));
        assert!(format!("{io}").contains("io error"));
    }
}
