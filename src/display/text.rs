use std::fmt;

/// Bytes available to one label.
pub const LABEL_CAPACITY: usize = 9;

pub type LabelText = BoundedText<LABEL_CAPACITY>;

/// Fixed-capacity UTF-8 text. Writes past capacity are cut at a character
/// boundary and every later write is ignored; nothing overflows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundedText<const N: usize> {
    buf: heapless::String<N>,
    truncated: bool,
}

impl<const N: usize> BoundedText<N> {
    pub fn new() -> Self {
        Self {
            buf: heapless::String::new(),
            truncated: false,
        }
    }

    pub fn from_str_truncated(s: &str) -> Self {
        let mut text = Self::new();
        text.push_str(s);
        text
    }

    pub fn push_str(&mut self, s: &str) {
        if self.truncated {
            return;
        }
        for ch in s.chars() {
            if self.buf.push(ch).is_err() {
                self.truncated = true;
                return;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.truncated = false;
    }
}

impl<const N: usize> fmt::Write for BoundedText<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn fits_within_capacity() {
        let mut text = LabelText::new();
        let _ = write!(text, "{:02}:{:02}PM", 1, 0);
        assert_eq!(text, "01:00PM");
        assert!(!text.is_truncated());
    }

    #[test]
    fn truncates_instead_of_overflowing() {
        let mut text = BoundedText::<4>::new();
        let _ = write!(text, "{}", 123456);
        assert_eq!(text, "1234");
        assert!(text.is_truncated());
        text.push_str("5");
        assert_eq!(text.as_str(), "1234");
    }

    #[test]
    fn never_splits_a_multibyte_char() {
        // "°" is two bytes; only one is left after "100".
        let text = BoundedText::<4>::from_str_truncated("100°F");
        assert_eq!(text.as_str(), "100");
        assert!(text.is_truncated());
    }

    #[test]
    fn clear_resets_state() {
        let mut text = BoundedText::<2>::from_str_truncated("abc");
        text.clear();
        assert!(!text.is_truncated());
        text.push_str("ok");
        assert_eq!(text, "ok");
    }
}
