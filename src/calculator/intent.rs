//! The fixed vocabulary of engine intents.

use super::Operation;

/// A normalized user intent fed into the [`Engine`](super::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// A digit key, 0 through 9.
    Digit(u8),
    Decimal,
    Operator(Operation),
    Equals,
    Clear,
    ClearEntry,
    Backspace,
    /// Text read from the clipboard.
    Paste(String),
}

impl Intent {
    /// Digit intent for an ASCII digit character.
    pub fn digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self::Digit(d as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit() {
        assert_eq!(Intent::digit('0'), Some(Intent::Digit(0)));
        assert_eq!(Intent::digit('9'), Some(Intent::Digit(9)));
        assert_eq!(Intent::digit('a'), None);
        assert_eq!(Intent::digit('.'), None);
    }
}
