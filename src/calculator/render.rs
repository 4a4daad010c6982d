//! The render contract produced after every intent.

use serde::Serialize;

/// Everything a front end needs to draw the calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Render {
    /// Main display text (formatted operand or error message).
    pub display_text: String,
    /// Pending operand and operator symbol, e.g. `12 +`. Empty if none.
    pub operation_indicator_text: String,
    /// Whether the display shows an error message.
    pub is_error: bool,
    /// Display font size in pixels, chosen from the display text width.
    pub font_size: u16,
}

impl Render {
    pub fn new(display_text: String, operation_indicator_text: String, is_error: bool) -> Self {
        let font_size = FontSize::for_text(&display_text).px();
        Self {
            display_text,
            operation_indicator_text,
            is_error,
            font_size,
        }
    }
}

/// Display font size buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Largest,
    Large,
    Medium,
    Small,
    Smallest,
}

impl FontSize {
    /// Pick a size from the character count of the rendered text.
    pub fn for_text(text: &str) -> Self {
        match text.chars().count() {
            0..=8 => Self::Largest,
            9..=10 => Self::Large,
            11..=12 => Self::Medium,
            13..=15 => Self::Small,
            _ => Self::Smallest,
        }
    }

    pub fn px(self) -> u16 {
        match self {
            Self::Largest => 48,
            Self::Large => 40,
            Self::Medium => 32,
            Self::Small => 28,
            Self::Smallest => 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_breakpoints() {
        assert_eq!(FontSize::for_text("0").px(), 48);
        assert_eq!(FontSize::for_text("12345678").px(), 48);
        assert_eq!(FontSize::for_text("123456789").px(), 40);
        assert_eq!(FontSize::for_text("1234567890").px(), 40);
        assert_eq!(FontSize::for_text("12345678901").px(), 32);
        assert_eq!(FontSize::for_text("1.234568e+12").px(), 32);
        assert_eq!(FontSize::for_text("Result too large").px(), 24);
        assert_eq!(FontSize::for_text("Invalid input").px(), 28);
    }

    #[test]
    fn test_serializes_camel_case() {
        let render = Render::new("12".to_string(), "3 +".to_string(), false);
        let json = serde_json::to_value(&render).unwrap();
        assert_eq!(json["displayText"], "12");
        assert_eq!(json["operationIndicatorText"], "3 +");
        assert_eq!(json["isError"], false);
        assert_eq!(json["fontSize"], 48);
    }
}
