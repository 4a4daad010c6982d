//! Keyboard bindings and menu commands.
//!
//! Input arrives as whitespace separated tokens. A token is either a named
//! key (`Enter`, `Escape`, ...), a menu command (`:copy`, ...), or a run of
//! single-character keys such as `12+3=`.

use crate::calculator::{Intent, Operation};

/// Commands from the application menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Copy,
    Paste,
    Clear,
    About,
    Quit,
}

impl MenuCommand {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "copy" => Some(Self::Copy),
            "paste" => Some(Self::Paste),
            "clear" => Some(Self::Clear),
            "about" => Some(Self::About),
            "quit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// One normalized input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Key(Intent),
    Menu(MenuCommand),
    /// A key or command with no binding.
    Unbound(String),
}

/// Intent for a named key.
pub fn named_key(name: &str) -> Option<Intent> {
    match name {
        "Enter" => Some(Intent::Equals),
        "Escape" | "Delete" => Some(Intent::Clear),
        "Backspace" => Some(Intent::Backspace),
        "CE" => Some(Intent::ClearEntry),
        _ => None,
    }
}

/// Intent for a single character key.
pub fn char_key(key: char) -> Option<Intent> {
    match key {
        '0'..='9' => Intent::digit(key),
        '=' => Some(Intent::Equals),
        '.' | ',' => Some(Intent::Decimal),
        'c' | 'C' => Some(Intent::Clear),
        _ => Operation::from_key(key).map(Intent::Operator),
    }
}

/// Split a line of input into events, in order.
pub fn parse_line(line: &str) -> Vec<Input> {
    let mut inputs = Vec::new();

    for token in line.split_whitespace() {
        if let Some(name) = token.strip_prefix(':') {
            inputs.push(match MenuCommand::parse(name) {
                Some(command) => Input::Menu(command),
                None => Input::Unbound(token.to_string()),
            });
            continue;
        }

        if let Some(intent) = named_key(token) {
            inputs.push(Input::Key(intent));
            continue;
        }

        for key in token.chars() {
            inputs.push(match char_key(key) {
                Some(intent) => Input::Key(intent),
                None => Input::Unbound(key.to_string()),
            });
        }
    }

    inputs
}
