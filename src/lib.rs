//! zcalc: a desktop-style arithmetic calculator.
//!
//! The [`calculator`] module holds the engine and its formatting rules; the
//! [`shell`] module is a thin front end that feeds it intents.

pub mod calculator;
pub mod config;
pub mod shell;

/// Application version string.
pub fn version() -> &'static str {
    match env!("CARGO_PKG_VERSION") {
        "" => "1.0.0",
        version => version,
    }
}
