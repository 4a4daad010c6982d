//! Clipboard access for copying the display and pasting operands.

use arboard::Clipboard;
use thiserror::Error;

/// Errors from a clipboard backend.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Access(#[source] arboard::Error),
    #[error("Failed to copy to clipboard: {0}")]
    Write(#[source] arboard::Error),
    #[error("Failed to read clipboard: {0}")]
    Read(#[source] arboard::Error),
    #[error("Clipboard is empty")]
    Empty,
}

/// Something that can hold text for Copy and Paste.
pub trait ClipboardBackend {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard.
///
/// A fresh handle is opened for every request so a clipboard manager that
/// goes away between requests does not poison later ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        let mut clipboard = Clipboard::new().map_err(ClipboardError::Access)?;
        clipboard.get_text().map_err(|e| match e {
            arboard::Error::ContentNotAvailable => ClipboardError::Empty,
            other => ClipboardError::Read(other),
        })
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new().map_err(ClipboardError::Access)?;
        clipboard
            .set_text(text.to_string())
            .map_err(ClipboardError::Write)
    }
}

/// An in-process clipboard, used when the system clipboard is disabled.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard pre-filled with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.contents.clone().ok_or(ClipboardError::Empty)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
