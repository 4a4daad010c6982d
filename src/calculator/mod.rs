//! Calculator module: the engine behind the keypad.
//!
//! This module provides functionality to:
//! - Drive the calculator state machine from discrete intents
//! - Format results and operands for a bounded-width display
//! - Validate pasted text before it reaches the engine
//! - Read and write the clipboard

mod clipboard;
mod engine;
mod error;
mod format;
mod intent;
mod operation;
mod paste;
mod render;

pub use clipboard::{ClipboardBackend, ClipboardError, MemoryClipboard, SystemClipboard};
pub use engine::{Engine, ErrorState, Phase};
pub use error::CalcError;
pub use format::{MAX_OPERAND_LEN, format_number, format_result};
pub use intent::Intent;
pub use operation::Operation;
pub use paste::parse_pasted;
pub use render::{FontSize, Render};
