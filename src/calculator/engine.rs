//! The calculator state machine.
//!
//! The engine keeps the operand being typed, the operand captured when an
//! operator was pressed, the pending operation and the input-replace flag.
//! Arithmetic folds left to right: `3 + 4 + 5 =` evaluates `3 + 4` when the
//! second `+` is pressed.
//!
//! Errors put the engine into an error state. While in it, only
//! [`Engine::clear`] and [`Engine::expire_error`] have any effect.

use super::format::{MAX_OPERAND_LEN, format_number, format_result};
use super::{CalcError, Intent, Operation, Render, parse_pasted};
use tracing::debug;

/// The error the engine is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorState {
    pub kind: CalcError,
    /// Incremented on every entry into the error state. An auto-clear timer
    /// carries the epoch it was scheduled for.
    pub epoch: u64,
}

/// Coarse state of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Typing an operand.
    Entering,
    /// An operator was pressed and the next operand has not started yet.
    OperatorPending,
    /// Showing an error until it expires or is cleared.
    Error,
}

/// Calculator engine.
#[derive(Clone, Debug)]
pub struct Engine {
    current: String,
    pending: String,
    operation: Option<Operation>,
    replace_input: bool,
    has_decimal: bool,
    error: Option<ErrorState>,
    error_epoch: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            current: "0".to_string(),
            pending: String::new(),
            operation: None,
            replace_input: false,
            has_decimal: false,
            error: None,
            error_epoch: 0,
        }
    }

    /// Apply an intent and return the resulting render contract.
    pub fn apply(&mut self, intent: Intent) -> Render {
        debug!(?intent, phase = ?self.phase(), "apply");

        match intent {
            Intent::Digit(digit) => self.input_digit(digit),
            Intent::Decimal => self.input_decimal(),
            Intent::Operator(operation) => self.set_operation(operation),
            Intent::Equals => self.calculate(),
            Intent::Clear => self.clear(),
            Intent::ClearEntry => self.clear_entry(),
            Intent::Backspace => self.backspace(),
            Intent::Paste(text) => self.paste(&text),
        }

        self.render()
    }

    /// Append a digit (0-9) to the operand, or start a new operand.
    pub fn input_digit(&mut self, digit: u8) {
        if self.is_error() || digit > 9 {
            return;
        }
        let digit = char::from(b'0' + digit);

        if self.replace_input {
            self.current = digit.to_string();
            self.replace_input = false;
            self.has_decimal = false;
        } else if self.current == "0" {
            self.current = digit.to_string();
        } else if self.current.len() < MAX_OPERAND_LEN {
            self.current.push(digit);
        }
    }

    /// Insert a decimal point, at most one per operand.
    pub fn input_decimal(&mut self) {
        if self.is_error() {
            return;
        }

        if self.replace_input {
            self.current = "0".to_string();
            self.replace_input = false;
            self.has_decimal = false;
        }

        if !self.has_decimal && self.current.len() < MAX_OPERAND_LEN {
            self.current.push('.');
            self.has_decimal = true;
        }
    }

    /// Select the pending operation, folding the previous one first if a
    /// new operand was typed since.
    ///
    /// Pressing two operators in a row just swaps the operation.
    pub fn set_operation(&mut self, operation: Operation) {
        if self.is_error() {
            return;
        }

        if self.operation.is_some() && !self.replace_input {
            self.calculate();
            if self.is_error() {
                return;
            }
        }

        self.pending = self.current.clone();
        self.operation = Some(operation);
        self.replace_input = true;
        self.has_decimal = false;
    }

    /// Evaluate the pending operation against the current operand.
    pub fn calculate(&mut self) {
        if self.is_error() {
            return;
        }
        let Some(operation) = self.operation else {
            return;
        };
        if self.pending.is_empty() {
            return;
        }

        match self.evaluate(operation) {
            Ok(value) => {
                self.current = format_result(value);
                self.pending.clear();
                self.operation = None;
                self.replace_input = true;
                self.has_decimal = self.current.contains('.');
                debug!(result = %self.current, "calculated");
            }
            Err(err) => self.enter_error(err),
        }
    }

    fn evaluate(&self, operation: Operation) -> Result<f64, CalcError> {
        let lhs = parse_operand(&self.pending)?;
        let rhs = parse_operand(&self.current)?;
        operation.apply(lhs, rhs)
    }

    /// Reset to the initial state, leaving any error immediately.
    pub fn clear(&mut self) {
        self.current = "0".to_string();
        self.pending.clear();
        self.operation = None;
        self.replace_input = false;
        self.has_decimal = false;
        self.error = None;
    }

    /// Reset only the operand being typed.
    pub fn clear_entry(&mut self) {
        if self.is_error() {
            return;
        }
        self.current = "0".to_string();
        self.has_decimal = false;
    }

    /// Drop the last character of the operand.
    pub fn backspace(&mut self) {
        if self.is_error() {
            return;
        }

        if self.current.chars().count() > 1 {
            if self.current.pop() == Some('.') {
                self.has_decimal = false;
            }
            if self.current == "-" {
                self.current = "0".to_string();
            }
        } else {
            self.current = "0".to_string();
            self.has_decimal = false;
        }
    }

    /// Replace the operand with pasted text. Text that is not a finite
    /// number is ignored.
    pub fn paste(&mut self, text: &str) {
        if self.is_error() {
            return;
        }

        let Some(operand) = parse_pasted(text) else {
            debug!(text, "ignoring paste");
            return;
        };

        self.has_decimal = operand.contains('.');
        self.current = operand;
        self.replace_input = false;
    }

    /// Timer callback: clear the error entered at `epoch`.
    ///
    /// Returns `false` and does nothing if the engine has since left that
    /// error.
    pub fn expire_error(&mut self, epoch: u64) -> bool {
        match self.error {
            Some(error) if error.epoch == epoch => {
                debug!(epoch, "error expired");
                self.clear();
                true
            }
            _ => false,
        }
    }

    fn enter_error(&mut self, kind: CalcError) {
        // Divide by zero keeps the pending operation and operand
        if kind != CalcError::DivideByZero {
            self.pending.clear();
            self.operation = None;
        }

        self.error_epoch += 1;
        self.error = Some(ErrorState {
            kind,
            epoch: self.error_epoch,
        });
        debug!(%kind, epoch = self.error_epoch, "entered error state");
    }

    /// Current render contract.
    pub fn render(&self) -> Render {
        match self.error {
            Some(error) => Render::new(error.kind.to_string(), String::new(), true),
            None => {
                let indicator = match self.operation {
                    Some(operation) => {
                        format!("{} {}", format_number(&self.pending), operation.symbol())
                    }
                    None => String::new(),
                };
                Render::new(format_number(&self.current), indicator, false)
            }
        }
    }

    /// Text for the Copy command: the raw operand, or the error message.
    pub fn clipboard_text(&self) -> String {
        match self.error {
            Some(error) => error.kind.to_string(),
            None => self.current.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.error.is_some() {
            Phase::Error
        } else if self.operation.is_some() && self.replace_input {
            Phase::OperatorPending
        } else {
            Phase::Entering
        }
    }

    /// Operand text being typed.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Operand captured when the pending operation was selected.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn replaces_input(&self) -> bool {
        self.replace_input
    }

    pub fn has_decimal(&self) -> bool {
        self.has_decimal
    }

    pub fn error(&self) -> Option<ErrorState> {
        self.error
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn parse_operand(text: &str) -> Result<f64, CalcError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidOperand),
    }
}
