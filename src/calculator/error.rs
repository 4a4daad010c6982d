//! Recoverable calculation errors.

use thiserror::Error;

/// An error raised while folding the pending operation.
///
/// These never escape the engine. They put it into the error state, and the
/// `Display` text is what ends up on the calculator display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// One of the operands is not a finite number.
    #[error("Invalid input")]
    InvalidOperand,
    /// The divisor is exactly zero.
    #[error("Cannot divide by zero")]
    DivideByZero,
    /// The result is not finite.
    #[error("Result too large")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CalcError::InvalidOperand.to_string(), "Invalid input");
        assert_eq!(CalcError::DivideByZero.to_string(), "Cannot divide by zero");
        assert_eq!(CalcError::Overflow.to_string(), "Result too large");
    }
}
