//! Runtime errors for the wyrm VM.
//!
//! Every fault is fatal; nothing is retried or coerced to a default. Each
//! variant carries the memory address (`at`) it was detected at, except the
//! stream failures, which carry the underlying I/O reason.

use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Fetch or memory read past the end of memory.
    #[error("memory address {addr} out of bounds (length {len})")]
    MemoryOutOfBounds { addr: usize, len: usize },

    /// Operand expected to be a register address was not one.
    #[error("invalid register {word} at address {at}")]
    InvalidRegister { at: usize, word: u16 },

    /// Operand above the register range, which no valid program contains.
    #[error("value {word} out of range at address {at}")]
    ValueOutOfRange { at: usize, word: u16 },

    /// Operand expected to be a bare number was an opcode or register word.
    #[error("literal expected at address {at}, found {word}")]
    LiteralExpected { at: usize, word: u16 },

    /// Word in opcode position is not one of the 22 opcodes.
    #[error("unknown opcode {word} at address {at}")]
    UnknownOpcode { at: usize, word: u16 },

    /// Pop or ret on an empty stack.
    #[error("stack underflow at address {at}")]
    StackUnderflow { at: usize },

    /// Mod with a zero modulus.
    #[error("division by zero at address {at}")]
    DivisionByZero { at: usize },

    /// Character source exhausted or failed mid-read.
    #[error("input failed: {reason}")]
    InputFailed { reason: String },

    /// Output stream write or flush failed.
    #[error("output failed: {reason}")]
    OutputFailed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::MemoryOutOfBounds { addr: 100, len: 7 }.to_string(),
            "memory address 100 out of bounds (length 7)"
        );
        assert_eq!(
            RuntimeError::StackUnderflow { at: 2 }.to_string(),
            "stack underflow at address 2"
        );
        assert_eq!(
            RuntimeError::UnknownOpcode { at: 0, word: 32776 }.to_string(),
            "unknown opcode 32776 at address 0"
        );
        assert_eq!(
            RuntimeError::InputFailed {
                reason: "unexpected end of file".into()
            }
            .to_string(),
            "input failed: unexpected end of file"
        );
        assert_eq!(
            RuntimeError::OutputFailed {
                reason: "stream closed".into()
            }
            .to_string(),
            "output failed: stream closed"
        );
    }
}
