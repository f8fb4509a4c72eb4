//! Decode errors for wyrm program images.

use thiserror::Error;

/// Errors that occur while decoding an image or an opcode word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Word in opcode position is not one of the 22 opcodes.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(u16),

    /// Image byte length is odd, so the final word is incomplete.
    #[error("truncated image: {0} bytes (must be a multiple of 2)")]
    TruncatedImage(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_opcode() {
        assert_eq!(
            DecodeError::UnknownOpcode(22).to_string(),
            "unknown opcode: 22"
        );
    }

    #[test]
    fn display_truncated_image() {
        assert_eq!(
            DecodeError::TruncatedImage(7).to_string(),
            "truncated image: 7 bytes (must be a multiple of 2)"
        );
    }
}
