//! Word-level definitions for the wyrm machine.
//!
//! Every quantity the machine touches is a 16-bit word. The word space
//! splits into number literals (0..=32767), register addresses
//! (32768..=32775), and an invalid tail that never occurs in valid
//! programs.

/// The machine's only data type: an unsigned 16-bit word.
pub type Word = u16;

/// Largest word value that is a number literal.
pub const MAX_LITERAL: Word = 32767;

/// First word value that addresses a register.
pub const REGISTER_FIRST: Word = 32768;

/// Last word value that addresses a register.
pub const REGISTER_LAST: Word = 32775;

/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Modulus for all arithmetic opcodes.
pub const MODULUS: u32 = 32768;

/// Maps a register-address word to its register index (0..=7).
///
/// Returns `None` for literals and for the invalid tail above 32775.
pub fn register_index(word: Word) -> Option<usize> {
    if (REGISTER_FIRST..=REGISTER_LAST).contains(&word) {
        Some(usize::from(word - REGISTER_FIRST))
    } else {
        None
    }
}

/// Returns true if the word is a number literal.
pub fn is_literal(word: Word) -> bool {
    word <= MAX_LITERAL
}
