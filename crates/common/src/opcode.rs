//! Opcode definitions for the wyrm instruction set.

use crate::error::DecodeError;
use crate::word::Word;

/// Identifies the operation to perform.
///
/// Opcode words occupy 0..=21. Everything above is a number literal or a
/// register address and is never valid in opcode position. The
/// `#[repr(u16)]` attribute keeps each variant at its wire value.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Stop execution.
    Halt = 0,
    /// Set a register to a value.
    Set = 1,
    /// Push a value onto the stack.
    Push = 2,
    /// Pop the top of the stack into a register.
    Pop = 3,
    /// 1 if two values are equal, else 0.
    Eq = 4,
    /// 1 if the first value is greater than the second, else 0.
    Gt = 5,
    /// Unconditional jump.
    Jmp = 6,
    /// Jump if nonzero.
    Jt = 7,
    /// Jump if zero.
    Jf = 8,
    /// Sum modulo 32768.
    Add = 9,
    /// Product modulo 32768.
    Mult = 10,
    /// Remainder after division.
    Mod = 11,
    /// Bitwise AND.
    And = 12,
    /// Bitwise OR.
    Or = 13,
    /// 15-bit bitwise complement.
    Not = 14,
    /// Read a word from memory into a register.
    Rmem = 15,
    /// Write a word to memory.
    Wmem = 16,
    /// Push the return address and jump.
    Call = 17,
    /// Pop an address and jump to it.
    Ret = 18,
    /// Write one character to output.
    Out = 19,
    /// Read one character from input into a register.
    In = 20,
    /// No operation.
    Noop = 21,
}

/// All valid opcodes, in numeric order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 22] = [
    Opcode::Halt,
    Opcode::Set,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Eq,
    Opcode::Gt,
    Opcode::Jmp,
    Opcode::Jt,
    Opcode::Jf,
    Opcode::Add,
    Opcode::Mult,
    Opcode::Mod,
    Opcode::And,
    Opcode::Or,
    Opcode::Not,
    Opcode::Rmem,
    Opcode::Wmem,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Out,
    Opcode::In,
    Opcode::Noop,
];

impl TryFrom<Word> for Opcode {
    type Error = DecodeError;

    fn try_from(value: Word) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::Halt),
            1 => Ok(Opcode::Set),
            2 => Ok(Opcode::Push),
            3 => Ok(Opcode::Pop),
            4 => Ok(Opcode::Eq),
            5 => Ok(Opcode::Gt),
            6 => Ok(Opcode::Jmp),
            7 => Ok(Opcode::Jt),
            8 => Ok(Opcode::Jf),
            9 => Ok(Opcode::Add),
            10 => Ok(Opcode::Mult),
            11 => Ok(Opcode::Mod),
            12 => Ok(Opcode::And),
            13 => Ok(Opcode::Or),
            14 => Ok(Opcode::Not),
            15 => Ok(Opcode::Rmem),
            16 => Ok(Opcode::Wmem),
            17 => Ok(Opcode::Call),
            18 => Ok(Opcode::Ret),
            19 => Ok(Opcode::Out),
            20 => Ok(Opcode::In),
            21 => Ok(Opcode::Noop),

            // Everything from 22 up, register addresses included.
            _ => Err(DecodeError::UnknownOpcode(value)),
        }
    }
}

impl Opcode {
    /// Returns the canonical mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Halt => "halt",
            Opcode::Set => "set",
            Opcode::Push => "push",
            Opcode::Pop => "pop",
            Opcode::Eq => "eq",
            Opcode::Gt => "gt",
            Opcode::Jmp => "jmp",
            Opcode::Jt => "jt",
            Opcode::Jf => "jf",
            Opcode::Add => "add",
            Opcode::Mult => "mult",
            Opcode::Mod => "mod",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Not => "not",
            Opcode::Rmem => "rmem",
            Opcode::Wmem => "wmem",
            Opcode::Call => "call",
            Opcode::Ret => "ret",
            Opcode::Out => "out",
            Opcode::In => "in",
            Opcode::Noop => "noop",
        }
    }

    /// Number of operand words following the opcode word.
    pub fn operand_count(&self) -> usize {
        match self {
            Opcode::Halt | Opcode::Ret | Opcode::Noop => 0,
            Opcode::Push
            | Opcode::Pop
            | Opcode::Jmp
            | Opcode::Call
            | Opcode::Out
            | Opcode::In => 1,
            Opcode::Set | Opcode::Jt | Opcode::Jf | Opcode::Not | Opcode::Rmem | Opcode::Wmem => 2,
            Opcode::Eq
            | Opcode::Gt
            | Opcode::Add
            | Opcode::Mult
            | Opcode::Mod
            | Opcode::And
            | Opcode::Or => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_opcodes_count() {
        assert_eq!(ALL_OPCODES.len(), 22);
    }

    #[test]
    fn roundtrip_all_valid_opcodes() {
        for &opcode in &ALL_OPCODES {
            let word = opcode as Word;
            let decoded = Opcode::try_from(word).unwrap();
            assert_eq!(opcode, decoded, "roundtrip failed for {opcode:?} ({word})");
        }
    }

    #[test]
    fn numeric_order_matches_table() {
        for (i, &opcode) in ALL_OPCODES.iter().enumerate() {
            assert_eq!(opcode as usize, i);
        }
    }

    #[test]
    fn unknown_first_invalid_value() {
        assert_eq!(Opcode::try_from(22), Err(DecodeError::UnknownOpcode(22)));
    }

    #[test]
    fn unknown_literal_range() {
        assert_eq!(Opcode::try_from(100), Err(DecodeError::UnknownOpcode(100)));
        assert_eq!(
            Opcode::try_from(32767),
            Err(DecodeError::UnknownOpcode(32767))
        );
    }

    #[test]
    fn unknown_register_range() {
        // A register address is not resolved in opcode position.
        for word in 32768..=32775u16 {
            assert_eq!(
                Opcode::try_from(word),
                Err(DecodeError::UnknownOpcode(word)),
                "word {word} should not decode as an opcode"
            );
        }
    }

    #[test]
    fn unknown_invalid_tail() {
        assert_eq!(
            Opcode::try_from(32776),
            Err(DecodeError::UnknownOpcode(32776))
        );
        assert_eq!(
            Opcode::try_from(u16::MAX),
            Err(DecodeError::UnknownOpcode(u16::MAX))
        );
    }

    #[test]
    fn every_word_value_resolves() {
        // Every u16 value must produce either Ok or UnknownOpcode, never a panic.
        for word in 0..=u16::MAX {
            match Opcode::try_from(word) {
                Ok(op) => assert_eq!(op as u16, word),
                Err(DecodeError::UnknownOpcode(w)) => assert_eq!(w, word),
                other => panic!("unexpected result for word {word}: {other:?}"),
            }
        }
    }

    #[test]
    fn mnemonics_are_lowercase() {
        for &opcode in &ALL_OPCODES {
            let m = opcode.mnemonic();
            assert!(!m.is_empty(), "empty mnemonic for {opcode:?}");
            assert_eq!(m, m.to_lowercase(), "mnemonic should be lowercase: {m}");
        }
    }

    #[test]
    fn operand_counts() {
        assert_eq!(Opcode::Halt.operand_count(), 0);
        assert_eq!(Opcode::Set.operand_count(), 2);
        assert_eq!(Opcode::Push.operand_count(), 1);
        assert_eq!(Opcode::Pop.operand_count(), 1);
        assert_eq!(Opcode::Eq.operand_count(), 3);
        assert_eq!(Opcode::Gt.operand_count(), 3);
        assert_eq!(Opcode::Jmp.operand_count(), 1);
        assert_eq!(Opcode::Jt.operand_count(), 2);
        assert_eq!(Opcode::Jf.operand_count(), 2);
        assert_eq!(Opcode::Add.operand_count(), 3);
        assert_eq!(Opcode::Mult.operand_count(), 3);
        assert_eq!(Opcode::Mod.operand_count(), 3);
        assert_eq!(Opcode::And.operand_count(), 3);
        assert_eq!(Opcode::Or.operand_count(), 3);
        assert_eq!(Opcode::Not.operand_count(), 2);
        assert_eq!(Opcode::Rmem.operand_count(), 2);
        assert_eq!(Opcode::Wmem.operand_count(), 2);
        assert_eq!(Opcode::Call.operand_count(), 1);
        assert_eq!(Opcode::Ret.operand_count(), 0);
        assert_eq!(Opcode::Out.operand_count(), 1);
        assert_eq!(Opcode::In.operand_count(), 1);
        assert_eq!(Opcode::Noop.operand_count(), 0);
    }
}
