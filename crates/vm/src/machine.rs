//! Machine state and operand decoding: memory, registers, stack,
//! instruction pointer.

use std::io::{self, Read, Write};

use crate::error::RuntimeError;
use wyrm_common::word::{register_index, MAX_LITERAL, REGISTER_COUNT};
use wyrm_common::{Image, Opcode, Word};

/// The wyrm virtual machine.
///
/// Generic over its input and output streams so programs can be scripted
/// and their output captured. [`Machine::new`] wires stdin and stdout.
pub struct Machine<R, W> {
    /// Word-addressed memory, image words first. Grows on writes past the
    /// end; reads past the end are fatal.
    pub(crate) memory: Vec<Word>,
    /// The eight general-purpose registers.
    pub(crate) registers: [Word; REGISTER_COUNT],
    /// Operand and return-address stack, shared.
    pub(crate) stack: Vec<Word>,
    /// Word address of the next fetch.
    pub(crate) ip: usize,
    /// Character source for `in`.
    pub(crate) input: R,
    /// Character sink for `out`.
    pub(crate) output: W,
}

impl Machine<io::Stdin, io::Stdout> {
    /// Create a machine wired to stdin and stdout.
    pub fn new(image: Image) -> Self {
        Self::with_io(image, io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> Machine<R, W> {
    /// Create a machine with explicit input and output streams.
    pub fn with_io(image: Image, input: R, output: W) -> Self {
        Self {
            memory: image.words,
            registers: [0; REGISTER_COUNT],
            stack: Vec::new(),
            ip: 0,
            input,
            output,
        }
    }

    /// Read the word at a memory address.
    pub fn read(&self, addr: usize) -> Result<Word, RuntimeError> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(RuntimeError::MemoryOutOfBounds {
                addr,
                len: self.memory.len(),
            })
    }

    /// Write a word at a memory address, growing memory if needed.
    ///
    /// Addresses between the old end and `addr` read back as zero.
    pub fn write(&mut self, addr: usize, value: Word) {
        if addr >= self.memory.len() {
            self.memory.resize(addr + 1, 0);
        }
        self.memory[addr] = value;
    }

    /// Current value of a register. `r` must be a decoded index (0..=7).
    pub fn register(&self, r: usize) -> Word {
        self.registers[r]
    }

    /// Set a register. `r` must be a decoded index (0..=7).
    pub fn set_register(&mut self, r: usize, value: Word) {
        self.registers[r] = value;
    }

    /// Push a value onto the stack. The stack is unbounded.
    pub fn push(&mut self, value: Word) {
        self.stack.push(value);
    }

    /// Pop a value from the stack.
    pub fn pop(&mut self) -> Result<Word, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at: self.ip })
    }

    /// Word address of the next fetch.
    pub fn position(&self) -> usize {
        self.ip
    }

    /// Move the instruction pointer to a new address.
    ///
    /// The target is not checked here; a wild address faults on the next
    /// fetch.
    pub fn seek(&mut self, addr: usize) {
        self.ip = addr;
    }

    /// Read-only view of the register file.
    pub fn registers(&self) -> &[Word; REGISTER_COUNT] {
        &self.registers
    }

    /// Read-only view of the stack, bottom first.
    pub fn stack(&self) -> &[Word] {
        &self.stack
    }

    /// Read-only view of memory.
    pub fn memory(&self) -> &[Word] {
        &self.memory
    }

    // ---- Operand decoding ----

    /// Fetch the word at the instruction pointer and advance past it.
    pub fn fetch_word(&mut self) -> Result<Word, RuntimeError> {
        let word = self.read(self.ip)?;
        self.ip += 1;
        Ok(word)
    }

    /// Fetch an operand that must be a register address; returns the
    /// register index.
    pub fn read_register(&mut self) -> Result<usize, RuntimeError> {
        let at = self.ip;
        let word = self.fetch_word()?;
        register_index(word).ok_or(RuntimeError::InvalidRegister { at, word })
    }

    /// Fetch an operand and resolve it to a value.
    ///
    /// Literals are returned unchanged; a register address resolves to the
    /// register's current value. Indirection is a single level: the stored
    /// register value is never re-interpreted.
    pub fn read_value(&mut self) -> Result<Word, RuntimeError> {
        let at = self.ip;
        let word = self.fetch_word()?;
        match register_index(word) {
            Some(r) => Ok(self.registers[r]),
            None if word <= MAX_LITERAL => Ok(word),
            None => Err(RuntimeError::ValueOutOfRange { at, word }),
        }
    }

    /// Fetch an operand that must be a bare number: above the opcode range,
    /// below the register range.
    pub fn read_literal(&mut self) -> Result<Word, RuntimeError> {
        let at = self.ip;
        let word = self.fetch_word()?;
        if word > Opcode::Noop as Word && word <= MAX_LITERAL {
            Ok(word)
        } else {
            Err(RuntimeError::LiteralExpected { at, word })
        }
    }
}
