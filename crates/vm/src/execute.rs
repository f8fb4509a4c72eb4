//! Main execution loop and opcode dispatch for the wyrm VM.

use std::io::{self, Read, Write};
use std::str;

use crate::error::RuntimeError;
use crate::machine::Machine;
use wyrm_common::word::MODULUS;
use wyrm_common::{Opcode, Word};

impl<R: Read, W: Write> Machine<R, W> {
    /// Execute from the current position until halt or error.
    pub fn execute(&mut self) -> Result<(), RuntimeError> {
        loop {
            let at = self.position();
            let word = self.fetch_word()?;

            // The opcode word is taken raw; a register address here is not
            // resolved.
            let opcode =
                Opcode::try_from(word).map_err(|_| RuntimeError::UnknownOpcode { at, word })?;

            match opcode {
                Opcode::Halt => return self.exec_halt(),
                Opcode::Set => self.exec_set()?,
                Opcode::Push => self.exec_push()?,
                Opcode::Pop => self.exec_pop()?,
                Opcode::Eq => self.exec_binary(|a, b| Word::from(a == b))?,
                Opcode::Gt => self.exec_binary(|a, b| Word::from(a > b))?,
                Opcode::Jmp => self.exec_jmp()?,
                Opcode::Jt => self.exec_jt()?,
                Opcode::Jf => self.exec_jf()?,
                Opcode::Add => self.exec_binary(add_mod)?,
                Opcode::Mult => self.exec_binary(mult_mod)?,
                Opcode::Mod => self.exec_mod(at)?,
                Opcode::And => self.exec_binary(|a, b| a & b)?,
                Opcode::Or => self.exec_binary(|a, b| a | b)?,
                Opcode::Not => self.exec_not()?,
                Opcode::Rmem => self.exec_rmem()?,
                Opcode::Wmem => self.exec_wmem()?,
                Opcode::Call => self.exec_call()?,
                Opcode::Ret => self.exec_ret()?,
                Opcode::Out => self.exec_out()?,
                Opcode::In => self.exec_in()?,
                Opcode::Noop => {}
            }
        }
    }

    fn exec_halt(&mut self) -> Result<(), RuntimeError> {
        self.write_output(b"Bye!\n")
    }

    fn exec_set(&mut self) -> Result<(), RuntimeError> {
        let dst = self.read_register()?;
        let val = self.read_value()?;
        self.set_register(dst, val);
        Ok(())
    }

    fn exec_push(&mut self) -> Result<(), RuntimeError> {
        let val = self.read_value()?;
        self.push(val);
        Ok(())
    }

    fn exec_pop(&mut self) -> Result<(), RuntimeError> {
        let dst = self.read_register()?;
        let val = self.pop()?;
        self.set_register(dst, val);
        Ok(())
    }

    /// Three-operand form shared by the comparison, arithmetic, and bitwise
    /// opcodes: dst <- op(a, b).
    fn exec_binary(&mut self, op: fn(Word, Word) -> Word) -> Result<(), RuntimeError> {
        let dst = self.read_register()?;
        let a = self.read_value()?;
        let b = self.read_value()?;
        self.set_register(dst, op(a, b));
        Ok(())
    }

    /// Mod has its own body: a zero modulus is fatal.
    fn exec_mod(&mut self, at: usize) -> Result<(), RuntimeError> {
        let dst = self.read_register()?;
        let a = self.read_value()?;
        let b = self.read_value()?;
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { at });
        }
        self.set_register(dst, a % b);
        Ok(())
    }

    fn exec_jmp(&mut self) -> Result<(), RuntimeError> {
        let addr = self.read_value()?;
        self.seek(usize::from(addr));
        Ok(())
    }

    fn exec_jt(&mut self) -> Result<(), RuntimeError> {
        // Both operands are decoded before the branch decision.
        let cond = self.read_value()?;
        let addr = self.read_value()?;
        if cond != 0 {
            self.seek(usize::from(addr));
        }
        Ok(())
    }

    fn exec_jf(&mut self) -> Result<(), RuntimeError> {
        let cond = self.read_value()?;
        let addr = self.read_value()?;
        if cond == 0 {
            self.seek(usize::from(addr));
        }
        Ok(())
    }

    fn exec_not(&mut self) -> Result<(), RuntimeError> {
        let dst = self.read_register()?;
        let a = self.read_value()?;
        self.set_register(dst, !a & 0x7FFF);
        Ok(())
    }

    fn exec_rmem(&mut self) -> Result<(), RuntimeError> {
        let dst = self.read_register()?;
        let addr = self.read_value()?;
        // The stored word is copied raw, register addresses included.
        let val = self.read(usize::from(addr))?;
        self.set_register(dst, val);
        Ok(())
    }

    fn exec_wmem(&mut self) -> Result<(), RuntimeError> {
        let addr = self.read_value()?;
        let val = self.read_value()?;
        self.write(usize::from(addr), val);
        Ok(())
    }

    fn exec_call(&mut self) -> Result<(), RuntimeError> {
        let addr = self.read_value()?;
        // The return address is the word after the operand.
        self.push(self.position() as Word);
        self.seek(usize::from(addr));
        Ok(())
    }

    fn exec_ret(&mut self) -> Result<(), RuntimeError> {
        let addr = self.pop()?;
        self.seek(usize::from(addr));
        Ok(())
    }

    fn exec_out(&mut self) -> Result<(), RuntimeError> {
        let val = self.read_value()?;
        // Literals stay below the surrogate range, but a register can hold
        // any raw word; surrogate values emit the replacement character.
        let ch = char::from_u32(u32::from(val)).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut buf = [0u8; 4];
        self.write_output(ch.encode_utf8(&mut buf).as_bytes())
    }

    fn exec_in(&mut self) -> Result<(), RuntimeError> {
        let dst = self.read_register()?;
        let ch = read_char(&mut self.input).map_err(|e| RuntimeError::InputFailed {
            reason: e.to_string(),
        })?;
        self.set_register(dst, ch as Word);
        Ok(())
    }

    /// Write bytes to the output and flush immediately, so prompts appear
    /// before `in` blocks for input.
    fn write_output(&mut self, bytes: &[u8]) -> Result<(), RuntimeError> {
        self.output
            .write_all(bytes)
            .and_then(|()| self.output.flush())
            .map_err(|e| RuntimeError::OutputFailed {
                reason: e.to_string(),
            })
    }
}

/// Sum modulo 32768.
fn add_mod(a: Word, b: Word) -> Word {
    ((u32::from(a) + u32::from(b)) % MODULUS) as Word
}

/// Product modulo 32768.
fn mult_mod(a: Word, b: Word) -> Word {
    ((u32::from(a) * u32::from(b)) % MODULUS) as Word
}

/// Read one UTF-8 character from the input stream.
///
/// The leading byte fixes the sequence length; continuation bytes are read
/// exactly. End of stream and malformed sequences surface as `io::Error`.
fn read_char<R: Read>(input: &mut R) -> io::Result<char> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf[..1])?;

    let len = match buf[0] {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid utf-8 leading byte",
            ))
        }
    };
    input.read_exact(&mut buf[1..len])?;

    let s = str::from_utf8(&buf[..len])
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid utf-8 sequence"))?;
    s.chars()
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "empty utf-8 sequence"))
}
