//! wyrm virtual machine — executes 16-bit word programs.
//!
//! The machine is a word-addressed interpreter with:
//! - A flat memory loaded from a program image, growing on writes past the end
//! - Eight general-purpose registers
//! - An unbounded stack shared by operand values and return addresses
//!
//! # Usage
//!
//! ```
//! use wyrm_common::Image;
//! use wyrm_vm::Machine;
//!
//! // out 'H', out 'i', out '\n', halt
//! let image = Image::new(vec![19, 72, 19, 105, 19, 10, 0]);
//!
//! let mut output = Vec::new();
//! let mut machine = Machine::with_io(image, std::io::empty(), &mut output);
//! machine.execute().unwrap();
//! assert_eq!(output, b"Hi\nBye!\n");
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::RuntimeError;
pub use machine::Machine;

use wyrm_common::Image;

/// Execute a program image on stdin/stdout.
///
/// This is the primary entry point for running a program interactively. It
/// loads the image into a fresh machine and executes from address 0 until
/// halt.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution faults (invalid operand, stack
/// underflow, out-of-bounds fetch, etc.).
pub fn run(image: Image) -> Result<(), RuntimeError> {
    let mut machine = Machine::new(image);
    machine.execute()
}
