//! wyrm common types and image encoding.
//!
//! This crate provides the foundational data structures for the wyrm
//! virtual machine:
//!
//! - [`Word`] — the 16-bit storage and arithmetic unit, with the constants
//!   and helpers that split the word space into literals, register
//!   addresses, and the invalid tail
//! - [`Opcode`] — all 22 opcodes with mnemonics and operand counts
//! - [`Image`] — a program image with little-endian encode/decode
//! - [`DecodeError`] — errors from decoding byte streams and opcode words
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod image;
pub mod opcode;
pub mod word;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use image::Image;
pub use opcode::Opcode;
pub use word::Word;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy that generates a random valid Opcode.
    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    proptest! {
        /// For all valid opcodes, the wire value decodes back to the opcode.
        #[test]
        fn opcode_wire_roundtrip(op in arb_opcode()) {
            prop_assert_eq!(Opcode::try_from(op as Word), Ok(op));
        }

        /// Opcode decoding accepts exactly 0..=21 and reports every other
        /// word back in the error.
        #[test]
        fn opcode_decode_total(w in any::<u16>()) {
            let result = Opcode::try_from(w);
            if w <= 21 {
                prop_assert_eq!(result.map(|op| op as u16), Ok(w));
            } else {
                prop_assert_eq!(result, Err(DecodeError::UnknownOpcode(w)));
            }
        }

        /// Image encode/decode roundtrip with random word streams.
        #[test]
        fn image_roundtrip(words in prop::collection::vec(any::<u16>(), 0..64)) {
            let image = Image::new(words);
            let bytes = image.encode();
            let decoded = Image::decode(&bytes).unwrap();
            prop_assert_eq!(image, decoded);
        }

        /// For any byte stream, decode succeeds exactly on even lengths and
        /// re-encodes to the same bytes.
        #[test]
        fn image_decode_length(bytes in prop::collection::vec(any::<u8>(), 0..129)) {
            match Image::decode(&bytes) {
                Ok(image) => {
                    prop_assert!(bytes.len().is_multiple_of(2));
                    prop_assert_eq!(image.encode(), bytes);
                }
                Err(DecodeError::TruncatedImage(n)) => {
                    prop_assert!(!bytes.len().is_multiple_of(2));
                    prop_assert_eq!(n, bytes.len());
                }
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
        }

        /// Every word is exactly one of literal, register address, invalid.
        #[test]
        fn word_classification_partition(w in any::<u16>()) {
            let literal = word::is_literal(w);
            let register = word::register_index(w).is_some();
            let invalid = w > word::REGISTER_LAST;
            prop_assert_eq!(
                usize::from(literal) + usize::from(register) + usize::from(invalid),
                1
            );
        }
    }
}
