//! Program image representation.
//!
//! An image file is a raw sequence of 16-bit little-endian words with no
//! header. The word at byte offset 0 lands at memory address 0.

use crate::error::DecodeError;
use crate::word::Word;

/// A program image: the words loaded into memory at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// The word stream, in address order.
    pub words: Vec<Word>,
}

impl Image {
    /// Create a new image from a vector of words.
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Encode the image to little-endian bytes.
    ///
    /// Each word becomes 2 bytes. The result length is always
    /// `words.len() * 2`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * 2);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Decode a byte slice into an image.
    ///
    /// The byte slice length must be a multiple of 2. Each 2-byte chunk is
    /// one little-endian word. Any word value may appear in an image; words
    /// are validated when the machine decodes them, not here.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if !bytes.len().is_multiple_of(2) {
            return Err(DecodeError::TruncatedImage(bytes.len()));
        }

        let mut words = Vec::with_capacity(bytes.len() / 2);
        for chunk in bytes.chunks_exact(2) {
            words.push(Word::from_le_bytes([chunk[0], chunk[1]]));
        }

        Ok(Self { words })
    }

    /// Number of words in the image.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the image has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
