//! Huffman coding: count symbols, build the tree, derive a prefix-free code,
//! and translate between symbol sequences and bit-strings.
//!
//! ```
//! use huffman::{bits, Codebook};
//!
//! let book = Codebook::from_text("aaaa");
//! let encoded = book.encode_text("aaaa")?;
//! assert_eq!(bits::to_text(&encoded), "0000");
//! assert_eq!(book.decode_text(&encoded)?, "aaaa");
//! # Ok::<(), huffman::CodecError>(())
//! ```

pub mod bits;
mod code_table;
mod codec;
mod errors;
mod flags;
mod frequency;
pub mod stats;
mod tree;

pub use code_table::{Code, CodeLookup, CodeTable, ReverseCodeTable};
pub use codec::{decode, decode_with, encode, Codebook, Decoder};
pub use errors::CodecError;
pub use flags::CodecFlags;
pub use frequency::{count, count_chars, FrequencyTable};
pub use tree::{HuffmanTree, NodeId, NodeRef, Visit, Walk};
