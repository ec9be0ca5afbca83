use std::io;

/// An error encountered while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The code table has no entry for a symbol of the input. This only
    /// happens when encoding against a table built from a different input.
    #[error("no code for symbol {symbol} at position {position}")]
    UnknownSymbol { symbol: String, position: usize },

    /// The bit-string ended in the middle of a code. `offset` is where the
    /// partial code starts.
    #[error("bit-string ends inside a code: {pending} bit(s) from offset {offset} match no code")]
    MalformedBitstring { offset: usize, pending: usize },

    /// The bits read since the last symbol are already as long as the longest
    /// code in the table and still match nothing.
    #[error("no code matches the bits starting at offset {offset}")]
    InvalidCode { offset: usize },

    /// Symbol counts whose sum does not fit in a `u64`.
    #[error("symbol counts add up to more than {}", u64::MAX)]
    CountOverflow,

    #[error("invalid character {found:?} at offset {offset} in bit-string (expected '0' or '1')")]
    InvalidBitChar { found: char, offset: usize },
}

impl From<CodecError> for io::Error {
    fn from(e: CodecError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}
