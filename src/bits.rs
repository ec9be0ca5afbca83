//! Bit-strings as text: one `'0'` or `'1'` character per bit.

use bitvec::{slice::BitSlice, vec::BitVec};

use crate::CodecError;

pub fn to_text(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Parse text made of `'0'` and `'1'`. Offsets in errors count characters.
pub fn parse(text: &str) -> Result<BitVec, CodecError> {
    let mut bits = BitVec::with_capacity(text.len());
    for (offset, c) in text.chars().enumerate() {
        match c {
            '0' => bits.push(false),
            '1' => bits.push(true),
            found => return Err(CodecError::InvalidBitChar { found, offset }),
        }
    }
    Ok(bits)
}
