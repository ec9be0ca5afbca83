use std::{borrow::Borrow, fmt::Debug, hash::Hash};

use bitvec::{slice::BitSlice, vec::BitVec};
use tracing::{trace, warn};

use crate::{
    bits,
    code_table::{Code, CodeLookup, CodeTable, ReverseCodeTable},
    flags::CodecFlags,
    frequency::{count, FrequencyTable},
    tree::HuffmanTree,
    CodecError,
};

/// Concatenate the codes of every symbol of `sequence`.
///
/// Fails on the first symbol that has no code in `codes`.
pub fn encode<S, I>(sequence: I, codes: &CodeTable<S>) -> Result<BitVec, CodecError>
where
    S: Eq + Hash + Debug,
    I: IntoIterator,
    I::Item: Borrow<S>,
{
    let mut out = BitVec::new();
    for (position, item) in sequence.into_iter().enumerate() {
        let symbol = item.borrow();
        let code = codes
            .get(symbol)
            .ok_or_else(|| CodecError::UnknownSymbol {
                symbol: format!("{symbol:?}"),
                position,
            })?;
        out.extend_from_bitslice(code.as_bitslice());
    }
    Ok(out)
}

/// Decode a complete bit-string. Running out of bits inside a code is an
/// error.
pub fn decode<L>(bits: &BitSlice, table: &L) -> Result<Vec<L::Symbol>, CodecError>
where
    L: CodeLookup,
    L::Symbol: Clone,
{
    decode_with(bits, table, CodecFlags::default())
}

pub fn decode_with<L>(
    bits: &BitSlice,
    table: &L,
    flags: CodecFlags,
) -> Result<Vec<L::Symbol>, CodecError>
where
    L: CodeLookup,
    L::Symbol: Clone,
{
    let mut decoder = Decoder::with_flags(table, flags);
    let mut out = Vec::new();
    for bit in bits.iter().by_vals() {
        if let Some(symbol) = decoder.push(bit)? {
            out.push(symbol.clone());
        }
    }
    decoder.finish()?;
    Ok(out)
}

/// Streaming decoder: bits go in one at a time, and a symbol comes out
/// whenever the bits since the previous symbol form a complete code.
///
/// Since the code is prefix-free, the first match is the only possible one.
pub struct Decoder<'t, L> {
    table: &'t L,
    flags: CodecFlags,

    /// Bits read since the last complete code.
    pending: Code,

    /// Total bits read.
    offset: usize,

    emitted: usize,
}

impl<'t, L: CodeLookup> Decoder<'t, L> {
    pub fn new(table: &'t L) -> Self {
        Self::with_flags(table, CodecFlags::default())
    }

    pub fn with_flags(table: &'t L, flags: CodecFlags) -> Self {
        Self {
            table,
            flags,
            pending: Code::with_capacity(table.max_code_len()),
            offset: 0,
            emitted: 0,
        }
    }

    /// Feed one bit. Returns the decoded symbol if this bit completes a code.
    pub fn push(&mut self, bit: bool) -> Result<Option<&'t L::Symbol>, CodecError> {
        let table = self.table;
        self.pending.push(bit);
        self.offset += 1;

        if let Some(symbol) = table.lookup(&self.pending) {
            trace!(offset = self.offset, len = self.pending.len(), "matched code");
            self.pending.clear();
            self.emitted += 1;
            return Ok(Some(symbol));
        }

        if self.pending.len() >= table.max_code_len() {
            let start = self.pending_start();
            if !self.flags.contains(CodecFlags::SKIP_INVALID_CODES) {
                return Err(CodecError::InvalidCode { offset: start });
            }
            warn!(
                offset = start,
                bits = %bits::to_text(&self.pending),
                "discarding bits that match no code"
            );
            self.pending.clear();
        }

        Ok(None)
    }

    /// Number of symbols decoded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// True if the bits read so far end exactly on a code boundary.
    pub fn is_aligned(&self) -> bool {
        self.pending.is_empty()
    }

    /// End of input. Returns the number of symbols decoded.
    pub fn finish(self) -> Result<usize, CodecError> {
        if self.pending.is_empty() {
            return Ok(self.emitted);
        }

        let offset = self.pending_start();
        if !self.flags.contains(CodecFlags::LENIENT_TRUNCATION) {
            return Err(CodecError::MalformedBitstring {
                offset,
                pending: self.pending.len(),
            });
        }
        warn!(
            offset,
            bits = %bits::to_text(&self.pending),
            "dropping truncated trailing code"
        );
        Ok(self.emitted)
    }

    fn pending_start(&self) -> usize {
        self.offset - self.pending.len()
    }
}

/// A Huffman tree together with the code tables derived from it.
#[derive(Debug, Clone)]
pub struct Codebook<S: Eq + Hash> {
    tree: HuffmanTree<S>,
    codes: CodeTable<S>,
    reverse: ReverseCodeTable<S>,
}

impl<S: Eq + Hash + Ord + Clone + Debug> Codebook<S> {
    /// Count, build, and derive the tables for `sequence`.
    pub fn from_symbols<I: IntoIterator<Item = S>>(sequence: I) -> Self {
        Self::from_frequencies(&count(sequence))
    }

    pub fn from_frequencies(freqs: &FrequencyTable<S>) -> Self {
        let tree = HuffmanTree::build(freqs);
        let (codes, reverse) = tree.code_tables();
        Self {
            tree,
            codes,
            reverse,
        }
    }

    pub fn tree(&self) -> &HuffmanTree<S> {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable<S> {
        &self.codes
    }

    pub fn reverse(&self) -> &ReverseCodeTable<S> {
        &self.reverse
    }

    pub fn encode<I>(&self, sequence: I) -> Result<BitVec, CodecError>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        encode(sequence, &self.codes)
    }

    pub fn decode(&self, bits: &BitSlice) -> Result<Vec<S>, CodecError> {
        decode(bits, &self.reverse)
    }

    pub fn decode_with(&self, bits: &BitSlice, flags: CodecFlags) -> Result<Vec<S>, CodecError> {
        decode_with(bits, &self.reverse, flags)
    }
}

impl Codebook<char> {
    pub fn from_text(text: &str) -> Self {
        Self::from_symbols(text.chars())
    }

    pub fn encode_text(&self, text: &str) -> Result<BitVec, CodecError> {
        self.encode(text.chars())
    }

    pub fn decode_text(&self, bits: &BitSlice) -> Result<String, CodecError> {
        Ok(self.decode(bits)?.into_iter().collect())
    }
}
