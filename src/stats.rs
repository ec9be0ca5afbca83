use std::hash::Hash;

use crate::{code_table::CodeTable, frequency::FrequencyTable};

/// Size of the counted sequence under a fixed-width code, using
/// `ceil(log2(k))` bits per symbol for an alphabet of `k` symbols. A single
/// symbol still takes one bit. Saturates at `u64::MAX`.
pub fn fixed_width_len<S: Eq + Hash>(freqs: &FrequencyTable<S>) -> u64 {
    let width = match freqs.len() {
        0 => 0,
        1 => 1,
        k => usize::BITS - (k - 1).leading_zeros(),
    };
    freqs.total().saturating_mul(u64::from(width))
}

/// How much a text shrinks when Huffman coded, compared to UTF-8.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub original_bits: u64,
    pub encoded_bits: u64,
    /// Bits a fixed-width code over the same alphabet would need.
    pub fixed_width_bits: u64,
}

impl CompressionStats {
    /// `None` if `codes` lacks a code for one of the counted characters, or
    /// if a size does not fit in a `u64`.
    pub fn measure(freqs: &FrequencyTable<char>, codes: &CodeTable<char>) -> Option<Self> {
        let original_bytes = freqs.iter().try_fold(0u64, |total, (c, &count)| {
            total.checked_add(count.checked_mul(c.len_utf8() as u64)?)
        })?;
        Some(Self {
            original_bits: original_bytes.checked_mul(8)?,
            encoded_bits: codes.encoded_len(freqs)?,
            fixed_width_bits: fixed_width_len(freqs),
        })
    }

    pub fn original_bytes(&self) -> u64 {
        self.original_bits / 8
    }

    /// Encoded size once padded to whole bytes.
    pub fn encoded_bytes(&self) -> u64 {
        (self.encoded_bits + 7) / 8
    }

    /// Space saved, in percent of the original size. Zero for empty input.
    pub fn ratio_percent(&self) -> f64 {
        if self.original_bits == 0 {
            return 0.0;
        }
        (1.0 - self.encoded_bits as f64 / self.original_bits as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use test_case::test_case;

    use super::*;
    use crate::{frequency::count_chars, tree::HuffmanTree};

    fn measure(text: &str) -> CompressionStats {
        let freqs = count_chars(text);
        let (codes, _) = HuffmanTree::build(&freqs).code_tables();
        CompressionStats::measure(&freqs, &codes).unwrap()
    }

    #[test_case("", 0)]
    #[test_case("aaaa", 4)]
    #[test_case("ab", 2)]
    #[test_case("abc", 6)]
    #[test_case("abcd", 8)]
    #[test_case("abcde", 15)]
    fn fixed_width(text: &str, bits: u64) {
        assert_eq!(fixed_width_len(&count_chars(text)), bits);
    }

    #[test]
    fn empty_text() {
        let stats = measure("");
        assert_eq!(stats.original_bits, 0);
        assert_eq!(stats.encoded_bits, 0);
        assert_eq!(stats.encoded_bytes(), 0);
        assert_eq!(stats.ratio_percent(), 0.0);
    }

    #[test]
    fn skewed_text() {
        // a = 1, b = 01, c = 00
        let stats = measure("aaaabbc");
        assert_eq!(stats.original_bits, 56);
        assert_eq!(stats.original_bytes(), 7);
        assert_eq!(stats.encoded_bits, 10);
        assert_eq!(stats.encoded_bytes(), 2);
        assert_eq!(stats.fixed_width_bits, 14);
        assert!(stats.encoded_bits <= stats.fixed_width_bits);
        let expected = (1.0 - 10.0 / 56.0) * 100.0;
        assert!((stats.ratio_percent() - expected).abs() < 1e-9);
    }

    #[test]
    fn multibyte_characters_count_their_utf8_length() {
        let stats = measure("éé");
        assert_eq!(stats.original_bits, 32);
        assert_eq!(stats.encoded_bits, 2);
    }

    #[test]
    fn oversized_counts() -> anyhow::Result<()> {
        let map: HashMap<char, u64> = [('a', u64::MAX / 2), ('b', 1)].into_iter().collect();
        let freqs = FrequencyTable::try_from(map)?;
        let (codes, _) = HuffmanTree::build(&freqs).code_tables();
        assert_eq!(CompressionStats::measure(&freqs, &codes), None);
        assert_eq!(fixed_width_len(&freqs), u64::MAX / 2 + 1);

        let map: HashMap<char, u64> = [('a', u64::MAX / 2), ('b', 1), ('c', 1)]
            .into_iter()
            .collect();
        let freqs = FrequencyTable::try_from(map)?;
        assert_eq!(fixed_width_len(&freqs), u64::MAX);
        Ok(())
    }

    #[test]
    fn foreign_codes() {
        let (codes, _) = HuffmanTree::build(&count_chars("ab")).code_tables();
        assert_eq!(CompressionStats::measure(&count_chars("xyz"), &codes), None);
    }
}
