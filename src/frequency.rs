use std::{
    collections::{hash_map, HashMap},
    hash::Hash,
};

use crate::CodecError;

/// Occurrence count of every distinct symbol of an input sequence.
///
/// The counts always sum to at most `u64::MAX`, so no node weight of a tree
/// built from the table can overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Eq + Hash> {
    counts: HashMap<S, u64>,
}

/// Tally the symbols of `sequence`.
///
/// Any finite sequence is valid, including the empty one.
pub fn count<S, I>(sequence: I) -> FrequencyTable<S>
where
    S: Eq + Hash,
    I: IntoIterator<Item = S>,
{
    sequence.into_iter().collect()
}

/// [`count`] over the characters of a string.
pub fn count_chars(text: &str) -> FrequencyTable<char> {
    count(text.chars())
}

impl<S: Eq + Hash> FrequencyTable<S> {
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Length of the counted sequence.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, S, u64> {
        self.counts.iter()
    }
}

impl<S: Eq + Hash> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for symbol in iter {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }
}

impl<S: Eq + Hash> TryFrom<HashMap<S, u64>> for FrequencyTable<S> {
    type Error = CodecError;

    /// Zero counts are dropped: every key of a table has been observed.
    fn try_from(mut counts: HashMap<S, u64>) -> Result<Self, CodecError> {
        counts.retain(|_, count| *count != 0);
        counts
            .values()
            .try_fold(0u64, |total, &count| total.checked_add(count))
            .ok_or(CodecError::CountOverflow)?;
        Ok(Self { counts })
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn counts_each_symbol() {
        let freqs = count_chars("aabccc");
        assert_eq!(freqs.len(), 3);
        assert_eq!(freqs.get(&'a'), Some(2));
        assert_eq!(freqs.get(&'b'), Some(1));
        assert_eq!(freqs.get(&'c'), Some(3));
        assert_eq!(freqs.get(&'z'), None);
    }

    #[test_case("", 0, 0)]
    #[test_case("aaaa", 1, 4)]
    #[test_case("aabbbcc", 3, 7)]
    #[test_case("héllo wörld", 9, 11)]
    fn distinct_and_total(text: &str, distinct: usize, total: u64) {
        let freqs = count_chars(text);
        assert_eq!(freqs.len(), distinct);
        assert_eq!(freqs.total(), total);
        assert_eq!(freqs.is_empty(), distinct == 0);
    }

    #[test]
    fn counts_arbitrary_symbols() {
        let freqs = count([3u16, 7, 3, 3, 900]);
        assert_eq!(freqs.get(&3), Some(3));
        assert_eq!(freqs.get(&7), Some(1));
        assert_eq!(freqs.get(&900), Some(1));
    }

    #[test]
    fn from_map_drops_zero_counts() -> anyhow::Result<()> {
        let map: HashMap<char, u64> = [('a', 2), ('b', 0)].into_iter().collect();
        let freqs = FrequencyTable::try_from(map)?;
        assert_eq!(freqs.len(), 1);
        assert_eq!(freqs.get(&'b'), None);
        Ok(())
    }

    #[test]
    fn from_map_rejects_overflowing_total() {
        let map: HashMap<char, u64> = [('a', u64::MAX), ('b', 1)].into_iter().collect();
        assert_eq!(FrequencyTable::try_from(map), Err(CodecError::CountOverflow));
    }

    #[test]
    fn from_map_accepts_total_of_u64_max() -> anyhow::Result<()> {
        let map: HashMap<char, u64> = [('a', u64::MAX - 1), ('b', 1)].into_iter().collect();
        let freqs = FrequencyTable::try_from(map)?;
        assert_eq!(freqs.total(), u64::MAX);
        Ok(())
    }
}
