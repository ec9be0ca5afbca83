use std::{
    collections::{hash_map, HashMap},
    hash::Hash,
};

use bitvec::{bitvec, order::Lsb0, vec::BitVec};
use tracing::debug;

use crate::{frequency::FrequencyTable, tree::HuffmanTree};

/// A code word, first bit first.
pub type Code = BitVec;

/// Recognizes complete code words. This is all a decoder needs to know
/// about a code.
pub trait CodeLookup {
    type Symbol;

    fn lookup(&self, code: &Code) -> Option<&Self::Symbol>;

    /// Length of the longest code word; no lookup of a longer code succeeds.
    fn max_code_len(&self) -> usize;
}

/// Symbol to code word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Eq + Hash> {
    sym_to_code: HashMap<S, Code>,
}

/// Code word to symbol; the inverse of a [`CodeTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseCodeTable<S> {
    code_to_sym: HashMap<Code, S>,
    max_len: usize,
}

impl<S: Eq + Hash + Clone> HuffmanTree<S> {
    /// Derive both code tables from the root-to-leaf paths, `0` for a left
    /// edge and `1` for a right edge.
    ///
    /// A tree that is a single leaf has no edges; its symbol gets the code
    /// `0` so that every code is non-empty.
    pub fn code_tables(&self) -> (CodeTable<S>, ReverseCodeTable<S>) {
        let mut codes = CodeTable {
            sym_to_code: HashMap::with_capacity(self.leaf_count()),
        };
        let mut reverse = ReverseCodeTable {
            code_to_sym: HashMap::with_capacity(self.leaf_count()),
            max_len: 0,
        };
        let mut record = |symbol: &S, code: Code| {
            reverse.max_len = reverse.max_len.max(code.len());
            reverse.code_to_sym.insert(code.clone(), symbol.clone());
            codes.sym_to_code.insert(symbol.clone(), code);
        };

        let mut stack = Vec::new();
        match self.root() {
            None => (),
            Some(root) => match root.symbol() {
                Some(symbol) => record(symbol, bitvec![0]),
                None => stack.push((root, Code::new())),
            },
        }

        while let Some((node, code)) = stack.pop() {
            if let Some((left, right)) = node.children() {
                let mut left_code = code.clone();
                left_code.push(false);
                let mut right_code = code;
                right_code.push(true);

                stack.push((right, right_code));
                stack.push((left, left_code));
            } else if let Some(symbol) = node.symbol() {
                record(symbol, code);
            }
        }

        debug!(
            symbols = codes.len(),
            max_code_len = reverse.max_len,
            "derived code tables"
        );
        (codes, reverse)
    }
}

impl<S: Eq + Hash> CodeTable<S> {
    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.sym_to_code.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.sym_to_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sym_to_code.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, S, Code> {
        self.sym_to_code.iter()
    }

    /// Entries ordered by code length, then symbol.
    pub fn sorted(&self) -> Vec<(&S, &Code)>
    where
        S: Ord,
    {
        let mut entries: Vec<_> = self.sym_to_code.iter().collect();
        entries.sort_by(|(s1, c1), (s2, c2)| (c1.len(), s1).cmp(&(c2.len(), s2)));
        entries
    }

    /// Number of bits the counted sequence encodes to, computed without
    /// encoding it. `None` if a counted symbol has no code, or if the length
    /// does not fit in a `u64`.
    pub fn encoded_len(&self, freqs: &FrequencyTable<S>) -> Option<u64> {
        freqs.iter().try_fold(0u64, |total, (symbol, &count)| {
            let code = self.get(symbol)?;
            total.checked_add(count.checked_mul(code.len() as u64)?)
        })
    }
}

impl<S> ReverseCodeTable<S> {
    pub fn get(&self, code: &Code) -> Option<&S> {
        self.code_to_sym.get(code)
    }

    pub fn len(&self) -> usize {
        self.code_to_sym.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_sym.is_empty()
    }
}

impl<S> CodeLookup for ReverseCodeTable<S> {
    type Symbol = S;

    fn lookup(&self, code: &Code) -> Option<&S> {
        self.get(code)
    }

    fn max_code_len(&self) -> usize {
        self.max_len
    }
}
