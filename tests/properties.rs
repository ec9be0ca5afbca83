use huffman::{count, count_chars, decode, encode, CodeTable, Codebook, CodecError, HuffmanTree};
use proptest::prelude::*;

fn prefix_free(codes: &CodeTable<char>) -> bool {
    codes.iter().all(|(s1, c1)| {
        codes.iter().all(|(s2, c2)| {
            s1 == s2 || c1.len() > c2.len() || c2[..c1.len()] != c1[..]
        })
    })
}

proptest! {
    #[test]
    fn prop_round_trip_text(text in ".{0,200}") {
        let book = Codebook::from_text(&text);
        let encoded = book.encode_text(&text).unwrap();
        prop_assert_eq!(book.decode_text(&encoded).unwrap(), text);
    }

    #[test]
    fn prop_round_trip_small_alphabet(symbols in prop::collection::vec(0u8..4, 0..500)) {
        let tree = HuffmanTree::build(&count(symbols.iter().copied()));
        let (codes, reverse) = tree.code_tables();
        let encoded = encode(&symbols, &codes).unwrap();
        prop_assert_eq!(decode(&encoded, &reverse).unwrap(), symbols);
    }

    #[test]
    fn prop_codes_prefix_free_and_non_empty(text in "[a-h]{0,300}") {
        let (codes, _) = HuffmanTree::build(&count_chars(&text)).code_tables();
        prop_assert!(codes.iter().all(|(_, code)| !code.is_empty()));
        prop_assert!(prefix_free(&codes));
    }

    #[test]
    fn prop_strict_binary_and_weight_conserving(text in "[a-z ]{0,300}") {
        let freqs = count_chars(&text);
        let tree = HuffmanTree::build(&freqs);
        prop_assert_eq!(tree.total_weight(), freqs.total());
        prop_assert_eq!(tree.leaf_count(), freqs.len());
        for visit in tree.walk() {
            let node = visit.node;
            match (node.left(), node.right()) {
                (Some(left), Some(right)) => {
                    prop_assert!(!node.is_leaf());
                    prop_assert_eq!(node.weight(), left.weight() + right.weight());
                }
                (None, None) => {
                    prop_assert!(node.is_leaf() && node.symbol().is_some());
                }
                _ => {
                    prop_assert!(false, "node with exactly one child");
                }
            }
        }
    }

    #[test]
    fn prop_truncation_is_reported(text in "[a-e]{2,100}") {
        let book = Codebook::from_text(&text);
        prop_assume!(book.codes().len() >= 2);
        let mut encoded = book.encode_text(&text).unwrap();
        let last = text.chars().last().unwrap();
        prop_assume!(book.codes().get(&last).unwrap().len() >= 2);
        encoded.pop();
        let is_malformed = matches!(
            book.decode_text(&encoded),
            Err(CodecError::MalformedBitstring { .. })
        );
        prop_assert!(is_malformed);
    }
}
