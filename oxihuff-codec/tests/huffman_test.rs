//! Comprehensive Huffman integration tests.

use oxihuff_codec::{
    CodeTable, HuffmanConfig, HuffmanError, HuffmanTree, Symbol, compress, compress_embedded,
    compress_textual, decompress, decompress_embedded, decompress_textual, description, preamble,
};
use oxihuff_core::{BitReader, FrequencyTable};

fn lcg_bytes(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed = seed;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn roundtrip_both(original: &[u8]) {
    let compressed = compress_embedded(original).expect("compression failed");
    let decompressed = decompress_embedded(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original, "embedded roundtrip");

    let compressed = compress_textual(original).expect("compression failed");
    let description = compressed
        .description
        .as_deref()
        .expect("textual output has a description");
    let decompressed =
        decompress_textual(description, &compressed.payload).expect("decompression failed");
    assert_eq!(decompressed, original, "textual roundtrip");
}

#[test]
fn test_huffman_roundtrip_simple() {
    roundtrip_both(b"TOBEORNOTTOBEORTOBEORNOT");
}

#[test]
fn test_huffman_roundtrip_edge_inputs() {
    roundtrip_both(b"");
    roundtrip_both(b"A");
    roundtrip_both(&[0u8; 1000]);
    roundtrip_both(&[0xFFu8; 3]);
    roundtrip_both(b"ab");
    roundtrip_both(&(0..=255).collect::<Vec<u8>>());
}

#[test]
fn test_huffman_roundtrip_random_like() {
    for (i, size) in [1usize, 7, 64, 255, 256, 257, 1000, 4096].into_iter().enumerate() {
        let original = lcg_bytes(size, 0x123456789ABCDEF0 ^ i as u64);
        roundtrip_both(&original);
    }
}

#[test]
fn test_huffman_roundtrip_large_text() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(2000);
    let compressed = compress_embedded(&original).expect("compression failed");

    // English text should need well under 8 bits per byte
    assert!(
        compressed.len() < original.len() * 3 / 4,
        "text should compress below 75%, got {} of {}",
        compressed.len(),
        original.len()
    );

    let decompressed = decompress_embedded(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_huffman_all_same_byte_compresses() {
    let original = vec![b'X'; 8000];
    let compressed = compress_embedded(&original).expect("compression failed");
    // One bit per symbol plus the preamble
    assert_eq!(compressed.len(), (32 + 10 + 8000_usize).div_ceil(8));
    assert_eq!(decompress_embedded(&compressed).unwrap(), original);
}

#[test]
fn test_huffman_prefix_free_property() {
    for seed in 0..16u64 {
        let data = lcg_bytes(300, seed);
        let freqs = FrequencyTable::from_bytes(&data);
        for pseudo_eof in [false, true] {
            let tree = HuffmanTree::from_frequencies(&freqs, pseudo_eof).unwrap();
            let codes = CodeTable::from_tree(&tree);
            let all: Vec<_> = codes.iter().map(|(_, c)| c).collect();
            for (i, a) in all.iter().enumerate() {
                for b in &all[i + 1..] {
                    assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
                }
            }
        }
    }
}

#[test]
fn test_huffman_tree_serialization_roundtrip() {
    for seed in 0..8u64 {
        let data = lcg_bytes(500, seed);
        let freqs = FrequencyTable::from_bytes(&data);

        let tree = HuffmanTree::from_frequencies(&freqs, false).unwrap();
        let mut writer = oxihuff_core::BitWriter::new(Vec::new());
        preamble::write_tree(&tree, &mut writer).unwrap();
        let bytes = writer.into_inner().unwrap();
        let parsed = preamble::read_tree(&mut BitReader::new(bytes.as_slice())).unwrap();
        assert!(parsed.same_shape(&tree));

        let tree = HuffmanTree::from_frequencies(&freqs, true).unwrap();
        let parsed = description::parse_description(&description::describe(&tree)).unwrap();
        assert!(parsed.same_shape(&tree));
    }
}

#[test]
fn test_huffman_embedded_bit_exact() {
    let compressed = compress_embedded(b"abab").unwrap();
    // count = 4 | 1 'a' 1 'b' 0 0 | 0 1 0 1
    assert_eq!(compressed, vec![0x00, 0x00, 0x00, 0x04, 0xB0, 0xD8, 0x85]);
}

#[test]
fn test_huffman_output_is_deterministic() {
    let data = lcg_bytes(2048, 42);
    let first = compress(&data, HuffmanConfig::TEXTUAL).unwrap();
    for _ in 0..4 {
        assert_eq!(compress(&data, HuffmanConfig::TEXTUAL).unwrap(), first);
    }
}

#[test]
fn test_huffman_count_honored() {
    let mut compressed = compress_embedded(b"abab").unwrap();
    // Declare 2 symbols; the remaining payload bits are ignored
    compressed[3] = 2;
    assert_eq!(decompress_embedded(&compressed).unwrap(), b"ab");

    // Trailing garbage after the payload is never read
    let mut compressed = compress_embedded(b"abab").unwrap();
    compressed.extend_from_slice(&[0xFF, 0x00, 0xAB]);
    assert_eq!(decompress_embedded(&compressed).unwrap(), b"abab");
}

#[test]
fn test_huffman_truncation_detected() {
    let inputs: [&[u8]; 4] = [b"", b"A", b"abab", b"The quick brown fox jumps over the lazy dog"];
    for original in inputs {
        let mut compressed = compress_embedded(original).unwrap();
        compressed.pop();
        assert!(
            matches!(
                decompress_embedded(&compressed),
                Err(HuffmanError::TruncatedStream { .. })
            ),
            "embedded {original:?}"
        );

        let mut compressed = compress_textual(original).unwrap();
        compressed.payload.pop();
        assert!(
            matches!(
                decompress(&compressed, HuffmanConfig::TEXTUAL),
                Err(HuffmanError::TruncatedStream { .. })
            ),
            "textual {original:?}"
        );
    }
}

#[test]
fn test_huffman_textual_hand_written_description() {
    let description = "97\n0\n98\n10\n256\n11\n";
    // a b a EOF = 0 10 0 11
    let payload = [0b0100_1100u8];
    assert_eq!(decompress_textual(description, &payload).unwrap(), b"aba");
}

#[test]
fn test_huffman_textual_description_lists_every_symbol() {
    let compressed = compress_textual(b"hello").unwrap();
    let description = compressed.description.unwrap();
    let symbols: Vec<&str> = description.lines().step_by(2).collect();
    let mut sorted = symbols.clone();
    sorted.sort_by_key(|s| s.parse::<u16>().unwrap());
    assert_eq!(sorted, vec!["101", "104", "108", "111", "256"]);
}

#[test]
fn test_huffman_textual_malformed_description() {
    let err = decompress_textual("97\n0\n98\n", &[0]).unwrap_err();
    assert!(matches!(err, HuffmanError::MalformedDescription { .. }));

    // Complete tree but no pseudo-EOF leaf: decoding could never end
    let err = decompress_textual("97\n0\n98\n1\n", &[0]).unwrap_err();
    assert!(matches!(err, HuffmanError::MalformedDescription { .. }));

    let err = decompress_textual("", &[0]).unwrap_err();
    assert!(matches!(err, HuffmanError::EmptyAlphabet));
}

#[test]
fn test_huffman_embedded_malformed_preamble() {
    // count = 1, then an end marker with no tree
    let err = decompress_embedded(&[0, 0, 0, 1, 0x00]).unwrap_err();
    assert!(matches!(err, HuffmanError::MalformedDescription { .. }));
}

#[test]
fn test_huffman_code_lengths_follow_frequencies() {
    let freqs: FrequencyTable = [(b'a', 40), (b'b', 20), (b'c', 10), (b'd', 5)]
        .into_iter()
        .collect();
    let tree = HuffmanTree::from_frequencies(&freqs, false).unwrap();
    let codes = CodeTable::from_tree(&tree);
    let len = |b: u8| codes.get(Symbol::Byte(b)).unwrap().len();
    assert_eq!((len(b'a'), len(b'b'), len(b'c'), len(b'd')), (1, 2, 3, 3));
    assert_eq!(codes.encoded_bits(&freqs), 40 + 40 + 30 + 15);
}
