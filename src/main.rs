use std::{
    env, fs,
    io::{self, Read},
};

use huffman::{bits, stats::CompressionStats, CodecFlags, Codebook};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Usage: `huffman [--lenient] [--decode BITS] [FILE]`.
///
/// The code is built from the text of FILE, or stdin when no file is given.
/// Without `--decode`, prints that text's encoding, code table and
/// statistics. With `--decode`, decodes BITS (a string of `0` and `1`)
/// against that code instead; `--lenient` then tolerates truncated or
/// invalid bits.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut flags = CodecFlags::default();
    let mut path = None;
    let mut to_decode = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lenient" => flags |= CodecFlags::LENIENT,
            "--decode" => {
                let bits = args.next().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "--decode needs a bit-string")
                })?;
                to_decode = Some(bits);
            }
            _ => path = Some(arg),
        }
    }

    let text = match &path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let book = Codebook::from_text(&text);

    match to_decode {
        Some(bit_text) => println!("{}", decode_bits(&book, &bit_text, flags)?),
        None => print_encoding(&book, &text)?,
    }

    Ok(())
}

fn decode_bits(book: &Codebook<char>, bit_text: &str, flags: CodecFlags) -> io::Result<String> {
    let bits = bits::parse(bit_text.trim())?;
    let decoded: String = book.decode_with(&bits, flags)?.into_iter().collect();
    info!(bits = bits.len(), symbols = decoded.chars().count(), "decoded input");
    Ok(decoded)
}

fn print_encoding(book: &Codebook<char>, text: &str) -> io::Result<()> {
    let encoded = book.encode_text(text)?;
    info!(
        symbols = book.codes().len(),
        bits = encoded.len(),
        "encoded input"
    );

    println!("Encoded Text:\n{}\n", bits::to_text(&encoded));
    println!("Huffman Codes:");
    for (symbol, code) in book.codes().sorted() {
        println!("{symbol:?}: {}", bits::to_text(code));
    }

    let freqs = huffman::count_chars(text);
    if let Some(stats) = CompressionStats::measure(&freqs, book.codes()) {
        println!();
        println!("Original Size: {} bytes", stats.original_bytes());
        println!("Compressed Size: {} bytes", stats.encoded_bytes());
        println!("Compression Ratio: {:.2}%", stats.ratio_percent());
    }

    Ok(())
}
