//! Subsampled r-index demo: build an index and run a few queries.
//!
//! ```bash
//! cargo run --example full_text_search --features std
//! ```

use sri::build::Variant;
use sri::index::Index;

fn main() {
    println!("=== sri: subsampled r-index demo ===\n");

    let text: &[u8] = b"the quick brown fox jumps over the lazy dog. \
                 the fox was quick and the dog was lazy. \
                 a quick brown dog outfoxed a lazy fox";

    println!("Text ({} bytes):", text.len());
    println!("  \"{}\"", std::str::from_utf8(text).unwrap());

    let index = Index::build(text, 4, Variant::ValidArea, 64).expect("index builds");
    println!(
        "\nBuilt a rate-4 valid-area index: {} runs over {} characters.",
        index.num_runs(),
        index.text_len()
    );

    println!("\n--- Search Results ---\n");

    let queries = ["fox", "the", "quick", "lazy", "cat", "brown fox"];
    for query in &queries {
        let count = index.occurrences(query.as_bytes());
        if count > 0 {
            let mut positions = index.locate(query.as_bytes());
            positions.sort_unstable();
            println!("  \"{}\" -> {} occurrences at {:?}", query, count, positions);
        } else {
            println!("  \"{}\" -> not found", query);
        }
    }

    println!("\n--- Subsampling rates agree on the same locate set ---\n");
    let plain = Index::build(text, 1, Variant::Plain, 64).unwrap();
    let mut a = plain.locate(b"the");
    let mut b = index.locate(b"the");
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
    println!("  rate=1 and rate=4 both locate \"the\" at {:?}", a);

    let breakdown = index.breakdown();
    println!("\n--- Space breakdown (rate=4, valid-area) ---\n");
    println!("  {:?}", breakdown);
}
