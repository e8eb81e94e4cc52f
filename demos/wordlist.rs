//! Example: a word list that maps each word to its part of speech.
//!
//! Shows building a `DawgMap`, exact lookups, splitting a text with
//! common-prefix search, and saving the map to bytes.
//!
//! Run with: cargo run --example wordlist

use dawgmap::{DawgMap, DawgMapBuilder};

fn main() {
    let words = [
        ("BAKE", "verb"),
        ("BAKED", "adjective"),
        ("BAKER", "noun"),
        ("CAKE", "noun"),
        ("CAKED", "adjective"),
        ("FAKE", "adjective"),
        ("LAKE", "noun"),
    ];
    let map = DawgMap::from_pairs(words.map(|(w, pos)| (w, pos.to_string()))).unwrap();

    // Word lookup
    println!("Word lookup:");
    for word in ["BAKE", "BAKER", "BAKES", "CAKE", "LAKE", "MAKE"] {
        match map.get(word) {
            Some(pos) => println!("  {word}: {pos}"),
            None => println!("  {word}: not a word"),
        }
    }

    // Longest match segmentation
    println!("\nSegmenting BAKERCAKEFAKELAKE:");
    let text = "BAKERCAKEFAKELAKE";
    let mut rest = text;
    while !rest.is_empty() {
        match map.common_prefix_search(rest).last() {
            Some((word, pos)) => {
                println!("  {word} ({pos})");
                rest = &rest[word.len()..];
            }
            None => {
                let skipped = rest.chars().next().map_or(1, char::len_utf8);
                println!("  skipped {:?}", &rest[..skipped]);
                rest = &rest[skipped..];
            }
        }
    }

    // Size of the encoding
    let trie = DawgMapBuilder::new()
        .minimize(false)
        .build_from_pairs(words.map(|(w, pos)| (w, pos.to_string())))
        .unwrap();
    println!(
        "\nStates: {} minimized, {} as a plain trie",
        map.num_states(),
        trie.num_states()
    );
    println!("Serialized size: {} bytes", map.to_bytes().unwrap().len());
}
