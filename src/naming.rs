//! Settlement names
//!
//! Names are an optional qualifier, a prefix and a suffix glued together,
//! e.g. "Old Ashville" or "Tamstone".

use rand::Rng;

const QUALIFIERS: &[&str] = &["Great ", "New ", "Old ", ""];

const PREFIXES: &[&str] = &[
    "Ply", "Ex", "Nor", "Fat", "Yar", "Stoke", "Castle", "Ash", "Wil", "Tam", "Nak", "Plo",
    "Tyr", "Wood", "New",
];

const SUFFIXES: &[&str] = &["mont", "pol", "die", "ville", "stone", "west", "gow", "hill", "ham"];

/// Generate a settlement name
pub fn settlement_name(rng: &mut impl Rng) -> String {
    let qualifier = pick(rng, QUALIFIERS);
    let prefix = pick(rng, PREFIXES);
    let suffix = pick(rng, SUFFIXES);
    format!("{}{}{}", qualifier, prefix, suffix)
}

/// Helper function to pick a random element from a slice
fn pick<'a>(rng: &mut impl Rng, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}
