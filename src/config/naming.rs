//! Random ledger names.
//!
//! Produces names in the format `adjective-noun-NN` (e.g. `amber-abacus-42`)
//! for `/new` without an explicit name.

use rand::RngExt;

const ADJECTIVES: &[&str] = &[
    "amber", "brisk", "cobalt", "dusty", "even", "frugal", "gilded", "humble", "ivory", "jolly",
    "keen", "lucky", "modest", "nimble", "odd", "prime", "quiet", "round", "steady", "tidy",
];

const NOUNS: &[&str] = &[
    "abacus", "budget", "coffer", "drawer", "estimate", "fund", "purse", "jar", "kitty", "ledger",
    "margin", "note", "pot", "quota", "reserve", "sum", "tab", "tally", "vault", "wallet",
];

/// Generate a random ledger name like `amber-abacus-42`.
pub fn generate_ledger_name() -> String {
    let mut rng = rand::rng();
    let adj = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let num: u8 = rng.random_range(0..100);
    format!("{}-{}-{}", adj, noun, num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_name_shape() {
        for _ in 0..50 {
            let name = generate_ledger_name();
            let parts: Vec<&str> = name.split('-').collect();
            assert_eq!(parts.len(), 3, "{}", name);
            assert!(ADJECTIVES.contains(&parts[0]));
            assert!(NOUNS.contains(&parts[1]));
            assert!(parts[2].parse::<u8>().unwrap() < 100);
        }
    }
}
