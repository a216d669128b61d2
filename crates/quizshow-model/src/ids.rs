//! Identity generation.
//!
//! Identities are short random base-36 tokens (`[0-9a-z]{7}`). They are not
//! cryptographic and uniqueness is best effort; the format is kept stable so
//! previously saved documents keep working.

use rand::Rng;

/// Length of a generated identity.
pub const ID_LENGTH: usize = 7;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh identity.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Generate an identity not rejected by `is_taken`.
///
/// Used where uniqueness within a parent scope matters (quiz ids within the
/// collection, pins within a map). Collisions are astronomically rare, so
/// this almost always returns on the first draw.
pub fn generate_unique_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate_id();
        if !is_taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_base36() {
        for _ in 0..100 {
            let id = generate_id();
            assert_eq!(id.len(), ID_LENGTH);
            assert!(
                id.bytes().all(|b| ALPHABET.contains(&b)),
                "unexpected id shape: {id}"
            );
        }
    }

    #[test]
    fn unique_id_skips_taken_values() {
        let taken: HashSet<String> = (0..50).map(|_| generate_id()).collect();
        let id = generate_unique_id(|candidate| taken.contains(candidate));
        assert!(!taken.contains(&id));
    }
}
