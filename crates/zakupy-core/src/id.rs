//! Opaque unique id generation.
//!
//! Ids are a base-36 millisecond timestamp followed by a random base-36
//! suffix, matching the format already present in persisted stores. They
//! are assigned once at record creation and never reused.

use rand::Rng;

const SUFFIX_LEN: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh opaque id.
#[must_use]
pub fn generate() -> String {
    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    let mut id = to_base36(millis);
    let mut rng = rand::thread_rng();
    for _ in 0..SUFFIX_LEN {
        id.push(BASE36[rng.gen_range(0..BASE36.len())] as char);
    }
    id
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{generate, to_base36};
    use std::collections::HashSet;

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_000_000), "lfls");
    }

    #[test]
    fn generated_ids_are_lowercase_alphanumeric() {
        let id = generate();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_do_not_collide_in_practice() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
