//! Scene uid generation.
//!
//! Uids are `uid://` followed by 22 characters drawn from `[a-zA-Z0-9]`. The
//! random source is always passed in by the caller, so tests can use a seeded
//! generator and get stable output.

use rand::Rng;

pub const UID_SCHEME: &str = "uid://";
pub const UID_LENGTH: usize = 22;

const UID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a fresh scene uid from `rng`.
pub fn generate_uid<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut uid = String::with_capacity(UID_SCHEME.len() + UID_LENGTH);
    uid.push_str(UID_SCHEME);
    for _ in 0..UID_LENGTH {
        let idx = rng.gen_range(0..UID_ALPHABET.len());
        uid.push(char::from(UID_ALPHABET[idx]));
    }
    uid
}

/// Whether `value` has the exact shape produced by [`generate_uid`].
#[must_use]
pub fn is_uid(value: &str) -> bool {
    value.strip_prefix(UID_SCHEME).is_some_and(|token| {
        token.len() == UID_LENGTH && token.bytes().all(|b| b.is_ascii_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn uid_has_scheme_and_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let uid = generate_uid(&mut rng);
        assert!(uid.starts_with(UID_SCHEME));
        assert_eq!(uid.len(), UID_SCHEME.len() + UID_LENGTH);
        assert!(is_uid(&uid));
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_uid(&mut StdRng::seed_from_u64(42));
        let b = generate_uid(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_uids_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = generate_uid(&mut rng);
        let second = generate_uid(&mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_malformed_uids() {
        assert!(!is_uid("uid://short"));
        assert!(!is_uid("abcdefghijklmnopqrstuv"));
        assert!(!is_uid("uid://abcdefghijklmnopqrst-v"));
    }
}
