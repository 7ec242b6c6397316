//! Address shape checks
//!
//! Cheap syntactic predicates run before any network call.

/// True if `s` is a base58 string decoding to a 32-byte public key
pub fn is_solana_address(s: &str) -> bool {
    if !(32..=44).contains(&s.len()) {
        return false;
    }
    matches!(bs58::decode(s).into_vec(), Ok(bytes) if bytes.len() == 32)
}
