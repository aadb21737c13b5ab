//! Share token generation and validation
//!
//! A share token is the sole bearer credential for a shared snapshot, so
//! it comes from the operating system's CSPRNG, never a general-purpose
//! generator. 24 random bytes hex-encode to the 48-character lowercase
//! form that the portal accepts.

use rand::RngCore;
use rand::rngs::OsRng;
use regex::Regex;
use std::sync::OnceLock;

/// Number of random bytes behind each token (192 bits of entropy)
pub const TOKEN_BYTES: usize = 24;

/// Generate a fresh share token
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Check that a string has the exact shape of a share token
///
/// Used on the portal surface to reject junk before any backend is asked.
pub fn is_well_formed(token: &str) -> bool {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TOKEN_REGEX
        .get_or_init(|| Regex::new(r"^[0-9a-f]{48}$").expect("Failed to compile token regex"));

    regex.is_match(token)
}
