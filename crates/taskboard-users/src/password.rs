//! Password hashing.
//!
//! Hashes are encoded as `pbkdf2-sha256$<iterations>$<salt>$<key>` with
//! unpadded standard base64, so the iteration count travels with each record
//! and can be raised without invalidating existing accounts.

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD as B64;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Rounds used when no configuration is supplied.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Highest round count accepted, both for new hashes and stored ones.
pub const MAX_ITERATIONS: u32 = 10_000_000;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Produces and checks encoded password hashes.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    /// Hasher using `iterations` rounds, clamped to `1..=MAX_ITERATIONS`.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.clamp(1, MAX_ITERATIONS),
        }
    }

    /// Rounds applied to new hashes.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> String {
        let salt: [u8; SALT_LEN] = rand::random();
        let key = derive_key(password, &salt, self.iterations);
        format!(
            "{SCHEME}${}${}${}",
            self.iterations,
            B64.encode(salt),
            B64.encode(key)
        )
    }

    /// Check `password` against an encoded hash. Malformed encodings never verify.
    pub fn verify(encoded: &str, password: &str) -> bool {
        let Some((iterations, salt, expected)) = decode(encoded) else {
            return false;
        };
        let key = derive_key(password, &salt, iterations);
        constant_time_eq(&key, &expected)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

/// Whether `stored` is an encoded hash rather than legacy plaintext.
pub fn is_hashed(stored: &str) -> bool {
    stored
        .split_once('$')
        .is_some_and(|(scheme, _)| scheme == SCHEME)
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn decode(encoded: &str) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let mut parts = encoded.split('$');
    if parts.next()? != SCHEME {
        return None;
    }
    let iterations: u32 = parts
        .next()?
        .parse()
        .ok()
        .filter(|n| (1..=MAX_ITERATIONS).contains(n))?;
    let salt = B64.decode(parts.next()?).ok()?;
    let key = B64.decode(parts.next()?).ok()?;
    if parts.next().is_some() || key.len() != KEY_LEN {
        return None;
    }
    Some((iterations, salt, key))
}

/// Byte comparison whose running time does not depend on where inputs differ.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
