//! Alias generation and reserved-alias utilities.
//!
//! Generated aliases are random, not unique: the alias store's uniqueness
//! constraint is the actual guarantee, and callers regenerate on conflict.

use rand::Rng;

/// Default length of generated aliases.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Symbols generated aliases are drawn from (case-sensitive letters and digits).
pub const ALIAS_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Aliases that cannot be bound because they collide with service routes.
pub const RESERVED_ALIASES: &[&str] = &["url"];

/// Generates a random alias of `length` characters from [`ALIAS_ALPHABET`].
///
/// Uses the thread-local CSPRNG. With the default length there are 62^6
/// (about 5.7e10) possible aliases.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(6);
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALIAS_ALPHABET.len());
            ALIAS_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `alias` is reserved for a service route.
pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}
