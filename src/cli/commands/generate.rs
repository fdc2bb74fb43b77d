//! `passvault generate` — random password generator.
//!
//! Prints the password alone on stdout so it can be piped. The charset
//! leaves out the usual look-alikes (0/O, 1/l/I).

use rand::Rng;

use crate::errors::{PassVaultError, Result};

/// Letters and digits, minus look-alike characters.
const ALPHANUMERIC: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// Punctuation mixed in unless `--no-symbols` is passed.
const SYMBOLS: &[u8] = b"!@#$%^&*-_=+?";

/// Length used when another command asks for a generated password.
pub const DEFAULT_LENGTH: usize = 20;

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 128;

/// Execute the `generate` command.
pub fn execute(length: usize, no_symbols: bool) -> Result<()> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(PassVaultError::CommandFailed(format!(
            "length must be between {MIN_LENGTH} and {MAX_LENGTH}"
        )));
    }

    println!("{}", random_password(length, !no_symbols));
    Ok(())
}

/// Generate a random password of `length` characters.
pub fn random_password(length: usize, symbols: bool) -> String {
    let mut charset = ALPHANUMERIC.to_vec();
    if symbols {
        charset.extend_from_slice(SYMBOLS);
    }

    let mut rng = rand::rng();
    (0..length)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}
