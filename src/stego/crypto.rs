// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Password-based payload encryption.
//!
//! The key is derived with Argon2id from the password and a random 16-byte
//! salt, then used for AES-256-GCM-SIV with a random 12-byte nonce. The salt
//! and nonce travel with the ciphertext as a single self-delimiting token:
//!
//! ```text
//! [16 bytes] Argon2 salt
//! [12 bytes] AES-GCM-SIV nonce
//! [4 bytes ] ciphertext length N (big-endian u32, authenticated as AAD)
//! [N bytes ] ciphertext including the 16-byte auth tag
//! ```
//!
//! Because the token carries its own length, [`decrypt`] ignores anything
//! that follows it. Extraction reads the carrier to its end, so the bytes
//! after the token are whatever LSBs the cover happened to have.

use aes_gcm_siv::aead::{Aead, Payload};
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use argon2::Argon2;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// Argon2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-GCM-SIV authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Width of the ciphertext length field.
const LEN_FIELD: usize = 4;

/// Fixed token overhead: salt(16) + nonce(12) + length(4) + tag(16) = 48 bytes.
pub const ENCRYPTION_OVERHEAD: usize = SALT_LEN + NONCE_LEN + LEN_FIELD + TAG_LEN;

/// Derive the AES-256 key from password + salt.
///
/// Argon2id with the crate defaults (19 MiB, 2 passes, 1 lane): fixed cost,
/// fixed 32-byte output.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut *key)
        .expect("Argon2 key derivation should not fail with a 16-byte salt");
    key
}

/// Ciphertext length (plaintext + tag) as stored in the token's length field.
///
/// Returns [`StegoError::SecretTooLarge`] if it does not fit in a `u32`.
pub fn ciphertext_len(plaintext_len: usize) -> Result<u32, StegoError> {
    plaintext_len
        .checked_add(TAG_LEN)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(StegoError::SecretTooLarge(plaintext_len))
}

/// Encrypt `plaintext` under `password` with a fresh random salt and nonce.
///
/// Two calls with identical inputs produce different tokens.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>, StegoError> {
    use rand::RngCore;
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    encrypt_with(plaintext, password, &salt, &nonce_bytes)
}

/// Encrypt with caller-provided salt and nonce. Deterministic; used by
/// [`encrypt`] and by tests that need a fixed token.
pub fn encrypt_with(
    plaintext: &[u8],
    password: &str,
    salt: &[u8; SALT_LEN],
    nonce_bytes: &[u8; NONCE_LEN],
) -> Result<Vec<u8>, StegoError> {
    let ct_len = ciphertext_len(plaintext.len())?;
    let key = derive_key(password, salt);
    let cipher = Aes256GcmSiv::new_from_slice(&*key).expect("valid key length");
    let nonce = Nonce::from_slice(nonce_bytes);

    let aad = ct_len.to_be_bytes();
    let ciphertext = cipher
        .encrypt(nonce, Payload { msg: plaintext, aad: &aad })
        .expect("AES-GCM-SIV encrypt should not fail");
    debug_assert_eq!(ciphertext.len(), ct_len as usize);

    let mut token = Vec::with_capacity(ENCRYPTION_OVERHEAD + plaintext.len());
    token.extend_from_slice(salt);
    token.extend_from_slice(nonce_bytes);
    token.extend_from_slice(&aad);
    token.extend_from_slice(&ciphertext);
    Ok(token)
}

/// Decrypt a token produced by [`encrypt`]. Bytes after the token are ignored.
///
/// Returns `StegoError::DecryptionFailed` if the password is wrong or the
/// token is truncated or corrupted.
pub fn decrypt(token: &[u8], password: &str) -> Result<Vec<u8>, StegoError> {
    let prefix = SALT_LEN + NONCE_LEN + LEN_FIELD;
    if token.len() < prefix {
        return Err(StegoError::DecryptionFailed);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&token[..SALT_LEN]);
    let nonce_bytes = &token[SALT_LEN..SALT_LEN + NONCE_LEN];
    let aad = &token[SALT_LEN + NONCE_LEN..prefix];
    let ct_len = u32::from_be_bytes([aad[0], aad[1], aad[2], aad[3]]) as usize;

    if ct_len < TAG_LEN || token.len() - prefix < ct_len {
        return Err(StegoError::DecryptionFailed);
    }
    let ciphertext = &token[prefix..prefix + ct_len];

    let key = derive_key(password, &salt);
    let cipher = Aes256GcmSiv::new_from_slice(&*key).expect("valid key length");
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, Payload { msg: ciphertext, aad })
        .map_err(|_| StegoError::DecryptionFailed)
}
