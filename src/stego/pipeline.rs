// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Hide/extract pipeline over raw sample bytes.
//!
//! Hide:
//! 1. Validate the filename and secret size, build the header
//! 2. Apply the transform chain (Brotli, then Argon2id + AES-256-GCM-SIV)
//! 3. Check capacity against the cover, then embed header ++ payload into a
//!    copy of the cover's LSBs
//!
//! Extract:
//! 1. Read the header from the first 2080 cells
//! 2. Fail early if the payload is encrypted and no password was given
//! 3. Read every remaining cell as the candidate payload
//! 4. Invert the transform chain, then truncate to the declared size
//!
//! Progress fractions: hide reports 0.1 (prepare), 0.2/0.3 (transforms), 0.4
//! (header), 0.6-0.9 (embedding); extract reports 0.25 (header), 0.4-0.7
//! (bits), 0.8/0.9 (transforms). The public entry points finish with
//! [`Stage::Done`] at 1.0.

use crate::stego::capacity;
use crate::stego::embed;
use crate::stego::error::StegoError;
use crate::stego::extract::{extract_header, extract_payload};
use crate::stego::header;
use crate::stego::progress::{Reporter, Stage};
use crate::stego::transform::TransformChain;

/// Progress span of the embedding loop.
pub(crate) const EMBED_SPAN: (f32, f32) = (0.6, 0.9);
/// Progress span of the extraction loop.
pub(crate) const EXTRACT_SPAN: (f32, f32) = (0.4, 0.7);

/// Options for [`hide`].
///
/// `Default` hides the secret verbatim: no compression, no password.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HideOptions {
    /// Encrypt the payload under this password. `None` or empty disables encryption.
    pub password: Option<String>,
    /// Brotli-compress the payload before encryption.
    pub compress: bool,
}

impl HideOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// The effective password: `None` if unset or empty.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Transform chain these options select.
    pub fn transforms(&self) -> TransformChain {
        TransformChain::new(self.compress, self.password())
    }
}

// Keep the password out of logs and panic messages.
impl std::fmt::Debug for HideOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HideOptions")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("compress", &self.compress)
            .finish()
    }
}

/// A recovered secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Secret bytes, exactly as passed to [`hide`].
    pub data: Vec<u8>,
    /// Filename stored in the header.
    pub filename: String,
}

/// Hide `secret` in the LSBs of `cover` and return the stego samples.
///
/// `cover` is never modified; the result has the same length and differs
/// only in LSBs.
///
/// # Errors
/// - [`StegoError::FilenameTooLong`] if `filename` exceeds 255 bytes as UTF-8.
/// - [`StegoError::SecretTooLarge`] if `secret` does not fit the 32-bit size field.
/// - [`StegoError::CapacityExceeded`] if header plus payload do not fit.
/// - [`StegoError::Cancelled`] if the reporter's cancel token fires.
pub fn hide(
    cover: &[u8],
    secret: &[u8],
    filename: &str,
    options: &HideOptions,
    reporter: &mut Reporter<'_>,
) -> Result<Vec<u8>, StegoError> {
    let stego = hide_samples(cover, secret, filename, options, reporter)?;
    reporter.report(Stage::Done, 1.0);
    Ok(stego)
}

/// Recover the secret and its filename from stego samples.
///
/// # Errors
/// - [`StegoError::HeaderTooShort`] if there are fewer than 2080 sample bytes.
/// - [`StegoError::InvalidFilename`] / [`StegoError::ReservedFlags`] for a bad header.
/// - [`StegoError::PasswordRequired`] if the payload is encrypted and `password` is `None` or empty.
/// - [`StegoError::DecryptionFailed`] on a wrong password or corrupted data.
/// - [`StegoError::DecompressionFailed`] on a corrupt compressed stream.
/// - [`StegoError::PayloadTruncated`] if fewer bytes than the declared size were recovered.
pub fn extract(
    stego: &[u8],
    password: Option<&str>,
    reporter: &mut Reporter<'_>,
) -> Result<Extracted, StegoError> {
    let extracted = extract_samples(stego, password, reporter)?;
    reporter.report(Stage::Done, 1.0);
    Ok(extracted)
}

/// [`hide`] without the final `Done` report, for callers with more work after it.
pub(crate) fn hide_samples(
    cover: &[u8],
    secret: &[u8],
    filename: &str,
    options: &HideOptions,
    reporter: &mut Reporter<'_>,
) -> Result<Vec<u8>, StegoError> {
    reporter.report(Stage::Preparing, 0.1);

    let original_size =
        u32::try_from(secret.len()).map_err(|_| StegoError::SecretTooLarge(secret.len()))?;
    let transforms = options.transforms();
    // Validates the filename before any expensive transform runs.
    let header_bytes = header::encode(filename, original_size, transforms.flags())?;
    log::debug!(
        "hiding {original_size} bytes, compress={} encrypt={}",
        transforms.is_compressed(),
        transforms.is_encrypted()
    );

    let payload = transforms.apply(secret.to_vec(), options.password(), reporter)?;

    reporter.report(Stage::Framing, 0.4);
    let required = capacity::required_cells(payload.len());
    if required > cover.len() {
        return Err(StegoError::CapacityExceeded { required, available: cover.len() });
    }
    let mut stream = Vec::with_capacity(header_bytes.len() + payload.len());
    stream.extend_from_slice(&header_bytes);
    stream.extend_from_slice(&payload);

    let mut stego = cover.to_vec();
    embed::embed(&mut stego, &stream, reporter, EMBED_SPAN)?;
    Ok(stego)
}

/// [`extract`] without the final `Done` report.
pub(crate) fn extract_samples(
    stego: &[u8],
    password: Option<&str>,
    reporter: &mut Reporter<'_>,
) -> Result<Extracted, StegoError> {
    let password = password.filter(|p| !p.is_empty());

    let header = extract_header(stego)?;
    reporter.report(Stage::ReadingHeader, 0.25);
    log::debug!(
        "header: {} bytes, compress={} encrypt={}",
        header.original_size,
        header.is_compressed(),
        header.is_encrypted()
    );

    if header.is_encrypted() && password.is_none() {
        return Err(StegoError::PasswordRequired);
    }

    let candidate = extract_payload(stego, reporter, EXTRACT_SPAN)?;
    let declared = header.original_size as usize;
    let mut data = header.transforms.invert(candidate, password, declared, reporter)?;

    if data.len() < declared {
        return Err(StegoError::PayloadTruncated { declared, available: data.len() });
    }
    data.truncate(declared);

    Ok(Extracted { data, filename: header.filename })
}
