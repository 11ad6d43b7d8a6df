// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from header framing through
//! encryption, compression and container parsing. Every variant is fatal for
//! the call that produced it; no output is written after an error.

use thiserror::Error;

use crate::wav::error::WavError;

/// Errors that can occur while hiding or extracting a payload.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The UTF-8 encoded filename does not fit the 255-byte header field.
    #[error("filename is {len} bytes, header allows at most 255")]
    FilenameTooLong { len: usize },
    /// The filename field in the header is not valid UTF-8.
    #[error("embedded filename is not valid UTF-8")]
    InvalidFilename,
    /// The carrier has fewer bit-cells than the 2080 the header needs.
    #[error("carrier too small for header: {available} of 2080 bits")]
    HeaderTooShort { available: usize },
    /// Reserved flag bits (2-7) are set.
    #[error("unsupported header flags: 0b{0:08b}")]
    ReservedFlags(u8),
    /// Header plus payload needs more bit-cells than the carrier has.
    #[error("cover too small: need {required} bits, have {available}")]
    CapacityExceeded { required: usize, available: usize },
    /// The secret does not fit the 32-bit size field.
    #[error("secret of {0} bytes exceeds the 4 GiB limit")]
    SecretTooLarge(usize),
    /// The payload is encrypted and no password was supplied.
    #[error("password required to decrypt the data")]
    PasswordRequired,
    /// Authentication failed: wrong password or corrupted data.
    #[error("decryption failed (wrong password or corrupted data)")]
    DecryptionFailed,
    /// The compressed stream is truncated or corrupt.
    #[error("decompression failed (corrupted data)")]
    DecompressionFailed,
    /// The recovered payload is shorter than the size declared in the header.
    #[error("payload truncated: header declares {declared} bytes, only {available} recovered")]
    PayloadTruncated { declared: usize, available: usize },
    /// The operation was cancelled by the caller.
    #[error("operation cancelled by user")]
    Cancelled,
    /// The cover or stego file could not be parsed as a PCM WAV file.
    #[error("invalid WAV: {0}")]
    InvalidWav(#[from] WavError),
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
