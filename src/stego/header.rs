// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Fixed-size metadata header.
//!
//! The header is embedded in the first 2080 carrier cells, in the clear,
//! ahead of the (possibly compressed and encrypted) payload:
//!
//! ```text
//! [1 byte   ] flags          bit0 = compressed, bit1 = encrypted, bits 2-7 zero
//! [255 bytes] filename       UTF-8, zero-padded on the right
//! [4 bytes  ] original size  big-endian u32, length before any transform
//! ```
//!
//! The filename field is cut at its first zero byte on decode, so a name
//! containing an embedded NUL comes back as the part before it.

use crate::stego::error::StegoError;
use crate::stego::transform::TransformChain;

/// Filename field width in bytes.
pub const FILENAME_LEN: usize = 255;

/// Total header size: flags(1) + filename(255) + original_size(4) = 260 bytes.
pub const HEADER_LEN: usize = 1 + FILENAME_LEN + 4;

/// Header size in carrier bit-cells.
pub const HEADER_BITS: usize = HEADER_LEN * 8;

/// Decoded header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Name of the hidden file.
    pub filename: String,
    /// Secret length in bytes before compression/encryption.
    pub original_size: u32,
    /// Transforms applied to the payload that follows the header.
    pub transforms: TransformChain,
}

impl Header {
    pub fn is_compressed(&self) -> bool {
        self.transforms.is_compressed()
    }

    pub fn is_encrypted(&self) -> bool {
        self.transforms.is_encrypted()
    }

    /// Raw flags byte.
    pub fn flags(&self) -> u8 {
        self.transforms.flags()
    }
}

/// Serialize a header.
///
/// # Errors
/// - [`StegoError::FilenameTooLong`] if `filename` is longer than 255 bytes as UTF-8.
/// - [`StegoError::ReservedFlags`] if any of bits 2-7 of `flags` is set.
pub fn encode(filename: &str, original_size: u32, flags: u8) -> Result<[u8; HEADER_LEN], StegoError> {
    // Validates reserved bits.
    TransformChain::from_flags(flags)?;

    let name = filename.as_bytes();
    if name.len() > FILENAME_LEN {
        return Err(StegoError::FilenameTooLong { len: name.len() });
    }

    let mut header = [0u8; HEADER_LEN];
    header[0] = flags;
    header[1..1 + name.len()].copy_from_slice(name);
    header[1 + FILENAME_LEN..].copy_from_slice(&original_size.to_be_bytes());
    Ok(header)
}

/// Parse a header from its 260 serialized bytes.
pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Header, StegoError> {
    let transforms = TransformChain::from_flags(bytes[0])?;

    let field = &bytes[1..1 + FILENAME_LEN];
    let end = field.iter().position(|&b| b == 0).unwrap_or(FILENAME_LEN);
    let filename = std::str::from_utf8(&field[..end])
        .map_err(|_| StegoError::InvalidFilename)?
        .to_string();

    let size = &bytes[1 + FILENAME_LEN..];
    let original_size = u32::from_be_bytes([size[0], size[1], size[2], size[3]]);

    Ok(Header { filename, original_size, transforms })
}

/// Parse a header from a bit vector (one bit per element, MSB first within
/// each byte). Only the first [`HEADER_BITS`] bits are read.
///
/// # Errors
/// - [`StegoError::HeaderTooShort`] if fewer than 2080 bits are available.
/// - [`StegoError::InvalidFilename`] if the filename is not valid UTF-8.
/// - [`StegoError::ReservedFlags`] if reserved flag bits are set.
pub fn decode(bits: &[u8]) -> Result<Header, StegoError> {
    if bits.len() < HEADER_BITS {
        return Err(StegoError::HeaderTooShort { available: bits.len() });
    }
    let bytes = bits_to_bytes(&bits[..HEADER_BITS]);
    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&bytes);
    parse(&header)
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// A trailing partial byte is dropped.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect()
}
