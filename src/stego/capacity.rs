// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Carrier capacity arithmetic.
//!
//! One carrier byte holds one bit. The header always takes
//! [`HEADER_BITS`] cells; what is left, rounded down to whole bytes, is the
//! room for the transformed payload.

use crate::stego::compress;
use crate::stego::crypto::ENCRYPTION_OVERHEAD;
use crate::stego::header::HEADER_BITS;

/// Capacity of one carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Bit-cells in the carrier (one per sample byte).
    pub carrier_bits: usize,
    /// Largest transformed payload, in bytes, that fits after the header.
    pub max_payload_bytes: usize,
}

impl Capacity {
    pub fn for_cells(carrier_bits: usize) -> Self {
        Self { carrier_bits, max_payload_bytes: max_payload_bytes(carrier_bits) }
    }

    /// Largest raw secret that fits uncompressed, with or without encryption.
    pub fn max_secret_bytes(&self, encrypted: bool) -> usize {
        if encrypted {
            self.max_payload_bytes.saturating_sub(ENCRYPTION_OVERHEAD)
        } else {
            self.max_payload_bytes
        }
    }

    /// Returns `true` if a transformed payload of `payload_len` bytes fits.
    pub fn fits(&self, payload_len: usize) -> bool {
        required_cells(payload_len) <= self.carrier_bits
    }
}

/// Payload bytes that fit in `carrier_bits` cells after the header.
pub fn max_payload_bytes(carrier_bits: usize) -> usize {
    carrier_bits.saturating_sub(HEADER_BITS) / 8
}

/// Cells needed for the header plus a `payload_len`-byte payload.
/// Saturates instead of overflowing.
pub fn required_cells(payload_len: usize) -> usize {
    payload_len.saturating_mul(8).saturating_add(HEADER_BITS)
}

/// Exact size of the payload `secret` becomes under the given options.
///
/// Runs the real compressor when `compressed` is set; encryption adds a fixed
/// [`ENCRYPTION_OVERHEAD`].
pub fn payload_len(secret: &[u8], compressed: bool, encrypted: bool) -> usize {
    let base = if compressed { compress::compress(secret).len() } else { secret.len() };
    if encrypted {
        base + ENCRYPTION_OVERHEAD
    } else {
        base
    }
}
