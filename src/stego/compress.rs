// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Brotli payload compression with an integrity check.
//!
//! ```text
//! [4 bytes] CRC-32 of the uncompressed data (big-endian)
//! [N bytes] Brotli stream
//! ```
//!
//! Brotli streams are self-terminating, and [`decompress`] stops as soon as
//! it has produced `limit` bytes. Extraction passes the header's original
//! size as the limit, so trailing carrier noise after the stream is never
//! consumed and a forged size cannot inflate into a decompression bomb.
//! Brotli itself carries no checksum; the CRC rejects streams that decode
//! cleanly to the wrong bytes.

use std::io::{Read, Write};

use crate::stego::error::StegoError;

/// Brotli compression quality (0-11).
const BROTLI_QUALITY: u32 = 11;

/// Brotli LG_WINDOW_SIZE. 22 is the default (4 MB window).
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

/// Internal buffer size for the Brotli reader/writer.
const BUFFER_SIZE: usize = 4096;

/// Width of the CRC-32 prefix.
pub const CHECKSUM_LEN: usize = 4;

/// Compress data with Brotli, prefixed by a CRC-32 of `data`.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    output.extend_from_slice(&crc32fast::hash(data).to_be_bytes());
    {
        let mut compressor = brotli::CompressorWriter::new(
            &mut output,
            BUFFER_SIZE,
            BROTLI_QUALITY,
            BROTLI_LG_WINDOW_SIZE,
        );
        compressor.write_all(data).expect("Brotli compression into a Vec should not fail");
        // CompressorWriter flushes on drop
    }
    output
}

/// Decompress exactly `limit` bytes and verify them against the stored CRC.
///
/// Fails with [`StegoError::DecompressionFailed`] if the stream is corrupt,
/// ends before `limit` bytes were produced, or decodes to bytes whose CRC
/// does not match.
pub fn decompress(data: &[u8], limit: usize) -> Result<Vec<u8>, StegoError> {
    if data.len() < CHECKSUM_LEN {
        return Err(StegoError::DecompressionFailed);
    }
    let (crc_bytes, stream) = data.split_at(CHECKSUM_LEN);
    let stored_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

    let mut output = Vec::with_capacity(limit.min(1 << 20));
    brotli::Decompressor::new(stream, BUFFER_SIZE)
        .take(limit as u64)
        .read_to_end(&mut output)
        .map_err(|_| StegoError::DecompressionFailed)?;

    if output.len() != limit || crc32fast::hash(&output) != stored_crc {
        log::debug!("decompressed {} of {limit} bytes, checksum rejected", output.len());
        return Err(StegoError::DecompressionFailed);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let data = b"abcdefghij".repeat(100);
        let c = compress(&data);
        assert!(c.len() < data.len());
        assert_eq!(decompress(&c, data.len()).unwrap(), data);
    }

    #[test]
    fn empty_roundtrip() {
        let c = compress(b"");
        assert!(c.len() > CHECKSUM_LEN);
        assert_eq!(decompress(&c, 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn wrong_limit_rejected() {
        let data = b"Hello World! ".repeat(1000);
        let c = compress(&data);
        assert!(matches!(decompress(&c, 100), Err(StegoError::DecompressionFailed)));
        assert!(matches!(decompress(&c, data.len() + 1), Err(StegoError::DecompressionFailed)));
    }

    #[test]
    fn trailing_garbage_ignored() {
        let data = b"the quick brown fox ".repeat(50);
        let mut c = compress(&data);
        c.extend_from_slice(&[0xFF; 64]);
        assert_eq!(decompress(&c, data.len()).unwrap(), data);
    }

    #[test]
    fn truncated_stream_rejected() {
        // Incompressible-ish data so the stream is long and the cut lands mid-data.
        let data: Vec<u8> = (0u32..4000).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
        let c = compress(&data);
        let cut = &c[..c.len() / 2];
        assert!(matches!(
            decompress(cut, data.len()),
            Err(StegoError::DecompressionFailed)
        ));
        assert!(matches!(decompress(&c[..3], 0), Err(StegoError::DecompressionFailed)));
    }

    #[test]
    fn checksum_field_corruption_rejected() {
        let data = b"checksummed".repeat(30);
        let mut c = compress(&data);
        c[1] ^= 0x10;
        assert!(matches!(decompress(&c, data.len()), Err(StegoError::DecompressionFailed)));
    }

    #[test]
    fn single_bit_flips_never_yield_wrong_bytes() {
        let data: Vec<u8> = b"Lorem ipsum dolor sit amet, ".iter().cycle().take(3000).copied().collect();
        let c = compress(&data);
        let mut rejected = 0;
        for bit in 0..c.len() * 8 {
            let mut corrupt = c.clone();
            corrupt[bit / 8] ^= 0x80 >> (bit % 8);
            match decompress(&corrupt, data.len()) {
                Ok(out) => assert_eq!(out, data, "bit {bit} decoded to different bytes"),
                Err(StegoError::DecompressionFailed) => rejected += 1,
                Err(e) => panic!("unexpected error {e:?}"),
            }
        }
        assert!(rejected > 0);
    }
}
