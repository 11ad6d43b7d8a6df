// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! `fmt ` chunk parsing.
//!
//! Extracts the sample parameters (channels, rate, bit depth) that describe
//! the raw bytes in the `data` chunk.

use super::error::{Result, WavError};

/// Integer PCM format tag.
pub const WAVE_FORMAT_PCM: u16 = 0x0001;
/// Extensible format tag; the real codec is given by the sub-format GUID.
pub const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Sample parameters parsed from the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bytes per second as declared by the writer.
    pub byte_rate: u32,
    /// Bytes per frame (all channels).
    pub block_align: u16,
    /// Bits per sample (8, 16, 24 or 32).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Integer PCM format with consistent `byte_rate` and `block_align`.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        let block_align = channels * ((bits_per_sample + 7) / 8);
        Self {
            channels,
            sample_rate,
            byte_rate: sample_rate * block_align as u32,
            block_align,
            bits_per_sample,
        }
    }

    /// Bytes occupied by one sample of one channel.
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample as usize + 7) / 8
    }
}

/// Parse a `fmt ` chunk body.
pub fn parse_fmt(data: &[u8]) -> Result<WavFormat> {
    if data.len() < 16 {
        return Err(WavError::InvalidChunk("fmt chunk shorter than 16 bytes"));
    }

    let u16_at = |i: usize| u16::from_le_bytes([data[i], data[i + 1]]);
    let u32_at = |i: usize| u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);

    let tag = u16_at(0);
    match tag {
        WAVE_FORMAT_PCM => {}
        WAVE_FORMAT_EXTENSIBLE => {
            // cbSize(2) validBits(2) channelMask(4) subFormat GUID(16).
            // The first two GUID bytes carry the underlying format tag.
            if data.len() < 40 {
                return Err(WavError::InvalidChunk("extensible fmt chunk shorter than 40 bytes"));
            }
            let sub = u16_at(24);
            if sub != WAVE_FORMAT_PCM {
                return Err(WavError::UnsupportedFormat(sub));
            }
        }
        other => return Err(WavError::UnsupportedFormat(other)),
    }

    let format = WavFormat {
        channels: u16_at(2),
        sample_rate: u32_at(4),
        byte_rate: u32_at(8),
        block_align: u16_at(12),
        bits_per_sample: u16_at(14),
    };

    if format.channels == 0 {
        return Err(WavError::InvalidChunk("zero channels"));
    }
    if !matches!(format.bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(WavError::InvalidChunk("unsupported bits per sample"));
    }
    if format.block_align as usize != format.channels as usize * format.bytes_per_sample() {
        return Err(WavError::InvalidChunk("block align does not match channels and bit depth"));
    }

    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm_fmt(tag: u16, channels: u16, rate: u32, bits: u16) -> Vec<u8> {
        let align = channels * ((bits + 7) / 8);
        let mut v = Vec::new();
        v.extend_from_slice(&tag.to_le_bytes());
        v.extend_from_slice(&channels.to_le_bytes());
        v.extend_from_slice(&rate.to_le_bytes());
        v.extend_from_slice(&(rate * align as u32).to_le_bytes());
        v.extend_from_slice(&align.to_le_bytes());
        v.extend_from_slice(&bits.to_le_bytes());
        v
    }

    #[test]
    fn parses_stereo_16bit() {
        let fmt = parse_fmt(&pcm_fmt(WAVE_FORMAT_PCM, 2, 44_100, 16)).unwrap();
        assert_eq!(fmt.channels, 2);
        assert_eq!(fmt.sample_rate, 44_100);
        assert_eq!(fmt.block_align, 4);
        assert_eq!(fmt.bytes_per_sample(), 2);
    }

    #[test]
    fn rejects_float() {
        assert_eq!(
            parse_fmt(&pcm_fmt(0x0003, 1, 48_000, 32)),
            Err(WavError::UnsupportedFormat(0x0003))
        );
    }

    #[test]
    fn extensible_pcm_accepted() {
        let mut v = pcm_fmt(WAVE_FORMAT_EXTENSIBLE, 2, 48_000, 24);
        v.extend_from_slice(&22u16.to_le_bytes()); // cbSize
        v.extend_from_slice(&24u16.to_le_bytes()); // valid bits
        v.extend_from_slice(&3u32.to_le_bytes()); // channel mask
        let mut guid = [0u8; 16];
        guid[0] = 0x01;
        v.extend_from_slice(&guid);
        let fmt = parse_fmt(&v).unwrap();
        assert_eq!(fmt.bits_per_sample, 24);
        assert_eq!(fmt.block_align, 6);
    }

    #[test]
    fn bad_block_align_rejected() {
        let mut v = pcm_fmt(WAVE_FORMAT_PCM, 2, 8_000, 16);
        v[12] = 3;
        assert!(matches!(parse_fmt(&v), Err(WavError::InvalidChunk(_))));
    }

    #[test]
    fn short_chunk_rejected() {
        assert!(matches!(parse_fmt(&[1, 0, 1, 0]), Err(WavError::InvalidChunk(_))));
    }
}
