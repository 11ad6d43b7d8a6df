// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Pure-Rust RIFF/WAVE container codec (zero external dependencies).
//!
//! Gives direct access to the raw bytes of the `data` chunk without decoding
//! them into numeric samples. Steganographic embedding works on those bytes
//! directly, so the container layer only needs to locate them and put a
//! same-length replacement back.
//!
//! Supports:
//! - Integer PCM (`WAVE_FORMAT_PCM`) and `WAVE_FORMAT_EXTENSIBLE` with a PCM sub-format
//! - 8, 16, 24 and 32 bits per sample, any channel count
//! - Byte-for-byte preservation of all non-`data` chunks on rewrite
//!
//! Does NOT support:
//! - Floating-point or compressed formats -- rejected at parse time
//! - RF64 / BW64 (files above 4 GiB)

pub mod error;
pub mod chunk;
pub mod format;

use chunk::{find_chunk, iterate_chunks, DATA, FMT};
use error::{Result, WavError};
pub use format::WavFormat;

/// A parsed WAV file providing access to its raw sample bytes.
///
/// Created with [`WavAudio::from_bytes`]. The original file bytes are kept
/// so that [`WavAudio::with_samples`] can produce an output that differs from
/// the input only inside the `data` chunk.
#[derive(Clone)]
pub struct WavAudio {
    bytes: Vec<u8>,
    format: WavFormat,
    data: std::ops::Range<usize>,
}

impl WavAudio {
    /// Parse a WAV file from its bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let entries = iterate_chunks(bytes)?;

        let fmt = find_chunk(&entries, &FMT).ok_or(WavError::MissingFmt)?;
        let data = find_chunk(&entries, &DATA).ok_or(WavError::MissingData)?;
        if fmt.offset > data.offset {
            return Err(WavError::MissingFmt);
        }

        let format = format::parse_fmt(&bytes[fmt.body()])?;

        // A trailing partial frame is legal but unusual; keep it as sample bytes.
        Ok(Self {
            bytes: bytes.to_vec(),
            format,
            data: data.body(),
        })
    }

    /// Sample parameters from the `fmt ` chunk.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Raw interleaved sample bytes of the `data` chunk.
    pub fn samples(&self) -> &[u8] {
        &self.bytes[self.data.clone()]
    }

    /// Number of complete frames (one sample per channel).
    pub fn frame_count(&self) -> usize {
        self.samples().len() / self.format.block_align as usize
    }

    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.format.sample_rate as f64
    }

    /// Produce a new WAV file identical to this one except for its sample bytes.
    ///
    /// `samples` must have exactly the length of [`WavAudio::samples`].
    pub fn with_samples(&self, samples: &[u8]) -> Result<Vec<u8>> {
        if samples.len() != self.data.len() {
            return Err(WavError::SampleLengthMismatch {
                expected: self.data.len(),
                actual: samples.len(),
            });
        }
        let mut out = self.bytes.clone();
        out[self.data.clone()].copy_from_slice(samples);
        Ok(out)
    }
}

/// Write a minimal canonical PCM WAV file (`fmt ` + `data`).
///
/// `samples` must contain whole frames for `format`.
pub fn write_pcm(format: &WavFormat, samples: &[u8]) -> Result<Vec<u8>> {
    let align = format.block_align as usize;
    if align == 0 || samples.len() % align != 0 {
        return Err(WavError::InvalidChunk("sample bytes are not a whole number of frames"));
    }
    let data_len = u32::try_from(samples.len())
        .map_err(|_| WavError::InvalidChunk("sample data exceeds 4 GiB"))?;
    let pad = samples.len() & 1;
    let riff_len = 4 + (8 + 16) + (8 + samples.len() + pad);
    let riff_len = u32::try_from(riff_len)
        .map_err(|_| WavError::InvalidChunk("sample data exceeds 4 GiB"))?;

    let mut out = Vec::with_capacity(8 + riff_len as usize);
    out.extend_from_slice(&chunk::RIFF);
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(&chunk::WAVE);

    out.extend_from_slice(&FMT);
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&format::WAVE_FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());
    out.extend_from_slice(&format.byte_rate.to_le_bytes());
    out.extend_from_slice(&format.block_align.to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    out.extend_from_slice(&DATA);
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(samples);
    if pad == 1 {
        out.push(0);
    }

    Ok(out)
}
