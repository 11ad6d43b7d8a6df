// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! WAV-level entry points.
//!
//! These wrap the sample-level pipeline with the container codec: the
//! carrier is the raw `data` chunk bytes, and everything outside that chunk
//! is copied through untouched. The file variants read the whole input into
//! memory and write the output only once hiding has fully succeeded.

use std::path::Path;

use crate::stego::capacity::Capacity;
use crate::stego::error::StegoError;
use crate::stego::pipeline::{self, Extracted, HideOptions};
use crate::stego::progress::{Reporter, Stage};
use crate::wav::WavAudio;

/// Hide `secret` in an in-memory WAV file and return the stego WAV file.
///
/// # Errors
/// [`StegoError::InvalidWav`] if `cover_wav` is not a supported PCM WAV,
/// plus everything [`pipeline::hide`] can return.
pub fn hide_wav(
    cover_wav: &[u8],
    secret: &[u8],
    filename: &str,
    options: &HideOptions,
    reporter: &mut Reporter<'_>,
) -> Result<Vec<u8>, StegoError> {
    let out = hide_wav_inner(cover_wav, secret, filename, options, reporter)?;
    reporter.report(Stage::Done, 1.0);
    Ok(out)
}

/// Extract a secret from an in-memory stego WAV file.
pub fn extract_wav(
    stego_wav: &[u8],
    password: Option<&str>,
    reporter: &mut Reporter<'_>,
) -> Result<Extracted, StegoError> {
    let audio = WavAudio::from_bytes(stego_wav)?;
    let extracted = pipeline::extract_samples(audio.samples(), password, reporter)?;
    reporter.report(Stage::Done, 1.0);
    Ok(extracted)
}

/// Read `cover_path`, hide `secret` in it and write the result to `output_path`.
///
/// Nothing is written unless hiding succeeds.
pub fn hide_file(
    cover_path: &Path,
    secret: &[u8],
    filename: &str,
    output_path: &Path,
    options: &HideOptions,
    reporter: &mut Reporter<'_>,
) -> Result<(), StegoError> {
    reporter.report(Stage::ReadingCover, 0.05);
    let cover = std::fs::read(cover_path)?;
    log::debug!("read cover {} ({} bytes)", cover_path.display(), cover.len());

    let out = hide_wav_inner(&cover, secret, filename, options, reporter)?;

    reporter.report(Stage::Writing, 0.95);
    std::fs::write(output_path, &out)?;
    log::debug!("wrote {} ({} bytes)", output_path.display(), out.len());

    reporter.report(Stage::Done, 1.0);
    Ok(())
}

/// Read a stego WAV file from disk and extract its secret.
pub fn extract_file(
    stego_path: &Path,
    password: Option<&str>,
    reporter: &mut Reporter<'_>,
) -> Result<Extracted, StegoError> {
    reporter.report(Stage::ReadingCover, 0.1);
    let bytes = std::fs::read(stego_path)?;
    extract_wav(&bytes, password, reporter)
}

/// Capacity of a cover WAV file: one bit per sample byte.
pub fn wav_capacity(cover_wav: &[u8]) -> Result<Capacity, StegoError> {
    let audio = WavAudio::from_bytes(cover_wav)?;
    Ok(Capacity::for_cells(audio.samples().len()))
}

fn hide_wav_inner(
    cover_wav: &[u8],
    secret: &[u8],
    filename: &str,
    options: &HideOptions,
    reporter: &mut Reporter<'_>,
) -> Result<Vec<u8>, StegoError> {
    let audio = WavAudio::from_bytes(cover_wav)?;
    let format = audio.format();
    log::debug!(
        "cover: {} ch, {} Hz, {} bit, {:.1}s, {} sample bytes",
        format.channels,
        format.sample_rate,
        format.bits_per_sample,
        audio.duration_secs(),
        audio.samples().len()
    );

    let stego = pipeline::hide_samples(audio.samples(), secret, filename, options, reporter)?;
    Ok(audio.with_samples(&stego)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::header::HEADER_BITS;
    use crate::wav::{write_pcm, WavFormat};

    fn cover_wav(sample_bytes: usize) -> Vec<u8> {
        let samples: Vec<u8> = (0..sample_bytes).map(|i| (i * 37 % 256) as u8).collect();
        write_pcm(&WavFormat::pcm(1, 8000, 8), &samples).unwrap()
    }

    #[test]
    fn wav_roundtrip_preserves_container() {
        let cover = cover_wav(HEADER_BITS + 8 * 64);
        let stego = hide_wav(&cover, b"in a wav", "w.txt", &HideOptions::default(), &mut Reporter::silent()).unwrap();
        assert_eq!(stego.len(), cover.len());
        // RIFF header and fmt chunk are byte-identical.
        assert_eq!(&stego[..44], &cover[..44]);

        let out = extract_wav(&stego, None, &mut Reporter::silent()).unwrap();
        assert_eq!(out.data, b"in a wav");
        assert_eq!(out.filename, "w.txt");
    }

    #[test]
    fn not_a_wav() {
        let err = hide_wav(b"definitely not riff", b"x", "x", &HideOptions::default(), &mut Reporter::silent()).unwrap_err();
        assert!(matches!(err, StegoError::InvalidWav(_)));
    }

    #[test]
    fn capacity_of_wav() {
        let cap = wav_capacity(&cover_wav(HEADER_BITS + 8 * 10)).unwrap();
        assert_eq!(cap.carrier_bits, HEADER_BITS + 80);
        assert_eq!(cap.max_payload_bytes, 10);
    }
}
