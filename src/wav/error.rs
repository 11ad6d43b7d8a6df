// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for WAV parsing and rewriting.

use thiserror::Error;

/// Errors that can occur while reading or rewriting a RIFF/WAVE file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WavError {
    /// Input data is too short to hold the RIFF/WAVE preamble.
    #[error("unexpected end of WAV data")]
    UnexpectedEof,
    /// Missing `RIFF` tag at the start of the data.
    #[error("missing RIFF tag (not a WAV file)")]
    NotRiff,
    /// The RIFF form type is not `WAVE`.
    #[error("RIFF form type is not WAVE")]
    NotWave,
    /// No `fmt ` chunk precedes the sample data.
    #[error("missing fmt chunk")]
    MissingFmt,
    /// No `data` chunk was found.
    #[error("missing data chunk")]
    MissingData,
    /// Only integer PCM is supported (tag 1, or extensible with a PCM sub-format).
    #[error("unsupported WAV format tag: 0x{0:04X}")]
    UnsupportedFormat(u16),
    /// A chunk has invalid or inconsistent length/content.
    #[error("invalid chunk: {0}")]
    InvalidChunk(&'static str),
    /// Replacement samples must have exactly the original length.
    #[error("sample length mismatch: expected {expected} bytes, got {actual}")]
    SampleLengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, WavError>;
