// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # wavhide
//!
//! Hides a file, together with its name, in the least significant bits of
//! the samples of a PCM WAV file, and recovers it exactly. The payload can
//! be Brotli-compressed and password-encrypted (Argon2id key derivation,
//! AES-256-GCM-SIV) before it is embedded.
//!
//! The WAV container codec (`wav` module) is zero-dependency (std only).
//! The steganography layer (`stego` module) carries the header format, the
//! bit embedder/extractor and the transform pipeline.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use wavhide::{extract_wav, hide_wav, HideOptions, Reporter};
//!
//! let cover = std::fs::read("cover.wav").unwrap();
//! let options = HideOptions::new().with_compression(true).with_password("passphrase");
//! let stego = hide_wav(&cover, b"secret", "note.txt", &options, &mut Reporter::silent()).unwrap();
//! let out = extract_wav(&stego, Some("passphrase"), &mut Reporter::silent()).unwrap();
//! assert_eq!(out.data, b"secret");
//! assert_eq!(out.filename, "note.txt");
//! ```

pub mod stego;
pub mod wav;

pub use wav::error::{Result as WavResult, WavError};
pub use wav::{WavAudio, WavFormat};
pub use stego::{extract, hide, Extracted, HideOptions, StegoError};
pub use stego::{extract_file, extract_wav, hide_file, hide_wav, wav_capacity, Capacity};
pub use stego::progress::{CancelToken, ProgressEvent, ProgressSink, Reporter, Stage};
pub use stego::progress;
