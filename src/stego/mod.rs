// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB steganography over PCM sample bytes.
//!
//! The embedded stream is a 260-byte [`header`] in the clear followed by the
//! payload. The payload is the secret after the optional [`transform`] chain
//! (Brotli compression, then Argon2id + AES-256-GCM-SIV encryption). Every
//! bit of the stream goes into the least significant bit of one carrier byte.
//!
//! - [`hide`] / [`extract`] work on raw sample bytes.
//! - [`hide_wav`] / [`extract_wav`] work on in-memory WAV files.
//! - [`hide_file`] / [`extract_file`] read and write WAV files on disk.

pub mod error;
pub mod progress;
pub mod header;
pub mod transform;
pub mod crypto;
pub mod compress;
pub mod capacity;
pub mod embed;
pub mod extract;
mod pipeline;
mod container;

pub use error::StegoError;
pub use capacity::Capacity;
pub use header::{Header, HEADER_BITS, HEADER_LEN};
pub use pipeline::{extract, hide, Extracted, HideOptions};
pub use container::{extract_file, extract_wav, hide_file, hide_wav, wav_capacity};
pub use transform::{Transform, TransformChain};
