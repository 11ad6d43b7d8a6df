// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! RIFF chunk iteration.
//!
//! Walks the chunks of a RIFF/WAVE byte stream and records where each chunk
//! body lives in the original buffer. Chunk bodies are not copied, so the
//! caller can rewrite a single chunk in place and keep every other byte.

use super::error::{Result, WavError};

pub const RIFF: [u8; 4] = *b"RIFF";
pub const WAVE: [u8; 4] = *b"WAVE";
pub const FMT: [u8; 4] = *b"fmt ";
pub const DATA: [u8; 4] = *b"data";

/// Size of the `RIFF <size> WAVE` preamble.
pub const RIFF_HEADER_LEN: usize = 12;

/// A chunk located within the original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Four-character chunk identifier.
    pub id: [u8; 4],
    /// Byte offset of the chunk body (after the 8-byte chunk header).
    pub offset: usize,
    /// Body length in bytes, excluding the pad byte of odd-sized chunks.
    pub len: usize,
}

impl ChunkEntry {
    /// Byte range of the chunk body in the original buffer.
    pub fn body(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Validate the RIFF/WAVE preamble and list every top-level chunk.
///
/// Declared sizes are not trusted: streaming writers leave the RIFF size
/// and the size of the final chunk at zero or `0xFFFFFFFF`. Iteration runs to
/// the end of the buffer, and a chunk that claims to run past it is cut
/// at the end of the buffer and ends the iteration.
pub fn iterate_chunks(data: &[u8]) -> Result<Vec<ChunkEntry>> {
    if data.len() < RIFF_HEADER_LEN {
        return Err(WavError::UnexpectedEof);
    }
    if data[0..4] != RIFF {
        return Err(WavError::NotRiff);
    }
    if data[8..12] != WAVE {
        return Err(WavError::NotWave);
    }

    let mut entries = Vec::new();
    let mut pos = RIFF_HEADER_LEN;

    while pos + 8 <= data.len() {
        let id = [data[pos], data[pos + 1], data[pos + 2], data[pos + 3]];
        let declared = u32::from_le_bytes([data[pos + 4], data[pos + 5], data[pos + 6], data[pos + 7]]) as usize;
        let offset = pos + 8;
        let available = data.len() - offset;

        if declared > available {
            entries.push(ChunkEntry { id, offset, len: available });
            break;
        }

        entries.push(ChunkEntry { id, offset, len: declared });

        // Odd-sized chunks carry one pad byte, which may be missing at EOF.
        pos = offset + declared + (declared & 1);
    }

    Ok(entries)
}

/// Find the first chunk with the given identifier.
pub fn find_chunk<'a>(entries: &'a [ChunkEntry], id: &[u8; 4]) -> Option<&'a ChunkEntry> {
    entries.iter().find(|e| &e.id == id)
}
