// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB bit extraction.
//!
//! The header occupies the first [`HEADER_BITS`] cells. The payload length is
//! not recorded anywhere, so [`extract_payload`] reads every remaining cell
//! to the end of the carrier. Whatever follows the real payload is cover
//! noise; the transform chain and the final truncation to the declared
//! original size discard it.

use crate::stego::error::StegoError;
use crate::stego::header::{self, Header, HEADER_BITS};
use crate::stego::progress::{Reporter, Stage, PROGRESS_INTERVAL_BITS};

/// Decode the header from the LSBs of the first 2080 cells.
///
/// # Errors
/// Same as [`header::decode`]; [`StegoError::HeaderTooShort`] if the carrier
/// has fewer than 2080 cells.
pub fn extract_header(stego: &[u8]) -> Result<Header, StegoError> {
    let n = stego.len().min(HEADER_BITS);
    let bits: Vec<u8> = stego[..n].iter().map(|c| c & 1).collect();
    header::decode(&bits)
}

/// Read the LSBs of every cell after the header and pack them MSB first.
///
/// A trailing group of fewer than 8 cells is dropped. Returns an empty vector
/// if the carrier ends at (or before) the header.
pub fn extract_payload(
    stego: &[u8],
    reporter: &mut Reporter<'_>,
    span: (f32, f32),
) -> Result<Vec<u8>, StegoError> {
    let cells = stego.get(HEADER_BITS..).unwrap_or(&[]);
    let total = cells.len() / 8 * 8;

    reporter.check_cancelled()?;
    reporter.report_span(Stage::Extracting, span, 0, total);

    let mut out = Vec::with_capacity(total / 8);
    for (n, chunk) in cells.chunks_exact(8).enumerate() {
        let done = n * 8;
        if done > 0 && done % PROGRESS_INTERVAL_BITS == 0 {
            reporter.check_cancelled()?;
            reporter.report_span(Stage::Extracting, span, done, total);
        }
        out.push(chunk.iter().fold(0u8, |byte, &c| (byte << 1) | (c & 1)));
    }

    reporter.report_span(Stage::Extracting, span, total, total);
    log::debug!("read {} candidate payload bytes from {} cells", out.len(), cells.len());
    Ok(out)
}
