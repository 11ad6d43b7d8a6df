// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB bit embedding.
//!
//! Each carrier byte stores one bit in its least significant bit. Data bytes
//! are written MSB first, so bit `i` of the stream lands in `cover[i]`.

use crate::stego::error::StegoError;
use crate::stego::progress::{Reporter, Stage, PROGRESS_INTERVAL_BITS};

/// Write `data` into the LSBs of `cover`, in place.
///
/// The capacity check happens before the first write: on
/// [`StegoError::CapacityExceeded`] the cover is untouched. Progress is
/// reported on `span` at the start, every [`PROGRESS_INTERVAL_BITS`] bits and
/// at the end; cancellation is polled at the same points.
///
/// A cancelled embed leaves the cover partially written. Callers embed into
/// a copy.
pub fn embed(
    cover: &mut [u8],
    data: &[u8],
    reporter: &mut Reporter<'_>,
    span: (f32, f32),
) -> Result<(), StegoError> {
    let available = cover.len();
    let required = data
        .len()
        .checked_mul(8)
        .ok_or(StegoError::CapacityExceeded { required: usize::MAX, available })?;
    if required > available {
        return Err(StegoError::CapacityExceeded { required, available });
    }

    reporter.check_cancelled()?;
    reporter.report_span(Stage::Embedding, span, 0, required);

    for (i, cell) in cover[..required].iter_mut().enumerate() {
        if i > 0 && i % PROGRESS_INTERVAL_BITS == 0 {
            reporter.check_cancelled()?;
            reporter.report_span(Stage::Embedding, span, i, required);
        }
        let bit = (data[i / 8] >> (7 - i % 8)) & 1;
        *cell = (*cell & 0xFE) | bit;
    }

    reporter.report_span(Stage::Embedding, span, required, required);
    log::debug!("embedded {required} bits into {available} cells");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::progress::{CancelToken, ProgressEvent};

    #[test]
    fn msb_first_into_lsb() {
        let mut cover = vec![0xF0u8; 16];
        embed(&mut cover, &[0b1010_0001, 0xFF], &mut Reporter::silent(), (0.0, 1.0)).unwrap();
        let lsbs: Vec<u8> = cover.iter().map(|c| c & 1).collect();
        assert_eq!(lsbs, vec![1, 0, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
        // Upper seven bits never change.
        assert!(cover.iter().all(|c| c & 0xFE == 0xF0));
    }

    #[test]
    fn cells_past_payload_untouched() {
        let mut cover: Vec<u8> = (0..24).map(|i| i as u8 * 7).collect();
        let before = cover.clone();
        embed(&mut cover, &[0x00], &mut Reporter::silent(), (0.0, 1.0)).unwrap();
        assert_eq!(&cover[8..], &before[8..]);
    }

    #[test]
    fn capacity_exceeded_leaves_cover_unmodified() {
        let mut cover = vec![0x55u8; 15];
        let before = cover.clone();
        let err = embed(&mut cover, &[0xAA, 0xAA], &mut Reporter::silent(), (0.0, 1.0)).unwrap_err();
        assert!(matches!(err, StegoError::CapacityExceeded { required: 16, available: 15 }));
        assert_eq!(cover, before);
    }

    #[test]
    fn exact_fit() {
        let mut cover = vec![0u8; 8];
        embed(&mut cover, &[0xFF], &mut Reporter::silent(), (0.0, 1.0)).unwrap();
        assert_eq!(cover, vec![1u8; 8]);
    }

    #[test]
    fn progress_cadence() {
        let data = vec![0x3Cu8; PROGRESS_INTERVAL_BITS / 8 * 3 + 5];
        let mut cover = vec![0u8; data.len() * 8];
        let mut events = Vec::new();
        let mut sink = |e: ProgressEvent| events.push(e);
        embed(&mut cover, &data, &mut Reporter::new(&mut sink), (0.6, 0.9)).unwrap();
        // start + 3 intervals + end
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| e.stage == Stage::Embedding));
        assert!(events.windows(2).all(|w| w[0].fraction <= w[1].fraction));
        assert!((events[0].fraction - 0.6).abs() < 1e-6);
        assert!((events[4].fraction - 0.9).abs() < 1e-6);
    }

    #[test]
    fn cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let mut cover = vec![0u8; 64];
        let mut r = Reporter::silent().with_cancel(token);
        assert!(matches!(embed(&mut cover, &[1, 2], &mut r, (0.0, 1.0)), Err(StegoError::Cancelled)));
        assert!(cover.iter().all(|&c| c == 0));
    }
}
