// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Progress reporting and cancellation for hide/extract calls.
//!
//! Progress is delivered synchronously to a caller-supplied [`ProgressSink`]
//! through a per-call [`Reporter`]. There is no global state: two calls on
//! different threads never see each other's progress.
//!
//! Cadence contract:
//! - every pipeline stage reports once when it starts,
//! - the bit loops report every [`PROGRESS_INTERVAL_BITS`] bits and once
//!   more on completion,
//! - reported fractions are clamped to `[0, 1]` and never decrease within
//!   one call,
//! - a successful call always ends with [`Stage::Done`] at `1.0`.
//!
//! Cancellation uses the same cadence: the bit loops poll the
//! [`CancelToken`] each time they report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

use super::error::StegoError;

/// Number of carrier bits processed between two progress reports (and
/// cancellation checks) inside the embed/extract loops.
pub const PROGRESS_INTERVAL_BITS: usize = 20_000;

/// Pipeline stage attached to each progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preparing,
    Compressing,
    Encrypting,
    Framing,
    ReadingCover,
    Embedding,
    Writing,
    ReadingHeader,
    Extracting,
    Decrypting,
    Decompressing,
    Done,
}

impl Stage {
    /// Short human-readable description of the stage.
    pub fn label(self) -> &'static str {
        match self {
            Self::Preparing => "Processing secret data",
            Self::Compressing => "Compressing data",
            Self::Encrypting => "Encrypting data",
            Self::Framing => "Creating header",
            Self::ReadingCover => "Reading cover audio",
            Self::Embedding => "Hiding data in audio (LSB)",
            Self::Writing => "Writing output file",
            Self::ReadingHeader => "Parsing header",
            Self::Extracting => "Extracting data bits",
            Self::Decrypting => "Decrypting data",
            Self::Decompressing => "Decompressing data",
            Self::Done => "Done",
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub stage: Stage,
    /// Overall completion of the call in `[0, 1]`.
    pub fraction: f32,
}

/// Receiver of progress notifications.
///
/// Implemented for any `FnMut(ProgressEvent)` closure and for a bounded
/// [`SyncSender`], which lets a UI thread drain events from a channel while
/// the hide/extract call runs on a worker thread.
pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

impl<F: FnMut(ProgressEvent)> ProgressSink for F {
    fn report(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Non-blocking: events are dropped when the channel is full or closed, so a
/// slow consumer never stalls the bit loops.
impl ProgressSink for SyncSender<ProgressEvent> {
    fn report(&mut self, event: ProgressEvent) {
        let _ = self.try_send(event);
    }
}

/// Shared cancellation flag.
///
/// Clone it, hand one copy to the [`Reporter`] and call [`CancelToken::cancel`]
/// on another (e.g. from a UI thread).
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the running call.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-call progress state: the sink, the optional cancel token and the
/// highest fraction reported so far.
pub struct Reporter<'a> {
    sink: Option<&'a mut dyn ProgressSink>,
    cancel: Option<CancelToken>,
    last: f32,
}

impl<'a> Reporter<'a> {
    /// Report to `sink`.
    pub fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self { sink: Some(sink), cancel: None, last: 0.0 }
    }

    /// Report nowhere. Cancellation can still be attached.
    pub fn silent() -> Self {
        Self { sink: None, cancel: None, last: 0.0 }
    }

    /// Attach a cancellation token polled by the bit loops.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Highest fraction reported so far.
    pub fn last(&self) -> f32 {
        self.last
    }

    /// Report `stage` at overall completion `fraction`.
    pub fn report(&mut self, stage: Stage, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0).max(self.last);
        self.last = fraction;
        log::trace!("{} ({:.0}%)", stage.label(), fraction * 100.0);
        if let Some(sink) = self.sink.as_mut() {
            sink.report(ProgressEvent { stage, fraction });
        }
    }

    /// Report `done` of `total` units of work mapped onto the `[start, end]`
    /// slice of overall progress.
    pub fn report_span(&mut self, stage: Stage, (start, end): (f32, f32), done: usize, total: usize) {
        let ratio = if total == 0 { 1.0 } else { done as f32 / total as f32 };
        self.report(stage, start + (end - start) * ratio);
    }

    /// Return [`StegoError::Cancelled`] if cancellation was requested.
    pub fn check_cancelled(&self) -> Result<(), StegoError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(StegoError::Cancelled),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_are_monotonic_and_clamped() {
        let mut seen = Vec::new();
        let mut sink = |e: ProgressEvent| seen.push(e.fraction);
        {
            let mut r = Reporter::new(&mut sink);
            r.report(Stage::Preparing, 0.3);
            r.report(Stage::Compressing, 0.1);
            r.report(Stage::Done, 1.7);
        }
        assert_eq!(seen, vec![0.3, 0.3, 1.0]);
    }

    #[test]
    fn span_maps_into_range() {
        let mut r = Reporter::silent();
        r.report_span(Stage::Embedding, (0.6, 0.9), 50, 100);
        assert!((r.last() - 0.75).abs() < 1e-6);
        r.report_span(Stage::Embedding, (0.6, 0.9), 0, 0);
        assert!((r.last() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn cancel_token_observed() {
        let token = CancelToken::new();
        let r = Reporter::silent().with_cancel(token.clone());
        assert!(r.check_cancelled().is_ok());
        token.cancel();
        assert!(matches!(r.check_cancelled(), Err(StegoError::Cancelled)));
    }

    #[test]
    fn channel_sink_drops_when_full() {
        let (tx, rx) = std::sync::mpsc::sync_channel::<ProgressEvent>(1);
        let mut tx = tx;
        {
            let mut r = Reporter::new(&mut tx);
            r.report(Stage::Preparing, 0.1);
            r.report(Stage::Done, 1.0); // dropped, channel full
        }
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].stage, Stage::Preparing);
    }
}
