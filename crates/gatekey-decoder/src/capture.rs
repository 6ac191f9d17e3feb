//! Interrupt-driven bit capture and frame assembly.
//!
//! Wiegand has no frame delimiter, so decoding splits into two halves with
//! very different timing constraints:
//!
//! - [`PulseSink::pulse`] runs on every falling edge of either line. It is
//!   the hot path: one lock, three field updates, no allocation, no I/O.
//! - [`PulseCapture::poll_frame`] runs on the host's schedule. When the
//!   buffer has been quiet for longer than the configured bit gap it
//!   freezes the accumulated bits into an immutable [`Frame`] and resets
//!   the buffer, all inside a single lock scope so edge handlers can never
//!   observe (or tear) a half-read buffer.
//!
//! The mutex stands in for the interrupt-disable window an MCU port would
//! use; the snapshot-and-reset in `poll_frame` is the only multi-field
//! read, which keeps the added latency on the line bounded by a handful of
//! loads and stores.

use crate::frame::Frame;
use gatekey_core::Line;
use gatekey_core::constants::MAX_FRAME_BITS;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::trace;

/// Accumulates bits from the two data lines into one value.
#[derive(Debug)]
struct BitBuffer {
    /// Captured bits, MSB first. A `u32` on purpose: shifting the 33rd
    /// bit of a W34 frame discards the leading parity bit exactly like
    /// the 32-bit registers of the original readers.
    value: u32,

    /// Number of falling edges seen this transmission (may exceed
    /// [`MAX_FRAME_BITS`] on a noisy line; such frames classify as None).
    bit_count: u8,

    /// Tick of the most recent falling edge.
    last_edge: Instant,
}

impl BitBuffer {
    fn new() -> Self {
        Self {
            value: 0,
            bit_count: 0,
            last_edge: Instant::now(),
        }
    }

    fn clear(&mut self) {
        self.value = 0;
        self.bit_count = 0;
        self.last_edge = Instant::now();
    }

    fn write_bit(&mut self, bit: u8) {
        self.last_edge = Instant::now();
        self.bit_count = self.bit_count.saturating_add(1);

        if self.bit_count >= MAX_FRAME_BITS {
            // Trailing W34 parity bit (and anything after) is not shifted in.
            return;
        }

        self.value = (self.value << 1) | u32::from(bit & 0x01);
    }
}

/// Cloneable entry point for falling-edge handlers.
///
/// One sink serves both lines; the line identifies the bit value. Safe to
/// call from any thread. Never blocks beyond the capture buffer's short
/// critical section, never allocates, never performs I/O.
#[derive(Debug, Clone)]
pub struct PulseSink {
    shared: Arc<Mutex<BitBuffer>>,
}

impl PulseSink {
    /// Record one falling edge on `line`.
    pub fn pulse(&self, line: Line) {
        let mut buf = self
            .shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        buf.write_bit(line.bit_value());
    }
}

/// Owns the capture buffer and performs idle-gap frame assembly.
///
/// # Examples
///
/// ```
/// use gatekey_decoder::capture::PulseCapture;
/// use gatekey_core::Line;
/// use std::time::Duration;
///
/// let capture = PulseCapture::new(Duration::from_millis(50));
/// let sink = capture.sink();
///
/// // Keypad digit 5 as a 4-bit frame: 0101, MSB first.
/// sink.pulse(Line::D0);
/// sink.pulse(Line::D1);
/// sink.pulse(Line::D0);
/// sink.pulse(Line::D1);
///
/// assert!(capture.poll_frame().is_none()); // line not yet quiet
/// std::thread::sleep(Duration::from_millis(60));
///
/// let frame = capture.poll_frame().unwrap();
/// assert_eq!(frame.bit_count(), 4);
/// assert_eq!(frame.value(), 0b0101);
/// ```
#[derive(Debug)]
pub struct PulseCapture {
    shared: Arc<Mutex<BitBuffer>>,
    bit_gap: Duration,
}

impl PulseCapture {
    /// Create a capture with the given idle-gap threshold.
    ///
    /// The gap must exceed the longest legal inter-bit spacing of a real
    /// transmission; see [`BIT_GAP_MS`](gatekey_core::constants::BIT_GAP_MS)
    /// for the production default.
    #[must_use]
    pub fn new(bit_gap: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(BitBuffer::new())),
            bit_gap,
        }
    }

    /// Get a sink for edge handlers. May be cloned freely; all clones feed
    /// the same buffer.
    #[must_use]
    pub fn sink(&self) -> PulseSink {
        PulseSink {
            shared: Arc::clone(&self.shared),
        }
    }

    /// The configured idle-gap threshold.
    #[must_use]
    pub fn bit_gap(&self) -> Duration {
        self.bit_gap
    }

    /// Check whether a transmission has completed.
    ///
    /// Returns `Some(frame)` once at least one bit has been captured and
    /// the line has been quiet for longer than the bit gap; the buffer is
    /// reset for the next transmission before the lock is released.
    /// Returns `None` otherwise without disturbing capture state.
    pub fn poll_frame(&self) -> Option<Frame> {
        let mut buf = self
            .shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if buf.bit_count == 0 {
            return None;
        }
        if buf.last_edge.elapsed() <= self.bit_gap {
            return None;
        }

        let frame = Frame::new(buf.value, buf.bit_count);
        buf.clear();

        trace!("frame frozen: {}", frame);
        Some(frame)
    }
}
