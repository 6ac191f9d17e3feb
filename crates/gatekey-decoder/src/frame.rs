//! Frozen frame snapshots and decoded codes.

use gatekey_core::CodeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable snapshot of one completed transmission.
///
/// Produced once per idle-gap expiry by
/// [`PulseCapture::poll_frame`](crate::capture::PulseCapture::poll_frame)
/// and consumed exactly once by
/// [`classify`](crate::classifier::classify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    value: u32,
    bit_count: u8,
}

impl Frame {
    /// Create a frame snapshot.
    #[must_use]
    pub fn new(value: u32, bit_count: u8) -> Self {
        Self { value, bit_count }
    }

    /// Captured bits, MSB first.
    #[inline]
    #[must_use]
    pub fn value(self) -> u32 {
        self.value
    }

    /// Number of falling edges the transmission produced.
    #[inline]
    #[must_use]
    pub fn bit_count(self) -> u8 {
        self.bit_count
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bits: {:#010X}", self.bit_count, self.value)
    }
}

/// Result of classifying a frame.
///
/// Overwritten on every successful classification; the device keeps the
/// last one as its "last code" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCode {
    /// Decoded code with parity stripped. A single digit for Key frames,
    /// the full tag code for Tag frames, `0` for None.
    pub code: u32,

    /// Classification the frame matched.
    pub kind: CodeKind,

    /// Bit count of the source frame.
    pub bit_count: u8,
}

impl DecodedCode {
    /// A classification miss for a frame of the given width.
    #[must_use]
    pub fn none(bit_count: u8) -> Self {
        Self {
            code: 0,
            kind: CodeKind::None,
            bit_count,
        }
    }

    /// Returns `true` if the frame matched a supported layout.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kind != CodeKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new(0xA5, 8);
        assert_eq!(frame.value(), 0xA5);
        assert_eq!(frame.bit_count(), 8);
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::new(0xA5, 8);
        assert_eq!(frame.to_string(), "8 bits: 0x000000A5");
    }

    #[test]
    fn test_decoded_none() {
        let decoded = DecodedCode::none(13);
        assert!(!decoded.is_valid());
        assert_eq!(decoded.kind, CodeKind::None);
        assert_eq!(decoded.bit_count, 13);
    }

    #[test]
    fn test_decoded_serialization() {
        let decoded = DecodedCode {
            code: 123,
            kind: CodeKind::Key,
            bit_count: 4,
        };
        let json = serde_json::to_string(&decoded).unwrap();
        let back: DecodedCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decoded);
    }
}
