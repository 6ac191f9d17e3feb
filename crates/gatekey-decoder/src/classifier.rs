//! Frame classification and parity stripping.
//!
//! Validation rules for the four supported layouts, tried in fixed order:
//!
//! | Bits | Check | Code | Kind |
//! |------|-------|------|------|
//! | 4  | none | low 4 bits | Key |
//! | 8  | low nibble == complement of high nibble | low nibble | Key |
//! | 26 | none (parity stripped, not verified) | bits \[24..1\] | Tag |
//! | 34 | none (parity dropped at capture) | buffer value | Tag |
//!
//! Anything else is a classification miss. There are no retries: an
//! invalid frame is discarded and the decoder waits for the next
//! transmission.

use crate::frame::{DecodedCode, Frame};
use gatekey_core::CodeKind;
use gatekey_core::constants::{
    FRAME_BITS_KEY4, FRAME_BITS_KEY8, FRAME_BITS_TAG26, FRAME_BITS_TAG34, TAG26_CODE_MASK,
};
use tracing::warn;

/// Classify a frozen frame.
///
/// Pure given its input; performs no I/O. Malformed frames yield
/// [`CodeKind::None`] rather than an error, matching the protocol's
/// discard-and-wait recovery policy.
///
/// # Examples
///
/// ```
/// use gatekey_decoder::classifier::classify;
/// use gatekey_decoder::frame::Frame;
/// use gatekey_core::CodeKind;
///
/// // 8-bit keypad frame: digit 5 with its complement in the high nibble.
/// let decoded = classify(Frame::new(0xA5, 8));
/// assert_eq!(decoded.kind, CodeKind::Key);
/// assert_eq!(decoded.code, 5);
/// ```
#[must_use]
pub fn classify(frame: Frame) -> DecodedCode {
    let value = frame.value();
    match frame.bit_count() {
        // Single keypad digit, no integrity check.
        FRAME_BITS_KEY4 => DecodedCode {
            code: value & 0x0F,
            kind: CodeKind::Key,
            bit_count: FRAME_BITS_KEY4,
        },

        FRAME_BITS_KEY8 => {
            let lo = value & 0x0F;
            let hi = (value >> 4) & 0x0F;
            if lo == (!hi & 0x0F) {
                DecodedCode {
                    code: lo,
                    kind: CodeKind::Key,
                    bit_count: FRAME_BITS_KEY8,
                }
            } else {
                warn!("8-bit frame failed nibble check: {value:#04X}");
                DecodedCode::none(FRAME_BITS_KEY8)
            }
        }

        // Drop the trailing parity bit, mask off the leading one.
        FRAME_BITS_TAG26 => DecodedCode {
            code: (value >> 1) & TAG26_CODE_MASK,
            kind: CodeKind::Tag,
            bit_count: FRAME_BITS_TAG26,
        },

        // Both parity bits were already excluded during capture.
        FRAME_BITS_TAG34 => DecodedCode {
            code: value,
            kind: CodeKind::Tag,
            bit_count: FRAME_BITS_TAG34,
        },

        other => {
            warn!("unsupported frame width discarded: {other} bits");
            DecodedCode::none(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x0, 0)]
    #[case(0x5, 5)]
    #[case(0xB, 11)]
    #[case(0xF, 15)]
    fn test_key4(#[case] value: u32, #[case] expected: u32) {
        let decoded = classify(Frame::new(value, 4));
        assert_eq!(decoded.kind, CodeKind::Key);
        assert_eq!(decoded.code, expected);
    }

    #[rstest]
    #[case(0xF0, 0)]
    #[case(0xA5, 5)]
    #[case(0x4B, 11)]
    #[case(0x0F, 15)]
    fn test_key8_valid(#[case] value: u32, #[case] expected: u32) {
        let decoded = classify(Frame::new(value, 8));
        assert_eq!(decoded.kind, CodeKind::Key);
        assert_eq!(decoded.code, expected);
    }

    #[rstest]
    #[case(0x55)]
    #[case(0x00)]
    #[case(0xFF)]
    #[case(0xA6)]
    fn test_key8_nibble_mismatch(#[case] value: u32) {
        let decoded = classify(Frame::new(value, 8));
        assert_eq!(decoded.kind, CodeKind::None);
    }

    #[test]
    fn test_tag26_strips_parity() {
        // Raw W26 value: leading parity 1, 24 data bits, trailing parity 0.
        let data = 0x00B5_E771u32;
        let raw = (1 << 25) | (data << 1);
        let decoded = classify(Frame::new(raw, 26));
        assert_eq!(decoded.kind, CodeKind::Tag);
        assert_eq!(decoded.code, data);
    }

    #[test]
    fn test_tag26_formula() {
        let raw = 0x2AA_AAAAu32;
        let decoded = classify(Frame::new(raw, 26));
        assert_eq!(decoded.code, (raw >> 1) & 0x00FF_FFFF);
    }

    #[test]
    fn test_tag34_passthrough() {
        let decoded = classify(Frame::new(0xDEAD_BEEF, 34));
        assert_eq!(decoded.kind, CodeKind::Tag);
        assert_eq!(decoded.code, 0xDEAD_BEEF);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    #[case(7)]
    #[case(9)]
    #[case(25)]
    #[case(27)]
    #[case(33)]
    #[case(35)]
    #[case(40)]
    #[case(255)]
    fn test_unsupported_widths(#[case] bits: u8) {
        let decoded = classify(Frame::new(0x12345, bits));
        assert_eq!(decoded.kind, CodeKind::None);
        assert_eq!(decoded.bit_count, bits);
    }
}
