//! Workspace-wide constants for the Wiegand decoder and code store.
//!
//! The Wiegand line protocol has no explicit frame delimiter: a frame ends
//! when the line has been quiet for longer than the inter-bit gap a reader
//! is allowed to produce. That makes the idle-gap threshold the protocol's
//! only framing primitive, so it lives here next to the frame geometry it
//! governs.

// ============================================================================
// Frame timing
// ============================================================================

/// Idle gap, in milliseconds, after which a transmission is considered
/// complete.
///
/// Must exceed the maximum legal inter-bit spacing of a real reader (a few
/// milliseconds) and stay well under the minimum interval between two
/// presentations a human can produce. 25 ms matches the original hardware
/// deployments this decoder was validated against.
pub const BIT_GAP_MS: u64 = 25;

// ============================================================================
// Frame geometry
// ============================================================================

/// Maximum number of bits a frame can carry.
///
/// The capture buffer stops shifting once this count is reached: the 34th
/// bit of a W34 frame is the trailing parity bit and is deliberately never
/// shifted in.
pub const MAX_FRAME_BITS: u8 = 34;

/// 4-bit keypad frame (single digit, no integrity check).
pub const FRAME_BITS_KEY4: u8 = 4;

/// 8-bit keypad frame (digit in the low nibble, complement in the high).
pub const FRAME_BITS_KEY8: u8 = 8;

/// 26-bit tag frame (leading + trailing parity around 24 data bits).
pub const FRAME_BITS_TAG26: u8 = 26;

/// 34-bit tag frame (leading + trailing parity around 32 data bits).
pub const FRAME_BITS_TAG34: u8 = 34;

/// Mask selecting the 24 data bits of a W26 frame after the trailing
/// parity bit has been shifted out.
pub const TAG26_CODE_MASK: u32 = 0x00FF_FFFF;

// ============================================================================
// Keypad control digits
// ============================================================================

/// Keypad digit transmitted for the clear/cancel key (`*` on most pads).
pub const DIGIT_CLEAR: u8 = 10;

/// Keypad digit transmitted for the confirm/enter key (`#` on most pads).
pub const DIGIT_CONFIRM: u8 = 11;

/// Modulus bounding an accumulated PIN to six decimal digits.
///
/// Accumulation is lossy on purpose: a seventh digit silently drops the
/// leading one. Callers that need longer PINs need a different keypad
/// profile, not a bigger modulus.
pub const PIN_MODULUS: u32 = 1_000_000;

/// Number of decimal digits a PIN can hold.
pub const PIN_MAX_DIGITS: u32 = 6;

// ============================================================================
// Code store geometry
// ============================================================================

/// Default number of slots in the persistent code store.
///
/// Sized for small EEPROM-class media (8 bytes per slot); hosts with more
/// room pass a larger capacity at store construction.
pub const DEFAULT_STORE_CAPACITY: usize = 10;

/// Size of one persisted slot in bytes: two little-endian `u32`s
/// (tag, then key).
pub const SLOT_SIZE: usize = 8;

/// Persisted tag value marking an empty slot.
pub const EMPTY_TAG_SENTINEL: u32 = 0x0000_0000;

/// Tag value read from erased (never written) EEPROM-class media; treated
/// as empty on load.
pub const ERASED_TAG_SENTINEL: u32 = 0xFFFF_FFFF;
