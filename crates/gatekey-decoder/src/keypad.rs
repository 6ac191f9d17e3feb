//! Multi-digit PIN accumulation over successive keypad frames.
//!
//! # States
//!
//! The accumulator manages two states:
//! - `Empty`: no digits entered
//! - `Accumulating`: a partial PIN is pending
//!
//! # Transitions
//!
//! - Digit 0-9: `pending = (pending * 10 + digit) mod 1_000_000`, stay in
//!   `Accumulating`
//! - Digit 10 (clear): discard pending, return to `Empty`
//! - Digit 11 (confirm): emit pending as the confirmed key code, return to
//!   `Empty`
//! - Anything else (foreign frame, unknown digit): discard pending via
//!   [`KeyAccumulator::abandon`]
//!
//! # Interruption policy
//!
//! Any frame that is not a keypad digit abandons a partially entered PIN:
//! an interleaved tag scan or a malformed transmission resets the
//! accumulator to `Empty`. Callers expecting PIN entry to survive
//! interruption must buffer digits themselves; this component will not.
//!
//! The six-digit modulo is lossy by design: a seventh digit silently drops
//! the leading one and no error is raised.

use gatekey_core::constants::{DIGIT_CLEAR, DIGIT_CONFIRM, PIN_MODULUS};
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinState {
    Empty,
    Accumulating(u32),
}

/// Folds successive keypad digits into a multi-digit PIN.
///
/// # Examples
///
/// ```
/// use gatekey_decoder::keypad::KeyAccumulator;
///
/// let mut pin = KeyAccumulator::new();
/// assert_eq!(pin.push(1), None);
/// assert_eq!(pin.push(2), None);
/// assert_eq!(pin.push(3), None);
/// assert_eq!(pin.push(11), Some(123)); // confirm
/// assert!(pin.pending().is_none());
/// ```
#[derive(Debug)]
pub struct KeyAccumulator {
    state: PinState,
}

impl KeyAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PinState::Empty,
        }
    }

    /// Feed one decoded keypad digit.
    ///
    /// Returns `Some(code)` when the confirm digit completes an entry;
    /// `None` while digits are still pending. A confirm with nothing
    /// pending emits `0`, mirroring the keypads this was built against.
    pub fn push(&mut self, digit: u8) -> Option<u32> {
        match digit {
            0..=9 => {
                let pending = self.pending_value();
                let next = (pending * 10 + u32::from(digit)) % PIN_MODULUS;
                self.state = PinState::Accumulating(next);
                trace!("digit {digit} accumulated, pending {next}");
                None
            }
            DIGIT_CLEAR => {
                trace!("pin entry cleared");
                self.state = PinState::Empty;
                None
            }
            DIGIT_CONFIRM => {
                let code = self.pending_value();
                self.state = PinState::Empty;
                trace!("pin entry confirmed: {code}");
                Some(code)
            }
            other => {
                // 12-15 are representable in a keypad frame but map to no
                // key on the supported pads; treat them like clear.
                warn!("unknown keypad digit {other}, abandoning entry");
                self.state = PinState::Empty;
                None
            }
        }
    }

    /// Abandon a partial entry (foreign or malformed frame seen).
    pub fn abandon(&mut self) {
        if let PinState::Accumulating(pending) = self.state {
            trace!("pin entry abandoned, {pending} pending");
        }
        self.state = PinState::Empty;
    }

    /// The partial PIN entered so far, if any.
    #[must_use]
    pub fn pending(&self) -> Option<u32> {
        match self.state {
            PinState::Empty => None,
            PinState::Accumulating(pending) => Some(pending),
        }
    }

    /// Returns `true` if no digits are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state == PinState::Empty
    }

    fn pending_value(&self) -> u32 {
        match self.state {
            PinState::Empty => 0,
            PinState::Accumulating(pending) => pending,
        }
    }
}

impl Default for KeyAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run(digits: &[u8]) -> Option<u32> {
        let mut acc = KeyAccumulator::new();
        let mut confirmed = None;
        for &d in digits {
            if let Some(code) = acc.push(d) {
                confirmed = Some(code);
            }
        }
        confirmed
    }

    #[rstest]
    #[case(&[1, 2, 3, 11], 123)]
    #[case(&[9, 9, 9, 9, 9, 9, 9, 11], 999_999)]
    #[case(&[1, 2, 10, 3, 11], 3)]
    #[case(&[0, 0, 7, 11], 7)]
    #[case(&[11], 0)]
    fn test_confirmed_sequences(#[case] digits: &[u8], #[case] expected: u32) {
        assert_eq!(run(digits), Some(expected));
    }

    #[test]
    fn test_no_confirm_no_emit() {
        assert_eq!(run(&[1, 2, 3]), None);
    }

    #[test]
    fn test_clear_returns_to_empty() {
        let mut acc = KeyAccumulator::new();
        acc.push(4);
        acc.push(2);
        assert_eq!(acc.pending(), Some(42));

        acc.push(10);
        assert!(acc.is_empty());
        assert_eq!(acc.pending(), None);
    }

    #[test]
    fn test_abandon_discards_pending() {
        let mut acc = KeyAccumulator::new();
        acc.push(9);
        acc.abandon();
        assert!(acc.is_empty());

        // Entry restarts cleanly afterwards.
        acc.push(5);
        assert_eq!(acc.push(11), Some(5));
    }

    #[test]
    fn test_unknown_digit_abandons() {
        let mut acc = KeyAccumulator::new();
        acc.push(1);
        assert_eq!(acc.push(13), None);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_modulo_keeps_last_six_digits() {
        // 1234567 -> leading digit dropped by the modulo.
        assert_eq!(run(&[1, 2, 3, 4, 5, 6, 7, 11]), Some(234_567));
    }

    #[test]
    fn test_confirm_resets_for_next_entry() {
        let mut acc = KeyAccumulator::new();
        acc.push(7);
        assert_eq!(acc.push(11), Some(7));
        acc.push(8);
        assert_eq!(acc.push(11), Some(8));
    }
}
