//! Wiegand protocol decoder for two-line access control readers.
//!
//! This crate turns raw falling edges on the D0/D1 lines of a Wiegand bus
//! into classified codes: tag codes from 26/34-bit reader frames and
//! confirmed PINs from 4/8-bit keypad frames.
//!
//! # Architecture
//!
//! Decoding is split along the protocol's two timing domains:
//!
//! - [`capture`] — the edge-rate half: a [`PulseSink`](capture::PulseSink)
//!   that edge handlers feed, and idle-gap frame assembly behind a single
//!   short critical section.
//! - [`classifier`] — pure validation of a frozen frame against the four
//!   supported layouts (4, 8, 26, 34 bits).
//! - [`keypad`] — accumulation of successive keypad digits into a PIN with
//!   clear/confirm control digits.
//! - [`device`] — the composition root tying one reader port to the above
//!   and exposing the polled host API.
//! - [`traits`] / [`mock`] — the [`ReaderPort`](traits::ReaderPort)
//!   boundary and its programmable test double.
//!
//! # Concurrency model
//!
//! There are exactly two priority levels: edge handlers (may run on any
//! thread at any time, must finish fast) and the host poll loop. The only
//! state they share is the capture buffer, and the only multi-field read
//! of it is the snapshot-and-reset inside
//! [`PulseCapture::poll_frame`](capture::PulseCapture::poll_frame).
//! Nothing here is async and nothing blocks beyond that critical section.
//!
//! # Examples
//!
//! ```
//! use gatekey_decoder::device::{Device, DeviceConfig};
//! use gatekey_decoder::mock::MockReaderPort;
//! use gatekey_core::CodeKind;
//! use std::time::Duration;
//!
//! let (port, handle) = MockReaderPort::new();
//! let mut device = Device::with_config(
//!     port,
//!     DeviceConfig { bit_gap: Duration::from_millis(2) },
//! );
//! device.begin().unwrap();
//!
//! // A user keys in "42" and presses confirm (digit 11).
//! for digit in [4, 2, 11] {
//!     handle.transmit_key4(digit).unwrap();
//!     std::thread::sleep(Duration::from_millis(5));
//!     device.poll();
//! }
//!
//! assert_eq!(device.last_kind(), CodeKind::Key);
//! assert_eq!(device.last_key_code(), 42);
//! ```

pub mod capture;
pub mod classifier;
pub mod device;
pub mod error;
pub mod frame;
pub mod keypad;
pub mod mock;
pub mod traits;

pub use capture::{PulseCapture, PulseSink};
pub use classifier::classify;
pub use device::{Device, DeviceConfig};
pub use error::{DecoderError, Result};
pub use frame::{DecodedCode, Frame};
pub use keypad::KeyAccumulator;
pub use traits::{PortInfo, ReaderPort};
