//! Device composition root.
//!
//! A [`Device`] owns one capture buffer bound to a reader port's two data
//! lines, drives frame assembly and classification from its polled
//! [`Device::poll`] entry point, and keeps the last confirmed tag and key
//! codes. Each instance is fully self-contained: two devices on two ports
//! never share state.

use crate::capture::PulseCapture;
use crate::classifier::classify;
use crate::error::Result;
use crate::keypad::KeyAccumulator;
use crate::traits::ReaderPort;
use gatekey_core::CodeKind;
use gatekey_core::constants::BIT_GAP_MS;
use std::time::Duration;
use tracing::debug;

/// Construction-time decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Idle gap after which a transmission is considered complete.
    pub bit_gap: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bit_gap: Duration::from_millis(BIT_GAP_MS),
        }
    }
}

/// Wiegand device: capture, assembly, classification and PIN accumulation
/// behind a polling API.
///
/// # Examples
///
/// ```
/// use gatekey_decoder::device::{Device, DeviceConfig};
/// use gatekey_decoder::mock::MockReaderPort;
/// use gatekey_core::CodeKind;
/// use std::time::Duration;
///
/// let (port, handle) = MockReaderPort::new();
/// let config = DeviceConfig { bit_gap: Duration::from_millis(2) };
/// let mut device = Device::with_config(port, config);
/// device.begin().unwrap();
///
/// handle.transmit_tag26(0x00B1_05E7).unwrap();
/// std::thread::sleep(Duration::from_millis(5));
///
/// assert!(device.poll());
/// assert_eq!(device.last_kind(), CodeKind::Tag);
/// assert_eq!(device.last_tag_code(), 0x00B1_05E7);
/// ```
#[derive(Debug)]
pub struct Device<P: ReaderPort> {
    port: P,
    capture: PulseCapture,
    keypad: KeyAccumulator,
    last_code: u32,
    last_kind: CodeKind,
    last_tag_code: u32,
    last_key_code: u32,
}

impl<P: ReaderPort> Device<P> {
    /// Create a device with the production bit gap.
    pub fn new(port: P) -> Self {
        Self::with_config(port, DeviceConfig::default())
    }

    /// Create a device with an explicit configuration.
    pub fn with_config(port: P, config: DeviceConfig) -> Self {
        Self {
            port,
            capture: PulseCapture::new(config.bit_gap),
            keypad: KeyAccumulator::new(),
            last_code: 0,
            last_kind: CodeKind::None,
            last_tag_code: 0,
            last_key_code: 0,
        }
    }

    /// Bind the capture buffer to the port's falling edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot bind its edge handlers or a
    /// sink is already attached.
    pub fn begin(&mut self) -> Result<()> {
        let sink = self.capture.sink();
        self.port.attach(sink)?;
        debug!("device attached to {}", self.port.info().name);
        Ok(())
    }

    /// Check whether a reader is connected: both lines rest at logical
    /// high on a healthy Wiegand bus.
    ///
    /// # Errors
    ///
    /// Returns an error if either line cannot be read.
    pub fn has_device(&self) -> Result<bool> {
        let d0 = self.port.line_level(gatekey_core::Line::D0)?;
        let d1 = self.port.line_level(gatekey_core::Line::D1)?;
        Ok(d0.is_high() && d1.is_high())
    }

    /// Drive frame assembly and classification.
    ///
    /// Returns `true` only when a confirmed, externally meaningful code is
    /// ready: a valid tag frame confirms immediately, a keypad entry
    /// confirms on its confirm digit. Partial PIN entries and discarded
    /// frames return `false`.
    pub fn poll(&mut self) -> bool {
        let Some(frame) = self.capture.poll_frame() else {
            return false;
        };

        let decoded = classify(frame);
        match decoded.kind {
            CodeKind::None => {
                // Malformed transmission also abandons a partial PIN.
                self.keypad.abandon();
                false
            }
            CodeKind::Tag => {
                self.keypad.abandon();
                self.last_code = decoded.code;
                self.last_kind = CodeKind::Tag;
                self.last_tag_code = decoded.code;
                debug!("tag confirmed: {} ({} bits)", decoded.code, decoded.bit_count);
                true
            }
            CodeKind::Key => {
                self.last_code = decoded.code;
                self.last_kind = CodeKind::Key;
                // Key frames carry a single digit in the low nibble.
                match self.keypad.push(decoded.code as u8) {
                    Some(code) => {
                        self.last_key_code = code;
                        debug!("key confirmed: {code}");
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Last successfully classified code (tag or single digit).
    /// Zero before any frame has been decoded.
    #[must_use]
    pub fn last_code(&self) -> u32 {
        self.last_code
    }

    /// Kind of the last successfully classified frame.
    #[must_use]
    pub fn last_kind(&self) -> CodeKind {
        self.last_kind
    }

    /// Last confirmed tag code. Zero before any tag has been read.
    #[must_use]
    pub fn last_tag_code(&self) -> u32 {
        self.last_tag_code
    }

    /// Last confirmed key code. Zero before any PIN has been confirmed.
    #[must_use]
    pub fn last_key_code(&self) -> u32 {
        self.last_key_code
    }

    /// Clear the last confirmed codes without touching the live capture
    /// buffer; a transmission in flight still completes normally.
    pub fn reset(&mut self) {
        self.last_code = 0;
        self.last_kind = CodeKind::None;
        self.last_tag_code = 0;
        self.last_key_code = 0;
    }

    /// Access the underlying reader port.
    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }
}
