//! Mock reader port implementation.

use crate::capture::PulseSink;
use crate::error::{DecoderError, Result};
use crate::traits::{PortInfo, ReaderPort};
use gatekey_core::{Level, Line};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug)]
struct PortState {
    levels: [Level; 2],
    sink: Option<PulseSink>,
}

fn lock(state: &Arc<Mutex<PortState>>) -> std::sync::MutexGuard<'_, PortState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock two-line reader port.
///
/// Created together with its controlling [`MockPortHandle`]; both lines
/// start at the idle-high level of a connected reader.
///
/// # Examples
///
/// ```
/// use gatekey_decoder::device::{Device, DeviceConfig};
/// use gatekey_decoder::mock::MockReaderPort;
/// use std::time::Duration;
///
/// let (port, handle) = MockReaderPort::new();
/// let mut device = Device::with_config(
///     port,
///     DeviceConfig { bit_gap: Duration::from_millis(2) },
/// );
/// device.begin().unwrap();
///
/// handle.transmit_key4(7).unwrap(); // keypad digit 7
/// std::thread::sleep(Duration::from_millis(5));
/// device.poll();
/// assert_eq!(device.last_code(), 7);
/// ```
#[derive(Debug)]
pub struct MockReaderPort {
    shared: Arc<Mutex<PortState>>,
    name: String,
}

impl MockReaderPort {
    /// Create a new mock port with the default name.
    ///
    /// Returns a tuple of (MockReaderPort, MockPortHandle) where the
    /// handle simulates the reader side of the bus.
    pub fn new() -> (Self, MockPortHandle) {
        Self::with_name("Mock Wiegand Port".to_string())
    }

    /// Create a new mock port with a custom name.
    pub fn with_name(name: String) -> (Self, MockPortHandle) {
        let shared = Arc::new(Mutex::new(PortState {
            levels: [Level::High, Level::High],
            sink: None,
        }));

        let port = Self {
            shared: Arc::clone(&shared),
            name: name.clone(),
        };

        let handle = MockPortHandle { shared, name };

        (port, handle)
    }
}

impl Default for MockReaderPort {
    fn default() -> Self {
        Self::new().0
    }
}

impl ReaderPort for MockReaderPort {
    fn attach(&mut self, sink: PulseSink) -> Result<()> {
        let mut state = lock(&self.shared);
        if state.sink.is_some() {
            return Err(DecoderError::already_attached(&self.name));
        }
        state.sink = Some(sink);
        Ok(())
    }

    fn line_level(&self, line: Line) -> Result<Level> {
        Ok(lock(&self.shared).levels[line.index()])
    }

    fn info(&self) -> PortInfo {
        PortInfo::new(self.name.clone(), "Mock Wiegand Port v1.0")
    }
}

/// Handle for controlling a mock reader port.
///
/// Simulates the reader side of the bus: line levels, individual falling
/// edges, and whole-frame transmissions. Can be cloned and shared across
/// threads.
#[derive(Debug, Clone)]
pub struct MockPortHandle {
    shared: Arc<Mutex<PortState>>,
    name: String,
}

impl MockPortHandle {
    /// Set the resting level of one line (both start high).
    pub fn set_level(&self, line: Line, level: Level) {
        lock(&self.shared).levels[line.index()] = level;
    }

    /// Simulate one falling edge on `line`.
    ///
    /// # Errors
    ///
    /// Returns an error if no pulse sink has been attached yet (the device
    /// has not called `begin`).
    pub fn pulse(&self, line: Line) -> Result<()> {
        let sink = {
            let state = lock(&self.shared);
            state
                .sink
                .clone()
                .ok_or_else(|| DecoderError::not_attached(&self.name))?
        };
        sink.pulse(line);
        Ok(())
    }

    /// Transmit `bits` bits of `value` MSB-first, one falling edge per
    /// bit, exactly as a reader serializes a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if no pulse sink has been attached yet.
    pub fn transmit_frame(&self, value: u64, bits: u8) -> Result<()> {
        for i in (0..bits).rev() {
            let line = if (value >> i) & 1 == 1 {
                Line::D1
            } else {
                Line::D0
            };
            self.pulse(line)?;
        }
        Ok(())
    }

    /// Transmit a single keypad digit as a 4-bit frame.
    ///
    /// # Errors
    ///
    /// Returns an error if no pulse sink has been attached yet.
    pub fn transmit_key4(&self, digit: u8) -> Result<()> {
        self.transmit_frame(u64::from(digit & 0x0F), 4)
    }

    /// Transmit a single keypad digit as an 8-bit frame (digit in the low
    /// nibble, complement in the high nibble).
    ///
    /// # Errors
    ///
    /// Returns an error if no pulse sink has been attached yet.
    pub fn transmit_key8(&self, digit: u8) -> Result<()> {
        let digit = digit & 0x0F;
        let value = (u64::from(!digit & 0x0F) << 4) | u64::from(digit);
        self.transmit_frame(value, 8)
    }

    /// Transmit a 24-bit tag code as a W26 frame with standard parity
    /// (even over the high 12 data bits, odd over the low 12).
    ///
    /// # Errors
    ///
    /// Returns an error if no pulse sink has been attached yet.
    pub fn transmit_tag26(&self, code: u32) -> Result<()> {
        let data = u64::from(code & 0x00FF_FFFF);
        let leading = (data >> 12).count_ones() % 2; // even parity
        let trailing = 1 - ((data & 0xFFF).count_ones() % 2); // odd parity
        let raw = (u64::from(leading) << 25) | (data << 1) | u64::from(trailing);
        self.transmit_frame(raw, 26)
    }

    /// Transmit a 32-bit tag code as a W34 frame with standard parity
    /// (even over the high 16 data bits, odd over the low 16).
    ///
    /// # Errors
    ///
    /// Returns an error if no pulse sink has been attached yet.
    pub fn transmit_tag34(&self, code: u32) -> Result<()> {
        let data = u64::from(code);
        let leading = (data >> 16).count_ones() % 2;
        let trailing = 1 - ((data & 0xFFFF).count_ones() % 2);
        let raw = (u64::from(leading) << 33) | (data << 1) | u64::from(trailing);
        self.transmit_frame(raw, 34)
    }

    /// Get the port name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
