//! Reader port trait definition.
//!
//! A [`ReaderPort`] is the boundary between this crate and whatever owns
//! the physical D0/D1 lines (GPIO driver, USB bridge, test double). The
//! port delivers falling edges into a [`PulseSink`] and answers line-level
//! queries; everything protocol-shaped stays on this side of the trait.
//!
//! Implementations must call [`PulseSink::pulse`] from their edge handlers
//! and nothing else: the sink is safe to invoke from any thread, including
//! interrupt-style contexts, and never blocks for longer than the capture
//! buffer's short critical section.

use crate::capture::PulseSink;
use crate::error::Result;
use gatekey_core::{Level, Line};

/// Metadata about a reader port implementation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PortInfo {
    /// Port name (e.g., "wiegand0", "MockReaderPort").
    pub name: String,

    /// Driver or hardware model identifier.
    pub model: String,

    /// Optional hardware serial number.
    pub serial_number: Option<String>,
}

impl PortInfo {
    /// Create a new PortInfo with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            serial_number: None,
        }
    }

    /// Set the serial number.
    #[must_use]
    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }
}

/// Two-line Wiegand reader port abstraction.
///
/// # Examples
///
/// ```
/// use gatekey_decoder::mock::MockReaderPort;
/// use gatekey_decoder::traits::ReaderPort;
/// use gatekey_core::{Level, Line};
///
/// let (port, handle) = MockReaderPort::new();
/// assert_eq!(port.line_level(Line::D0).unwrap(), Level::High);
///
/// handle.set_level(Line::D0, Level::Low);
/// assert_eq!(port.line_level(Line::D0).unwrap(), Level::Low);
/// ```
pub trait ReaderPort: Send {
    /// Attach the pulse sink that falling edges on either line feed into.
    ///
    /// Called once by [`Device::begin`](crate::device::Device::begin);
    /// re-binding behavior is implementation-defined and implementations
    /// are free to reject a second attach.
    ///
    /// # Errors
    ///
    /// Returns an error if the edges cannot be bound or a sink is already
    /// attached.
    fn attach(&mut self, sink: PulseSink) -> Result<()>;

    /// Read the current resting level of one data line.
    ///
    /// Both lines read high when a healthy reader is connected and idle;
    /// a disconnected or shorted reader reads low.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be read.
    fn line_level(&self, line: Line) -> Result<Level>;

    /// Get port metadata.
    fn info(&self) -> PortInfo;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_info_builder() {
        let info = PortInfo::new("wiegand0", "GPIO bridge").with_serial_number("A113");

        assert_eq!(info.name, "wiegand0");
        assert_eq!(info.model, "GPIO bridge");
        assert_eq!(info.serial_number, Some("A113".to_string()));
    }

    #[test]
    fn test_port_info_minimal() {
        let info = PortInfo::new("mock", "Mock");
        assert_eq!(info.serial_number, None);
    }
}
