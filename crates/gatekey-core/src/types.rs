use crate::{
    Result,
    constants::{EMPTY_TAG_SENTINEL, ERASED_TAG_SENTINEL},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use subtle::ConstantTimeEq;

/// One of the two Wiegand data lines.
///
/// A falling edge on D0 transmits a `0` bit, a falling edge on D1 a `1`
/// bit. Both lines rest at logical high when a reader is connected and
/// idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    D0,
    D1,
}

impl Line {
    /// The bit value a falling edge on this line contributes to the frame.
    #[inline]
    #[must_use]
    pub fn bit_value(self) -> u8 {
        match self {
            Line::D0 => 0,
            Line::D1 => 1,
        }
    }

    /// Zero-based index of this line (D0 = 0, D1 = 1).
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Line::D0 => 0,
            Line::D1 => 1,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Line::D0 => write!(f, "D0"),
            Line::D1 => write!(f, "D1"),
        }
    }
}

/// Logical level of a data line at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Returns `true` if the level is [`Level::High`].
    #[inline]
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

/// Classification of a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CodeKind {
    /// Frame did not match any supported layout.
    None = 0,
    /// 26- or 34-bit reader frame carrying a tag code.
    Tag = 1,
    /// 4- or 8-bit keypad frame carrying a single digit.
    Key = 2,
}

impl CodeKind {
    /// Create a code kind from a u8 value.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeKind` if the value is not 0, 1, or 2.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CodeKind::None),
            1 => Ok(CodeKind::Tag),
            2 => Ok(CodeKind::Key),
            _ => Err(Error::InvalidCodeKind { code: value }),
        }
    }

    /// Convert the code kind to a u8 value.
    #[inline]
    #[must_use]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` if the kind is Tag.
    #[inline]
    #[must_use]
    pub fn is_tag(self) -> bool {
        matches!(self, CodeKind::Tag)
    }

    /// Returns `true` if the kind is Key.
    #[inline]
    #[must_use]
    pub fn is_key(self) -> bool {
        matches!(self, CodeKind::Key)
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodeKind::None => write!(f, "None"),
            CodeKind::Tag => write!(f, "Tag"),
            CodeKind::Key => write!(f, "Key"),
        }
    }
}

/// Decoded tag code from a 26- or 34-bit reader frame.
///
/// The persistent store encodes an empty slot as tag value `0`, and erased
/// EEPROM-class media read back as `0xFFFF_FFFF`; neither value can
/// therefore name a real tag. Construction rejects both, which lets the
/// in-memory model use `Option<AccessCode>` for emptiness instead of
/// sentinel comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagCode(NonZeroU32);

impl TagCode {
    /// Create a tag code with validation.
    ///
    /// # Errors
    /// Returns `Error::ReservedTagCode` for `0` and `0xFFFF_FFFF`, the two
    /// values reserved by the persistence layer.
    pub fn new(value: u32) -> Result<Self> {
        if value == EMPTY_TAG_SENTINEL || value == ERASED_TAG_SENTINEL {
            return Err(Error::ReservedTagCode { value });
        }
        // The sentinel check above already excludes zero.
        match NonZeroU32::new(value) {
            Some(v) => Ok(TagCode(v)),
            None => Err(Error::ReservedTagCode { value }),
        }
    }

    /// Get the raw tag code as u32.
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for TagCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.get())
    }
}

/// Confirmed keypad code (a PIN of up to six decimal digits).
///
/// # Security
/// Key codes are the secret half of a (tag, key) entry, so equality is
/// constant-time to avoid leaking how much of a PIN matched.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub struct KeyCode(u32);

impl KeyCode {
    /// The "no key set" value stored for tag-only entries.
    pub const NONE: KeyCode = KeyCode(0);

    /// Wrap a raw key code. Any value is valid; `0` means "no key set".
    #[inline]
    #[must_use]
    pub fn new(value: u32) -> Self {
        KeyCode(value)
    }

    /// Get the raw key code as u32.
    #[inline]
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns `true` if this is the "no key set" value.
    #[inline]
    #[must_use]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Constant-time comparison implementation for KeyCode.
impl PartialEq for KeyCode {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

/// Hash implementation for KeyCode.
///
/// Implements standard hashing for use in hash-based collections.
impl std::hash::Hash for KeyCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
