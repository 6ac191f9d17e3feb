//! Access code entries and their persistent wire format.
//!
//! Each slot persists as 8 bytes: the tag code then the key code, both
//! little-endian `u32`s, at offset `slot * 8`. An empty slot is all
//! zeros; erased EEPROM-class media read back as all ones. Both patterns
//! decode to "empty", which is why [`TagCode`] refuses those two values
//! at construction — in memory, emptiness is `Option`, never a sentinel
//! comparison.

use gatekey_core::constants::SLOT_SIZE;
use gatekey_core::{KeyCode, TagCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One authorized (tag, key) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCode {
    /// Tag code read from a 26/34-bit frame.
    pub tag: TagCode,

    /// Key code paired with the tag; [`KeyCode::NONE`] for tag-only
    /// entries.
    pub key: KeyCode,
}

impl AccessCode {
    /// Create an entry.
    #[must_use]
    pub fn new(tag: TagCode, key: KeyCode) -> Self {
        Self { tag, key }
    }

    /// Encode this entry into its slot wire format.
    #[must_use]
    pub fn encode(&self) -> [u8; SLOT_SIZE] {
        let mut bytes = [0u8; SLOT_SIZE];
        bytes[..4].copy_from_slice(&self.tag.get().to_le_bytes());
        bytes[4..].copy_from_slice(&self.key.as_u32().to_le_bytes());
        bytes
    }

    /// Decode a slot, returning `None` for the empty and erased patterns.
    #[must_use]
    pub fn decode(bytes: &[u8; SLOT_SIZE]) -> Option<Self> {
        let tag_raw = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let key_raw = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        // TagCode::new rejects exactly the two empty-slot patterns.
        let tag = TagCode::new(tag_raw).ok()?;
        Some(Self {
            tag,
            key: KeyCode::new(key_raw),
        })
    }

    /// The wire format of an empty slot.
    #[must_use]
    pub fn encode_empty() -> [u8; SLOT_SIZE] {
        [0u8; SLOT_SIZE]
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.key.is_none() {
            write!(f, "tag {}", self.tag)
        } else {
            write!(f, "tag {} + key", self.tag)
        }
    }
}
