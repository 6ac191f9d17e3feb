//! Fixed-capacity persistent code store.
//!
//! The store loads its whole table from the medium once at open; from then
//! on the in-memory copy is authoritative and every mutation writes the
//! affected slot straight through. Lookup is a linear scan — capacities
//! are EEPROM-sized, so anything cleverer would be noise.
//!
//! If a flush fails the in-memory mutation has already happened and is
//! not rolled back: memory and medium diverge until the next open. This
//! mirrors the write-through model of the hardware stores this replaces,
//! where a failed write was not even detectable; surfacing the error is
//! already an extension of that contract.

use crate::entry::AccessCode;
use crate::error::{StoreError, StoreResult};
use crate::medium::StorageMedium;
use gatekey_core::constants::SLOT_SIZE;
use gatekey_core::{KeyCode, TagCode};
use tracing::{debug, warn};

/// Fixed-capacity set of authorized (tag, key) entries, write-through to
/// a [`StorageMedium`].
///
/// # Examples
///
/// ```
/// use gatekey_store::{CodeStore, MemoryMedium};
/// use gatekey_core::{KeyCode, TagCode};
/// use gatekey_core::constants::{DEFAULT_STORE_CAPACITY, SLOT_SIZE};
///
/// let medium = MemoryMedium::new(DEFAULT_STORE_CAPACITY * SLOT_SIZE);
/// let mut store = CodeStore::open(medium, DEFAULT_STORE_CAPACITY).unwrap();
///
/// let tag = TagCode::new(11_912_322).unwrap();
/// assert!(store.create(tag, KeyCode::NONE).unwrap());
/// assert_eq!(store.search(tag), Some(0));
/// ```
#[derive(Debug)]
pub struct CodeStore<M: StorageMedium> {
    medium: M,
    slots: Vec<Option<AccessCode>>,
}

impl<M: StorageMedium> CodeStore<M> {
    /// Open a store over `medium` with `capacity` slots, loading every
    /// slot into memory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MediumTooSmall`] if the medium cannot hold
    /// `capacity` slots, or an I/O error if loading fails.
    pub fn open(mut medium: M, capacity: usize) -> StoreResult<Self> {
        let needed = (capacity * SLOT_SIZE) as u64;
        if medium.len() < needed {
            return Err(StoreError::MediumTooSmall {
                needed,
                actual: medium.len(),
            });
        }

        let mut slots = Vec::with_capacity(capacity);
        let mut buf = [0u8; SLOT_SIZE];
        for slot in 0..capacity {
            medium.read((slot * SLOT_SIZE) as u64, &mut buf)?;
            slots.push(AccessCode::decode(&buf));
        }

        let store = Self { medium, slots };
        debug!(
            "code store loaded: {} of {} slots occupied",
            store.occupied(),
            capacity
        );
        Ok(store)
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Entry at `slot`, if the slot is in range and occupied.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<AccessCode> {
        self.slots.get(slot).copied().flatten()
    }

    /// Find the slot holding `tag`. Linear scan, first match wins.
    #[must_use]
    pub fn search(&self, tag: TagCode) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.map(|entry| entry.tag == tag).unwrap_or(false))
    }

    /// Compare `key` against the entry at `slot`.
    ///
    /// Returns `false` for an out-of-range or empty slot. The comparison
    /// itself is constant-time ([`KeyCode`] equality).
    #[must_use]
    pub fn search_key(&self, slot: usize, key: &KeyCode) -> bool {
        match self.slots.get(slot) {
            Some(Some(entry)) => entry.key == *key,
            _ => false,
        }
    }

    /// Create or update the entry for `tag`.
    ///
    /// If the tag already exists its key is updated in place (idempotent
    /// upsert); otherwise the first empty slot is populated. Returns
    /// `Ok(false)` if the table is full and the tag is new. Only the
    /// affected slot is flushed.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the slot to the medium fails; the
    /// in-memory entry is already updated in that case.
    pub fn create(&mut self, tag: TagCode, key: KeyCode) -> StoreResult<bool> {
        if let Some(slot) = self.search(tag) {
            self.slots[slot] = Some(AccessCode::new(tag, key));
            self.flush_slot(slot)?;
            debug!("entry for tag {tag} updated in slot {slot}");
            return Ok(true);
        }

        match self.slots.iter().position(Option::is_none) {
            Some(slot) => {
                self.slots[slot] = Some(AccessCode::new(tag, key));
                self.flush_slot(slot)?;
                debug!("entry for tag {tag} created in slot {slot}");
                Ok(true)
            }
            None => {
                warn!("code store full ({} slots), tag {tag} not stored", self.capacity());
                Ok(false)
            }
        }
    }

    /// Empty the slot at `slot`. Returns `Ok(false)` if out of range.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the emptied slot fails; the in-memory
    /// slot is already cleared in that case.
    pub fn delete_slot(&mut self, slot: usize) -> StoreResult<bool> {
        if slot >= self.slots.len() {
            return Ok(false);
        }
        self.slots[slot] = None;
        self.flush_slot(slot)?;
        debug!("slot {slot} deleted");
        Ok(true)
    }

    /// Delete the entry holding `tag`. Returns `Ok(false)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the emptied slot fails.
    pub fn delete_tag(&mut self, tag: TagCode) -> StoreResult<bool> {
        match self.search(tag) {
            Some(slot) => self.delete_slot(slot),
            None => Ok(false),
        }
    }

    /// Empty every slot, one slot (and one medium write) at a time.
    ///
    /// # Errors
    ///
    /// Returns an error on the first slot whose flush fails; earlier
    /// slots stay deleted.
    pub fn delete_all(&mut self) -> StoreResult<()> {
        for slot in 0..self.slots.len() {
            self.delete_slot(slot)?;
        }
        debug!("code store cleared");
        Ok(())
    }

    fn flush_slot(&mut self, slot: usize) -> StoreResult<()> {
        let bytes = match self.slots[slot] {
            Some(entry) => entry.encode(),
            None => AccessCode::encode_empty(),
        };
        self.medium.write((slot * SLOT_SIZE) as u64, &bytes)
    }
}
