//! Access controller: decoder and code store composed behind one poll.
//!
//! The controller owns a [`Device`] and a [`CodeStore`] and turns confirmed
//! codes into decisions according to its operating mode:
//!
//! - [`AccessMode::Normal`] — a tag is looked up in the store; a confirmed
//!   PIN is checked against the active slot (the slot of the last
//!   confirmed tag).
//! - [`AccessMode::Enroll`] — a tag is created (or its key updated); a
//!   confirmed PIN is attached to the active tag.
//! - [`AccessMode::Revoke`] — a tag is deleted. Confirmed PINs are
//!   ignored in this mode.
//!
//! Every decision is timestamped and appended to a bounded history for
//! hosts that want an audit trail without wiring up their own.

use crate::error::AccessResult;
use chrono::{DateTime, Utc};
use gatekey_core::{CodeKind, KeyCode, TagCode};
use gatekey_decoder::device::Device;
use gatekey_decoder::traits::ReaderPort;
use gatekey_store::{AccessCode, CodeStore, StorageMedium};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info};

/// Maximum number of access events to keep in history.
///
/// Each event is a few dozen bytes; 64 of them cover a busy door's recent
/// past without growing unbounded on long-running hosts. Hosts needing a
/// durable audit trail should drain the history into their own log.
const MAX_EVENT_HISTORY: usize = 64;

/// Operating mode of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Look up presented credentials and grant or deny.
    Normal,
    /// Add presented tags (and attached PINs) to the store.
    Enroll,
    /// Remove presented tags from the store.
    Revoke,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AccessMode::Normal => write!(f, "Normal"),
            AccessMode::Enroll => write!(f, "Enroll"),
            AccessMode::Revoke => write!(f, "Revoke"),
        }
    }
}

/// Outcome of one confirmed credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Credential matched a stored entry.
    Granted { slot: usize },
    /// Credential matched nothing (or a reserved code was presented).
    Denied,
    /// New tag stored.
    Enrolled { slot: usize },
    /// Existing entry updated (key attached or replaced).
    Updated { slot: usize },
    /// No free slot for a new tag.
    StoreFull,
    /// Tag removed from the store.
    Revoked { slot: usize },
    /// Tag to revoke was not stored.
    NotFound,
}

impl AccessDecision {
    /// Returns `true` if the decision grants passage.
    #[must_use]
    pub fn is_grant(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }
}

/// One timestamped controller decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEvent {
    /// The decision taken.
    pub decision: AccessDecision,

    /// Kind of credential that triggered it.
    pub kind: CodeKind,

    /// Raw confirmed code (tag code or PIN).
    pub code: u32,

    /// When the decision was taken.
    pub timestamp: DateTime<Utc>,
}

/// Composition of a Wiegand [`Device`] and a persistent [`CodeStore`].
///
/// # Examples
///
/// ```
/// use gatekey_access::{AccessController, AccessDecision, AccessMode};
/// use gatekey_core::constants::{DEFAULT_STORE_CAPACITY, SLOT_SIZE};
/// use gatekey_decoder::device::{Device, DeviceConfig};
/// use gatekey_decoder::mock::MockReaderPort;
/// use gatekey_store::{CodeStore, MemoryMedium};
/// use std::time::Duration;
///
/// let (port, handle) = MockReaderPort::new();
/// let device = Device::with_config(
///     port,
///     DeviceConfig { bit_gap: Duration::from_millis(2) },
/// );
/// let store = CodeStore::open(
///     MemoryMedium::new(DEFAULT_STORE_CAPACITY * SLOT_SIZE),
///     DEFAULT_STORE_CAPACITY,
/// ).unwrap();
///
/// let mut controller = AccessController::new(device, store);
/// controller.begin().unwrap();
/// controller.set_mode(AccessMode::Enroll);
///
/// handle.transmit_tag26(0x0000_1234).unwrap();
/// std::thread::sleep(Duration::from_millis(5));
///
/// let decision = controller.poll().unwrap();
/// assert_eq!(decision, Some(AccessDecision::Enrolled { slot: 0 }));
/// ```
#[derive(Debug)]
pub struct AccessController<P: ReaderPort, M: StorageMedium> {
    device: Device<P>,
    store: CodeStore<M>,
    mode: AccessMode,
    active_slot: Option<usize>,
    history: VecDeque<AccessEvent>,
}

impl<P: ReaderPort, M: StorageMedium> AccessController<P, M> {
    /// Compose a device and a store, starting in [`AccessMode::Normal`].
    pub fn new(device: Device<P>, store: CodeStore<M>) -> Self {
        Self {
            device,
            store,
            mode: AccessMode::Normal,
            active_slot: None,
            history: VecDeque::with_capacity(MAX_EVENT_HISTORY),
        }
    }

    /// Bind the device to its reader port.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot bind its edge handlers.
    pub fn begin(&mut self) -> AccessResult<()> {
        self.device.begin()?;
        Ok(())
    }

    /// Current operating mode.
    #[must_use]
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Switch operating mode. Clears the active slot so a credential
    /// presented under the old mode cannot leak into the new one.
    pub fn set_mode(&mut self, mode: AccessMode) {
        if mode != self.mode {
            debug!("mode changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        self.active_slot = None;
    }

    /// Slot of the last confirmed tag, if it is (still) stored.
    #[must_use]
    pub fn active_slot(&self) -> Option<usize> {
        self.active_slot
    }

    /// The decisions taken so far, oldest first, capped at
    /// `MAX_EVENT_HISTORY`.
    #[must_use]
    pub fn history(&self) -> &VecDeque<AccessEvent> {
        &self.history
    }

    /// The most recent `count` decisions, oldest first.
    #[must_use]
    pub fn recent_events(&self, count: usize) -> Vec<AccessEvent> {
        self.history
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }

    /// Access the underlying device.
    #[must_use]
    pub fn device(&self) -> &Device<P> {
        &self.device
    }

    /// Access the underlying store.
    #[must_use]
    pub fn store(&self) -> &CodeStore<M> {
        &self.store
    }

    /// Mutable access to the underlying store (host-side management:
    /// pre-loading entries, wiping the table).
    pub fn store_mut(&mut self) -> &mut CodeStore<M> {
        &mut self.store
    }

    /// Clear the device's confirmed codes and the active slot.
    pub fn reset(&mut self) {
        self.device.reset();
        self.active_slot = None;
    }

    /// Drive the decoder; on a confirmed credential, consult or mutate
    /// the store according to the current mode.
    ///
    /// Returns `Ok(None)` when no confirmed credential is ready — most
    /// polls. Keys confirmed in [`AccessMode::Revoke`] are ignored and
    /// also return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a store mutation cannot be flushed to the
    /// persistent medium.
    pub fn poll(&mut self) -> AccessResult<Option<AccessDecision>> {
        if !self.device.poll() {
            return Ok(None);
        }

        let decision = match self.device.last_kind() {
            CodeKind::Tag => {
                let raw = self.device.last_tag_code();
                Some(self.handle_tag(raw)?)
            }
            CodeKind::Key => {
                let key = KeyCode::new(self.device.last_key_code());
                self.handle_key(key)?
            }
            CodeKind::None => None,
        };

        if let Some(decision) = decision {
            self.record(decision);
        }
        Ok(decision)
    }

    fn handle_tag(&mut self, raw: u32) -> AccessResult<AccessDecision> {
        // Reserved values cannot name a stored entry; deny without
        // touching the table.
        let Ok(tag) = TagCode::new(raw) else {
            self.active_slot = None;
            return Ok(AccessDecision::Denied);
        };

        let decision = match self.mode {
            AccessMode::Normal => match self.store.search(tag) {
                Some(slot) => {
                    self.active_slot = Some(slot);
                    AccessDecision::Granted { slot }
                }
                None => {
                    self.active_slot = None;
                    AccessDecision::Denied
                }
            },

            AccessMode::Enroll => {
                let existing = self.store.search(tag);
                if self.store.create(tag, KeyCode::NONE)? {
                    // create() guarantees the tag is present on success.
                    match self.store.search(tag) {
                        Some(slot) => {
                            self.active_slot = Some(slot);
                            match existing {
                                Some(_) => AccessDecision::Updated { slot },
                                None => AccessDecision::Enrolled { slot },
                            }
                        }
                        None => AccessDecision::Denied,
                    }
                } else {
                    self.active_slot = None;
                    AccessDecision::StoreFull
                }
            }

            AccessMode::Revoke => {
                self.active_slot = None;
                match self.store.search(tag) {
                    Some(slot) => {
                        self.store.delete_slot(slot)?;
                        AccessDecision::Revoked { slot }
                    }
                    None => AccessDecision::NotFound,
                }
            }
        };
        Ok(decision)
    }

    fn handle_key(&mut self, key: KeyCode) -> AccessResult<Option<AccessDecision>> {
        let decision = match self.mode {
            AccessMode::Normal => match self.active_slot {
                Some(slot) if self.store.search_key(slot, &key) => {
                    Some(AccessDecision::Granted { slot })
                }
                _ => Some(AccessDecision::Denied),
            },

            AccessMode::Enroll => match self.active_slot.and_then(|slot| self.store.get(slot)) {
                Some(AccessCode { tag, .. }) => {
                    self.store.create(tag, key)?;
                    // active_slot is unchanged: create() upserts in place.
                    self.active_slot.map(|slot| AccessDecision::Updated { slot })
                }
                None => Some(AccessDecision::Denied),
            },

            // Keys cannot revoke anything.
            AccessMode::Revoke => None,
        };
        Ok(decision)
    }

    fn record(&mut self, decision: AccessDecision) {
        let kind = self.device.last_kind();
        // For keys, the confirmed PIN is the meaningful code, not the
        // confirm digit that completed it.
        let code = match kind {
            CodeKind::Key => self.device.last_key_code(),
            _ => self.device.last_code(),
        };
        let event = AccessEvent {
            decision,
            kind,
            code,
            timestamp: Utc::now(),
        };
        info!("access decision: {:?} ({} {})", decision, event.kind, event.code);

        self.history.push_back(event);
        if self.history.len() > MAX_EVENT_HISTORY {
            self.history.pop_front();
        }
    }
}
