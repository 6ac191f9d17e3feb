//! Persistent access code storage for the Gatekey decoder.
//!
//! This crate keeps the small, fixed-capacity table of authorized
//! (tag, key) pairs: an in-memory mirror loaded once at open, written
//! through slot-by-slot to an abstract byte medium on every mutation.
//!
//! # Architecture
//!
//! - [`StorageMedium`] — read/write-at-offset byte storage, the contract
//!   an EEPROM gives an embedded port. [`MemoryMedium`] backs tests,
//!   [`FileMedium`] backs development hosts.
//! - [`AccessCode`] — one (tag, key) entry plus its 8-byte slot format.
//! - [`CodeStore`] — create/search/delete over a fixed slot table with
//!   linear-scan lookup and per-slot flushing.
//!
//! # Examples
//!
//! ```
//! use gatekey_store::{CodeStore, MemoryMedium};
//! use gatekey_core::constants::{DEFAULT_STORE_CAPACITY, SLOT_SIZE};
//! use gatekey_core::{KeyCode, TagCode};
//!
//! let medium = MemoryMedium::new(DEFAULT_STORE_CAPACITY * SLOT_SIZE);
//! let mut store = CodeStore::open(medium, DEFAULT_STORE_CAPACITY).unwrap();
//!
//! let tag = TagCode::new(11_912_322).unwrap();
//! store.create(tag, KeyCode::new(1234)).unwrap();
//!
//! let slot = store.search(tag).unwrap();
//! assert!(store.search_key(slot, &KeyCode::new(1234)));
//! ```
//!
//! # Failure model
//!
//! Expected outcomes (full table, absent tag, out-of-range slot) are
//! boolean results; [`StoreError`] always means the medium itself failed.
//! A failed flush leaves memory ahead of the medium until the next open —
//! see [`CodeStore`] for the rationale.

pub mod entry;
pub mod error;
pub mod medium;
pub mod store;

pub use entry::AccessCode;
pub use error::{StoreError, StoreResult};
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use store::CodeStore;
