//! Access control layer composing the Wiegand decoder with the code store.
//!
//! This crate contains the [`AccessController`]: one poll entry point that
//! drives a [`Device`](gatekey_decoder::device::Device), routes confirmed
//! tags and PINs through a [`CodeStore`](gatekey_store::CodeStore)
//! according to the current [`AccessMode`], and keeps a bounded,
//! timestamped history of its decisions.
//!
//! Decoder and store remain independent components; this crate only
//! forwards and augments their calls, so either can be tested (or reused)
//! on its own.

pub mod controller;
pub mod error;

pub use controller::{AccessController, AccessDecision, AccessEvent, AccessMode};
pub use error::{AccessError, AccessResult};
