//! End-to-end access flows: reader edges through decoder, store and
//! controller decisions.

use gatekey_access::{AccessController, AccessDecision, AccessMode};
use gatekey_core::constants::{DEFAULT_STORE_CAPACITY, SLOT_SIZE};
use gatekey_core::{KeyCode, TagCode};
use gatekey_decoder::device::{Device, DeviceConfig};
use gatekey_decoder::mock::{MockPortHandle, MockReaderPort};
use gatekey_store::{CodeStore, MemoryMedium};
use std::time::Duration;

const TEST_GAP: Duration = Duration::from_millis(2);

type TestController = AccessController<MockReaderPort, MemoryMedium>;

fn controller() -> (TestController, MockPortHandle) {
    let (port, handle) = MockReaderPort::new();
    let device = Device::with_config(port, DeviceConfig { bit_gap: TEST_GAP });
    let store = CodeStore::open(
        MemoryMedium::new(DEFAULT_STORE_CAPACITY * SLOT_SIZE),
        DEFAULT_STORE_CAPACITY,
    )
    .expect("store should open");

    let mut controller = AccessController::new(device, store);
    controller.begin().expect("begin should attach");
    (controller, handle)
}

/// Transmit a W26 tag and poll until the controller decides.
fn present_tag(controller: &mut TestController, handle: &MockPortHandle, code: u32) -> Option<AccessDecision> {
    handle.transmit_tag26(code).unwrap();
    settle();
    controller.poll().unwrap()
}

/// Key in a PIN digit by digit (confirm digit included by the caller).
fn key_in(controller: &mut TestController, handle: &MockPortHandle, digits: &[u8]) -> Option<AccessDecision> {
    let mut last = None;
    for &digit in digits {
        handle.transmit_key4(digit).unwrap();
        settle();
        if let Some(decision) = controller.poll().unwrap() {
            last = Some(decision);
        }
    }
    last
}

fn settle() {
    std::thread::sleep(Duration::from_millis(6));
}

#[test]
fn unknown_tag_is_denied() {
    let (mut controller, handle) = controller();
    let decision = present_tag(&mut controller, &handle, 0x0000_1234);
    assert_eq!(decision, Some(AccessDecision::Denied));
    assert_eq!(controller.active_slot(), None);
}

#[test]
fn enroll_then_normal_grants() {
    let (mut controller, handle) = controller();

    controller.set_mode(AccessMode::Enroll);
    let decision = present_tag(&mut controller, &handle, 0x0000_1234);
    assert_eq!(decision, Some(AccessDecision::Enrolled { slot: 0 }));

    controller.set_mode(AccessMode::Normal);
    let decision = present_tag(&mut controller, &handle, 0x0000_1234);
    assert_eq!(decision, Some(AccessDecision::Granted { slot: 0 }));
    assert_eq!(controller.active_slot(), Some(0));
}

#[test]
fn enrolling_same_tag_twice_updates() {
    let (mut controller, handle) = controller();
    controller.set_mode(AccessMode::Enroll);

    present_tag(&mut controller, &handle, 0x0000_1234);
    let decision = present_tag(&mut controller, &handle, 0x0000_1234);
    assert_eq!(decision, Some(AccessDecision::Updated { slot: 0 }));
    assert_eq!(controller.store().occupied(), 1);
}

#[test]
fn revoke_then_normal_denies() {
    let (mut controller, handle) = controller();

    controller.set_mode(AccessMode::Enroll);
    present_tag(&mut controller, &handle, 0x0000_1234);

    controller.set_mode(AccessMode::Revoke);
    let decision = present_tag(&mut controller, &handle, 0x0000_1234);
    assert_eq!(decision, Some(AccessDecision::Revoked { slot: 0 }));

    controller.set_mode(AccessMode::Normal);
    let decision = present_tag(&mut controller, &handle, 0x0000_1234);
    assert_eq!(decision, Some(AccessDecision::Denied));
}

#[test]
fn revoking_unknown_tag_reports_not_found() {
    let (mut controller, handle) = controller();
    controller.set_mode(AccessMode::Revoke);

    let decision = present_tag(&mut controller, &handle, 0x0000_9999);
    assert_eq!(decision, Some(AccessDecision::NotFound));
}

#[test]
fn pin_attached_in_enroll_checks_in_normal() {
    let (mut controller, handle) = controller();

    // Enroll a tag, then attach PIN 1234 to it.
    controller.set_mode(AccessMode::Enroll);
    present_tag(&mut controller, &handle, 0x0000_1234);
    let decision = key_in(&mut controller, &handle, &[1, 2, 3, 4, 11]);
    assert_eq!(decision, Some(AccessDecision::Updated { slot: 0 }));

    // Back in normal mode: tag then correct PIN grants twice.
    controller.set_mode(AccessMode::Normal);
    present_tag(&mut controller, &handle, 0x0000_1234);
    let decision = key_in(&mut controller, &handle, &[1, 2, 3, 4, 11]);
    assert_eq!(decision, Some(AccessDecision::Granted { slot: 0 }));

    // Wrong PIN denies.
    present_tag(&mut controller, &handle, 0x0000_1234);
    let decision = key_in(&mut controller, &handle, &[9, 9, 9, 9, 11]);
    assert_eq!(decision, Some(AccessDecision::Denied));
}

#[test]
fn pin_without_prior_tag_is_denied() {
    let (mut controller, handle) = controller();
    let decision = key_in(&mut controller, &handle, &[1, 2, 11]);
    assert_eq!(decision, Some(AccessDecision::Denied));
}

#[test]
fn pin_in_revoke_mode_is_ignored() {
    let (mut controller, handle) = controller();
    controller.set_mode(AccessMode::Revoke);

    let decision = key_in(&mut controller, &handle, &[1, 2, 11]);
    assert_eq!(decision, None);
    assert!(controller.history().is_empty());
}

#[test]
fn store_full_is_reported() {
    let (mut controller, handle) = controller();

    // Pre-load the table through the host-side store handle.
    for i in 1..=DEFAULT_STORE_CAPACITY as u32 {
        controller
            .store_mut()
            .create(TagCode::new(i).unwrap(), KeyCode::NONE)
            .unwrap();
    }

    controller.set_mode(AccessMode::Enroll);
    let decision = present_tag(&mut controller, &handle, 0x0000_FFFF);
    assert_eq!(decision, Some(AccessDecision::StoreFull));
}

#[test]
fn mode_change_clears_active_slot() {
    let (mut controller, handle) = controller();

    controller.set_mode(AccessMode::Enroll);
    present_tag(&mut controller, &handle, 0x0000_1234);
    assert_eq!(controller.active_slot(), Some(0));

    controller.set_mode(AccessMode::Normal);
    assert_eq!(controller.active_slot(), None);

    // A PIN right after the mode change has no slot to check against.
    let decision = key_in(&mut controller, &handle, &[1, 2, 3, 4, 11]);
    assert_eq!(decision, Some(AccessDecision::Denied));
}

#[test]
fn decisions_are_recorded_in_history() {
    let (mut controller, handle) = controller();

    controller.set_mode(AccessMode::Enroll);
    present_tag(&mut controller, &handle, 0x0000_0042);
    controller.set_mode(AccessMode::Normal);
    present_tag(&mut controller, &handle, 0x0000_0042);
    present_tag(&mut controller, &handle, 0x0000_0043);

    let events = controller.recent_events(3);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].decision, AccessDecision::Enrolled { slot: 0 });
    assert_eq!(events[1].decision, AccessDecision::Granted { slot: 0 });
    assert_eq!(events[2].decision, AccessDecision::Denied);
    assert_eq!(events[1].code, 0x42);
}

#[test]
fn history_is_bounded() {
    let (mut controller, handle) = controller();

    for _ in 0..70 {
        present_tag(&mut controller, &handle, 0x0000_0001);
    }

    assert_eq!(controller.history().len(), 64);
}

#[test]
fn reset_clears_device_state_and_active_slot() {
    let (mut controller, handle) = controller();

    controller.set_mode(AccessMode::Enroll);
    present_tag(&mut controller, &handle, 0x0000_1234);

    controller.reset();
    assert_eq!(controller.active_slot(), None);
    assert_eq!(controller.device().last_tag_code(), 0);
}
