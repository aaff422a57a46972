// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Pin registry: registration rules, inbound combination, outbound fan-out.

use pinbridge::{
    BridgeError, Direction, EndpointKind, FloatLayout, FloatPin, PinLayout, PinRegistry,
    TypedLayout, TypedPin, ValueType,
};
use proptest::prelude::*;

const BIT_IN: EndpointKind = EndpointKind::new(ValueType::Bit, Direction::In);
const S32_IN: EndpointKind = EndpointKind::new(ValueType::S32, Direction::In);
const FLOAT_IN: EndpointKind = EndpointKind::new(ValueType::Float, Direction::In);
const BIT_OUT: EndpointKind = EndpointKind::new(ValueType::Bit, Direction::Out);
const S32_OUT: EndpointKind = EndpointKind::new(ValueType::S32, Direction::Out);
const FLOAT_OUT: EndpointKind = EndpointKind::new(ValueType::Float, Direction::Out);

fn typed_pin(kinds: &[EndpointKind]) -> TypedPin {
    let mut reg = PinRegistry::<TypedLayout>::new().unwrap();
    for &k in kinds {
        reg.register(0, k).unwrap();
    }
    *reg.pin(0).unwrap()
}

// ========== Registration ==========

#[test]
fn typed_registry_starts_empty() {
    let reg = PinRegistry::<TypedLayout>::new().unwrap();
    assert_eq!(reg.pin_count(), 256);
    assert_eq!(reg.pins().len(), 256);
    assert_eq!(reg.active_kinds(0).count(), 0);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut reg = PinRegistry::<TypedLayout>::new().unwrap();
    reg.register(7, S32_IN).unwrap();
    let err = reg.register(7, S32_IN).unwrap_err();
    assert!(matches!(err, BridgeError::DuplicateEndpoint { ref name } if name == "pin.7.s32-in"));
}

#[test]
fn out_of_range_pin_is_rejected() {
    let mut reg = PinRegistry::<TypedLayout>::new().unwrap();
    assert!(matches!(
        reg.register(256, BIT_IN),
        Err(BridgeError::PinOutOfRange { pin: 256, pin_count: 256 })
    ));
}

#[test]
fn float_layout_rejects_other_types() {
    let mut reg = PinRegistry::<FloatLayout>::new().unwrap();
    assert!(matches!(reg.register(0, BIT_IN), Err(BridgeError::InvalidConfig(_))));
    assert!(matches!(
        reg.register(0, FLOAT_IN),
        Err(BridgeError::DuplicateEndpoint { .. })
    ));
}

#[test]
fn register_all_and_active_kinds_order() {
    let mut reg = PinRegistry::<TypedLayout>::new().unwrap();
    reg.register_all(&[S32_OUT, BIT_IN]).unwrap();
    for pin in [0, 128, 255] {
        let kinds: Vec<_> = reg.active_kinds(pin).collect();
        assert_eq!(kinds, vec![BIT_IN, S32_OUT]);
    }
    assert_eq!(reg.active_kinds(999).count(), 0);
}

// ========== Inbound combination ==========

#[test]
fn bit_wins_when_s32_is_zero() {
    let mut pin = typed_pin(&[BIT_IN, S32_IN]);
    pin.set_bit_in(true);
    pin.set_s32_in(0);
    assert_eq!(TypedLayout::coerce_inbound(&pin), Some(1));
}

#[test]
fn non_zero_s32_overrides_bit() {
    let mut pin = typed_pin(&[BIT_IN, S32_IN]);
    pin.set_bit_in(false);
    pin.set_s32_in(7);
    assert_eq!(TypedLayout::coerce_inbound(&pin), Some(7));

    pin.set_bit_in(true);
    assert_eq!(TypedLayout::coerce_inbound(&pin), Some(7));
}

#[test]
fn float_inbound_does_not_take_part() {
    let mut pin = typed_pin(&[BIT_IN, FLOAT_IN]);
    pin.set_bit_in(true);
    pin.set_float_in(99.5);
    assert_eq!(TypedLayout::coerce_inbound(&pin), Some(1));

    let mut only_float = typed_pin(&[FLOAT_IN]);
    only_float.set_float_in(12.0);
    assert_eq!(TypedLayout::coerce_inbound(&only_float), Some(0));
}

#[test]
fn outbound_only_pin_has_no_inbound_word() {
    let pin = typed_pin(&[BIT_OUT, S32_OUT, FLOAT_OUT]);
    assert_eq!(TypedLayout::coerce_inbound(&pin), None);
}

#[test]
fn float_layout_copies_bits() {
    let pin = FloatPin {
        input: -0.0,
        output: 0.0,
    };
    let word = FloatLayout::coerce_inbound(&pin).unwrap();
    assert_eq!(word as u64, (-0.0f64).to_bits());
}

// ========== Outbound fan-out ==========

#[test]
fn fan_out_skips_unregistered_endpoints() {
    let mut pin = typed_pin(&[S32_OUT]);
    TypedLayout::fan_out(&mut pin, 5);
    assert_eq!(pin.s32_out(), Some(5));
    assert_eq!(pin.bit_out(), None);
    assert_eq!(pin.float_out(), None);
}

proptest! {
    #[test]
    fn fan_out_is_consistent(x in any::<i32>()) {
        let mut pin = typed_pin(&[BIT_OUT, S32_OUT, FLOAT_OUT]);
        TypedLayout::fan_out(&mut pin, i64::from(x));
        prop_assert_eq!(pin.bit_out(), Some(x != 0));
        prop_assert_eq!(pin.s32_out(), Some(x));
        prop_assert_eq!(pin.float_out(), Some(f64::from(x)));
    }

    #[test]
    fn fan_out_of_wide_words_casts(x in any::<i64>()) {
        let mut pin = typed_pin(&[BIT_OUT, S32_OUT, FLOAT_OUT]);
        TypedLayout::fan_out(&mut pin, x);
        prop_assert_eq!(pin.bit_out(), Some(x != 0));
        prop_assert_eq!(pin.s32_out(), Some(x as i32));
        prop_assert_eq!(pin.float_out(), Some(x as f64));
    }

    #[test]
    fn combination_follows_precedence(bit in any::<bool>(), v in any::<i32>()) {
        let mut pin = typed_pin(&[BIT_IN, S32_IN]);
        pin.set_bit_in(bit);
        pin.set_s32_in(v);
        let expected = if v != 0 { i64::from(v) } else { i64::from(bit) };
        prop_assert_eq!(TypedLayout::coerce_inbound(&pin), Some(expected));
    }
}
