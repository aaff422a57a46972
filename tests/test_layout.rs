// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Slot geometry and word encodings.

use pinbridge::layout::*;
use pinbridge::{FloatLayout, PinLayout, TypedLayout};
use proptest::prelude::*;

#[test]
fn reserved_slots() {
    assert_eq!(REGION_SIZE, 4096);
    assert_eq!(REGION_WORDS, 512);
    assert_eq!(PIN_COUNT_SLOT, 0);
    assert_eq!(UPDATE_FLAG_SLOT, 1);
    assert_eq!(PIN_BASE_SLOT, 2);
}

#[test]
fn address_is_stable_across_calls_and_layouts() {
    for layout_pins in [FloatLayout::PIN_COUNT, TypedLayout::PIN_COUNT] {
        for pin in 0..layout_pins {
            let first = slot_address(pin);
            assert_eq!(first, 2 + pin);
            assert_eq!(slot_address(pin), first);
            assert_eq!(check_pin(pin, layout_pins).unwrap(), first);
        }
    }
}

#[test]
fn both_layouts_fit_the_region() {
    assert!(check_pin_count(FloatLayout::PIN_COUNT).is_ok());
    assert!(check_pin_count(TypedLayout::PIN_COUNT).is_ok());
    assert!(check_pin_count(MAX_PINS + 1).is_err());
}

#[test]
fn float_bits_preserve_special_values() {
    let nan_payload = f64::from_bits(0x7ff8_0000_dead_beef);
    let signalling = f64::from_bits(0x7ff0_0000_0000_0001);
    let values = [
        0.0,
        -0.0,
        f64::MIN_POSITIVE / 2.0, // subnormal
        -f64::from_bits(1),      // smallest negative subnormal
        f64::INFINITY,
        f64::NEG_INFINITY,
        nan_payload,
        signalling,
        f64::MAX,
        1.0 / 3.0,
    ];
    for v in values {
        let back = word_to_float(float_to_word(v));
        assert_eq!(back.to_bits(), v.to_bits(), "value {v:?}");
    }
    assert!(word_to_float(float_to_word(-0.0)).is_sign_negative());
}

#[test]
fn generic_integer_conversions() {
    assert_eq!(bit_to_word(true), 1);
    assert_eq!(bit_to_word(false), 0);
    assert!(word_to_bit(-1));
    assert!(!word_to_bit(0));
    assert_eq!(word_to_s32(42), 42);
    assert_eq!(word_to_s32(i64::from(i32::MIN)), i32::MIN);
    assert_eq!(word_to_numeric_float(42), 42.0);
}

#[test]
fn generic_integer_float_path_is_lossy() {
    // Fractions do not survive the integer encoding.
    assert_eq!(word_to_numeric_float(numeric_float_to_word(3.75)), 3.0);
}

proptest! {
    #[test]
    fn float_bits_round_trip(bits in any::<u64>()) {
        let v = f64::from_bits(bits);
        prop_assert_eq!(word_to_float(float_to_word(v)).to_bits(), bits);
    }

    #[test]
    fn s32_round_trips_through_generic_encoding(v in any::<i32>()) {
        prop_assert_eq!(word_to_s32(s32_to_word(v)), v);
    }
}
