// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Byte/word geometry of the shared pin region and the two word encodings.
//
// Both processes are built against these constants. Changing any of them
// requires rebuilding the bridge and the peer together.
//
//   word 0      pin/slot count (peer-authoritative, informational)
//   word 1      update-notification flag (bridge sets 1, peer clears)
//   word 2 + i  value of logical pin i
//
// Words are native-endian 64-bit integers.

use crate::error::{BridgeError, BridgeResult};

/// Total size of the shared region in bytes.
pub const REGION_SIZE: usize = 4096;

/// Width of one slot in bytes.
pub const WORD_SIZE: usize = std::mem::size_of::<i64>();

/// Number of 64-bit slots in the region.
pub const REGION_WORDS: usize = REGION_SIZE / WORD_SIZE;

/// Slot holding the peer-published pin count.
pub const PIN_COUNT_SLOT: usize = 0;

/// Slot holding the advisory update-notification flag.
pub const UPDATE_FLAG_SLOT: usize = 1;

/// First value slot; pin `i` lives at `PIN_BASE_SLOT + i`.
pub const PIN_BASE_SLOT: usize = 2;

/// Upper bound on the pin count imposed by the region size.
pub const MAX_PINS: usize = REGION_WORDS - PIN_BASE_SLOT;

const _: () = assert!(REGION_WORDS == 512);
const _: () = assert!(MAX_PINS == 510);

/// Slot index backing logical pin `pin`.
///
/// Callers guarantee `pin < pin_count` where the pin count has passed
/// [`check_pin_count`]; no range check happens here because this runs on
/// every cycle.
#[inline]
pub const fn slot_address(pin: usize) -> usize {
    PIN_BASE_SLOT + pin
}

/// Startup check that `pin_count` pins fit into the region.
pub fn check_pin_count(pin_count: usize) -> BridgeResult<()> {
    if pin_count > MAX_PINS {
        return Err(BridgeError::PinCountExceedsRegion {
            pins: pin_count,
            capacity: MAX_PINS,
        });
    }
    Ok(())
}

/// Startup check that `pin` is addressable in a layout of `pin_count` pins.
pub fn check_pin(pin: usize, pin_count: usize) -> BridgeResult<usize> {
    check_pin_count(pin_count)?;
    if pin >= pin_count {
        return Err(BridgeError::PinOutOfRange { pin, pin_count });
    }
    Ok(slot_address(pin))
}

// ---------------------------------------------------------------------------
// Word encodings
// ---------------------------------------------------------------------------

/// How a slot's 64 bits are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// The word is the exact bit pattern of an `f64`.
    FloatBits,
    /// The word is an `i64`; other types convert numerically.
    GenericInteger,
}

/// Bit-preserving float encoding: reinterpret, never convert.
///
/// NaN payloads and the sign of zero survive the round trip.
#[inline]
pub fn float_to_word(value: f64) -> i64 {
    value.to_bits() as i64
}

/// Inverse of [`float_to_word`].
#[inline]
pub fn word_to_float(word: i64) -> f64 {
    f64::from_bits(word as u64)
}

/// Generic integer encoding of a boolean.
#[inline]
pub fn bit_to_word(value: bool) -> i64 {
    value as i64
}

/// Generic integer encoding of a signed 32-bit value.
#[inline]
pub fn s32_to_word(value: i32) -> i64 {
    value as i64
}

/// Generic integer decoding to a boolean: any non-zero word is true.
#[inline]
pub fn word_to_bit(word: i64) -> bool {
    word != 0
}

/// Generic integer decoding to a signed 32-bit value (numeric cast).
///
/// Words outside the `i32` range keep their low 32 bits.
#[inline]
pub fn word_to_s32(word: i64) -> i32 {
    word as i32
}

/// Generic integer decoding to a float (numeric conversion).
///
/// Lossy for magnitudes above 2^53; fractional parts never appear on this
/// path because the word is an integer.
#[inline]
pub fn word_to_numeric_float(word: i64) -> f64 {
    word as f64
}

/// Generic integer encoding of a float (numeric conversion, truncates
/// toward zero, saturates at the `i64` bounds, NaN becomes 0).
#[inline]
pub fn numeric_float_to_word(value: f64) -> i64 {
    value as i64
}
