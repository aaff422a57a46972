// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Pin registry: per-pin typed endpoints and the policy that turns them into
// slot words (inbound) and slot words back into endpoint values (outbound).
//
// Two layouts exist and are chosen at build time through the type parameter
// of `PinRegistry` / `Bridge`:
//
//   FloatLayout  16 pins, one f64 in + one f64 out per pin, bit-preserving
//   TypedLayout  256 pins, optional bit/s32/float in + out per pin,
//                generic integer encoding

use crate::error::{BridgeError, BridgeResult};
use crate::layout::{self, Encoding, MAX_PINS};

// ---------------------------------------------------------------------------
// Endpoint kinds
// ---------------------------------------------------------------------------

/// Value type carried by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bit,
    S32,
    Float,
}

/// Direction of an endpoint, seen from the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Control loop -> shared region.
    In,
    /// Shared region -> control loop.
    Out,
}

/// A typed, directional endpoint slot on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointKind {
    pub ty: ValueType,
    pub dir: Direction,
}

impl EndpointKind {
    pub const fn new(ty: ValueType, dir: Direction) -> Self {
        Self { ty, dir }
    }

    /// Every kind, in naming order.
    pub const ALL: [EndpointKind; 6] = [
        EndpointKind::new(ValueType::Bit, Direction::In),
        EndpointKind::new(ValueType::Bit, Direction::Out),
        EndpointKind::new(ValueType::S32, Direction::In),
        EndpointKind::new(ValueType::S32, Direction::Out),
        EndpointKind::new(ValueType::Float, Direction::In),
        EndpointKind::new(ValueType::Float, Direction::Out),
    ];
}

/// Result of trying to activate an endpoint on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activated,
    AlreadyActive,
    Unsupported,
}

// ---------------------------------------------------------------------------
// PinLayout
// ---------------------------------------------------------------------------

/// A build-time pin configuration.
pub trait PinLayout {
    /// Number of logical pins.
    const PIN_COUNT: usize;
    /// How slot words are interpreted.
    const ENCODING: Encoding;
    /// Per-pin endpoint storage.
    type Pin: Default + Clone + std::fmt::Debug;

    /// Inbound combination for one pin. `None` means the pin has no inbound
    /// endpoint and its slot is left alone.
    fn coerce_inbound(pin: &Self::Pin) -> Option<i64>;

    /// Outbound broadcast of one slot word to every active outbound endpoint.
    fn fan_out(pin: &mut Self::Pin, word: i64);

    fn is_active(pin: &Self::Pin, kind: EndpointKind) -> bool;

    fn activate(pin: &mut Self::Pin, kind: EndpointKind) -> Activation;

    /// Name suffix for an endpoint, appended after `<component>.pin.<i>.`.
    fn endpoint_suffix(kind: EndpointKind) -> &'static str {
        match (kind.ty, kind.dir) {
            (ValueType::Bit, Direction::In) => "bit-in",
            (ValueType::Bit, Direction::Out) => "bit-out",
            (ValueType::S32, Direction::In) => "s32-in",
            (ValueType::S32, Direction::Out) => "s32-out",
            (ValueType::Float, Direction::In) => "float-in",
            (ValueType::Float, Direction::Out) => "float-out",
        }
    }
}

// ---------------------------------------------------------------------------
// FloatLayout
// ---------------------------------------------------------------------------

/// 16 float pins, bit-for-bit through the slot.
#[derive(Debug, Clone, Copy)]
pub struct FloatLayout;

/// One float pin. Both endpoints always exist.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatPin {
    /// Written by the control loop, copied into the slot.
    pub input: f64,
    /// Written by the bridge from the slot.
    pub output: f64,
}

impl PinLayout for FloatLayout {
    const PIN_COUNT: usize = 16;
    const ENCODING: Encoding = Encoding::FloatBits;
    type Pin = FloatPin;

    #[inline]
    fn coerce_inbound(pin: &FloatPin) -> Option<i64> {
        Some(layout::float_to_word(pin.input))
    }

    #[inline]
    fn fan_out(pin: &mut FloatPin, word: i64) {
        pin.output = layout::word_to_float(word);
    }

    fn is_active(_pin: &FloatPin, kind: EndpointKind) -> bool {
        kind.ty == ValueType::Float
    }

    fn activate(_pin: &mut FloatPin, kind: EndpointKind) -> Activation {
        if kind.ty == ValueType::Float {
            Activation::AlreadyActive
        } else {
            Activation::Unsupported
        }
    }

    fn endpoint_suffix(kind: EndpointKind) -> &'static str {
        match kind.dir {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

// ---------------------------------------------------------------------------
// TypedLayout
// ---------------------------------------------------------------------------

/// 256 pins with optional bit, s32 and float endpoints in each direction.
#[derive(Debug, Clone, Copy)]
pub struct TypedLayout;

/// One multi-typed pin. `None` marks an endpoint that was never registered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TypedPin {
    bit_in: Option<bool>,
    s32_in: Option<i32>,
    float_in: Option<f64>,
    bit_out: Option<bool>,
    s32_out: Option<i32>,
    float_out: Option<f64>,
}

macro_rules! typed_endpoint {
    ($set:ident, $get:ident, $field:ident, $t:ty) => {
        /// Write the endpoint; returns `false` if it is not registered.
        #[inline]
        pub fn $set(&mut self, value: $t) -> bool {
            match self.$field.as_mut() {
                Some(v) => {
                    *v = value;
                    true
                }
                None => false,
            }
        }

        #[inline]
        pub fn $get(&self) -> Option<$t> {
            self.$field
        }
    };
}

impl TypedPin {
    typed_endpoint!(set_bit_in, bit_in, bit_in, bool);
    typed_endpoint!(set_s32_in, s32_in, s32_in, i32);
    typed_endpoint!(set_float_in, float_in, float_in, f64);
    typed_endpoint!(set_bit_out, bit_out, bit_out, bool);
    typed_endpoint!(set_s32_out, s32_out, s32_out, i32);
    typed_endpoint!(set_float_out, float_out, float_out, f64);

    fn has_inbound(&self) -> bool {
        self.bit_in.is_some() || self.s32_in.is_some() || self.float_in.is_some()
    }
}

impl PinLayout for TypedLayout {
    const PIN_COUNT: usize = 256;
    const ENCODING: Encoding = Encoding::GenericInteger;
    type Pin = TypedPin;

    /// Start from the bit endpoint (true -> 1, false -> 0), then overwrite
    /// with the s32 endpoint whenever it is non-zero. An s32 of exactly 0
    /// reads as "not set". The float inbound endpoint is registered but does
    /// not take part in the combination.
    #[inline]
    fn coerce_inbound(pin: &TypedPin) -> Option<i64> {
        if !pin.has_inbound() {
            return None;
        }
        let mut word = 0;
        if let Some(bit) = pin.bit_in {
            word = layout::bit_to_word(bit);
        }
        if let Some(v) = pin.s32_in {
            if v != 0 {
                word = layout::s32_to_word(v);
            }
        }
        Some(word)
    }

    #[inline]
    fn fan_out(pin: &mut TypedPin, word: i64) {
        if let Some(v) = pin.bit_out.as_mut() {
            *v = layout::word_to_bit(word);
        }
        if let Some(v) = pin.s32_out.as_mut() {
            *v = layout::word_to_s32(word);
        }
        if let Some(v) = pin.float_out.as_mut() {
            *v = layout::word_to_numeric_float(word);
        }
    }

    fn is_active(pin: &TypedPin, kind: EndpointKind) -> bool {
        match (kind.ty, kind.dir) {
            (ValueType::Bit, Direction::In) => pin.bit_in.is_some(),
            (ValueType::Bit, Direction::Out) => pin.bit_out.is_some(),
            (ValueType::S32, Direction::In) => pin.s32_in.is_some(),
            (ValueType::S32, Direction::Out) => pin.s32_out.is_some(),
            (ValueType::Float, Direction::In) => pin.float_in.is_some(),
            (ValueType::Float, Direction::Out) => pin.float_out.is_some(),
        }
    }

    fn activate(pin: &mut TypedPin, kind: EndpointKind) -> Activation {
        fn set<T: Default>(slot: &mut Option<T>) -> Activation {
            if slot.is_some() {
                return Activation::AlreadyActive;
            }
            *slot = Some(T::default());
            Activation::Activated
        }
        match (kind.ty, kind.dir) {
            (ValueType::Bit, Direction::In) => set(&mut pin.bit_in),
            (ValueType::Bit, Direction::Out) => set(&mut pin.bit_out),
            (ValueType::S32, Direction::In) => set(&mut pin.s32_in),
            (ValueType::S32, Direction::Out) => set(&mut pin.s32_out),
            (ValueType::Float, Direction::In) => set(&mut pin.float_in),
            (ValueType::Float, Direction::Out) => set(&mut pin.float_out),
        }
    }
}

// ---------------------------------------------------------------------------
// PinRegistry
// ---------------------------------------------------------------------------

/// Fixed-size table of pins for layout `L`, allocated once at startup.
#[derive(Debug, Clone)]
pub struct PinRegistry<L: PinLayout> {
    pins: Box<[L::Pin]>,
}

impl<L: PinLayout> PinRegistry<L> {
    const FITS: () = assert!(L::PIN_COUNT <= MAX_PINS, "layout does not fit the region");

    /// Allocate the table. Float pins come with both endpoints active; typed
    /// pins start with none.
    pub fn new() -> BridgeResult<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        layout::check_pin_count(L::PIN_COUNT)?;
        Ok(Self {
            pins: vec![L::Pin::default(); L::PIN_COUNT].into_boxed_slice(),
        })
    }

    pub const fn pin_count(&self) -> usize {
        L::PIN_COUNT
    }

    /// Register an endpoint on `pin`.
    pub fn register(&mut self, pin: usize, kind: EndpointKind) -> BridgeResult<()> {
        layout::check_pin(pin, L::PIN_COUNT)?;
        match L::activate(&mut self.pins[pin], kind) {
            Activation::Activated => Ok(()),
            Activation::AlreadyActive => Err(BridgeError::DuplicateEndpoint {
                name: format!("pin.{pin}.{}", L::endpoint_suffix(kind)),
            }),
            Activation::Unsupported => Err(BridgeError::InvalidConfig(format!(
                "pin {pin}: {:?} {:?} endpoints are not available in this layout",
                kind.ty, kind.dir
            ))),
        }
    }

    /// Register the same endpoint kinds on every pin.
    pub fn register_all(&mut self, kinds: &[EndpointKind]) -> BridgeResult<()> {
        for pin in 0..L::PIN_COUNT {
            for &kind in kinds {
                self.register(pin, kind)?;
            }
        }
        Ok(())
    }

    /// Active endpoint kinds on `pin`, in naming order.
    pub fn active_kinds(&self, pin: usize) -> impl Iterator<Item = EndpointKind> + '_ {
        let p = self.pins.get(pin);
        EndpointKind::ALL
            .into_iter()
            .filter(move |&k| p.is_some_and(|p| L::is_active(p, k)))
    }

    pub fn pin(&self, pin: usize) -> Option<&L::Pin> {
        self.pins.get(pin)
    }

    pub fn pin_mut(&mut self, pin: usize) -> Option<&mut L::Pin> {
        self.pins.get_mut(pin)
    }

    pub fn pins(&self) -> &[L::Pin] {
        &self.pins
    }

    pub(crate) fn pins_mut(&mut self) -> &mut [L::Pin] {
        &mut self.pins
    }
}
