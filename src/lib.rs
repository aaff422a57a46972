// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Real-time-safe pin bridge between a periodic control loop and a peer
// process, exchanging typed scalars through a fixed 4096-byte shared region.

pub mod layout;

mod platform;

mod region;
pub use region::ShmRegion;

pub mod error;
pub use error::{BridgeError, BridgeResult};

pub mod pin;
pub use pin::{
    Direction, EndpointKind, FloatLayout, FloatPin, PinLayout, PinRegistry, TypedLayout,
    TypedPin, ValueType,
};

pub mod names;

pub mod config;
pub use config::BridgeConfig;

mod connection;
pub use connection::{Connection, ConnectionState};

mod bridge;
pub use bridge::{Bridge, BridgeStatus};

pub mod peer;
pub use peer::PeerRegion;

pub mod rt_prio;

/// Bridge for the 16-pin float layout.
pub type FloatBridge = Bridge<FloatLayout>;

/// Bridge for the 256-pin bit/s32/float layout.
pub type TypedBridge = Bridge<TypedLayout>;
