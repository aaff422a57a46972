// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Setup-phase error taxonomy.
// Everything here is raised before the bridge reaches the ready state; the
// periodic path never returns an error and absorbs faults into counters.

use std::io;

/// Convenience result alias for fallible setup operations.
pub type BridgeResult<T, E = BridgeError> = Result<T, E>;

/// Errors surfaced while configuring the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The layout asks for more pins than the region has value slots.
    #[error("pin count {pins} exceeds region capacity of {capacity} value slots")]
    PinCountExceedsRegion { pins: usize, capacity: usize },

    /// A pin index outside `0..pin_count` was used during registration.
    #[error("pin {pin} is out of range (layout has {pin_count} pins)")]
    PinOutOfRange { pin: usize, pin_count: usize },

    /// The same typed endpoint was registered twice on one pin.
    #[error("endpoint {name} is already registered")]
    DuplicateEndpoint { name: String },

    /// Two exported points resolve to the same name.
    #[error("name collision on {name}")]
    NameCollision { name: String },

    /// An exported point name exceeds the registration layer's limit.
    #[error("name {name} is longer than {max} characters")]
    EndpointNameTooLong { name: String, max: usize },

    /// A configuration value is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An OS call failed in a path where the failure is not absorbed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
