// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// The per-period update cycle and the bridge that owns it.
//
// `Bridge::update` is the only function meant to run on the real-time path.
// It takes `&mut self`, so the host cannot re-enter it, and it performs no
// allocation, locking, logging or I/O. Everything that may block or fail
// loudly happens in `start` / `acquire` / `release`.

use log::{error, info, warn};

use crate::config::BridgeConfig;
use crate::connection::{Connection, ConnectionState};
use crate::error::BridgeResult;
use crate::layout::{slot_address, UPDATE_FLAG_SLOT};
use crate::names::NameTable;
use crate::pin::{PinLayout, PinRegistry};

/// Operator-visible status points.
///
/// Counters wrap on overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStatus {
    pub connected: bool,
    /// Completed cycles.
    pub update_count: u32,
    /// Cycles skipped because no region was mapped.
    pub error_count: u32,
}

/// Pins, the region connection and the counters for layout `L`.
#[derive(Debug)]
pub struct Bridge<L: PinLayout> {
    registry: PinRegistry<L>,
    connection: Connection,
    names: NameTable,
    status: BridgeStatus,
}

impl<L: PinLayout> Bridge<L> {
    /// Validate the configuration and names without touching the region.
    pub fn new(config: &BridgeConfig, registry: PinRegistry<L>) -> BridgeResult<Self> {
        config.validate()?;
        let names = NameTable::build(&config.component, &registry).map_err(|e| {
            error!("{}: {e}", config.component);
            e
        })?;
        Ok(Self {
            registry,
            connection: Connection::new(config.shm_path.clone()),
            names,
            status: BridgeStatus::default(),
        })
    }

    /// [`new`](Self::new) followed by one [`acquire`](Self::acquire).
    ///
    /// Only configuration errors are returned; a missing region leaves the
    /// bridge loaded but Disconnected.
    pub fn start(config: &BridgeConfig, registry: PinRegistry<L>) -> BridgeResult<Self> {
        let mut bridge = Self::new(config, registry)?;
        if bridge.acquire() == ConnectionState::Disconnected {
            warn!("{}: loaded but not connected to the peer", config.component);
        }
        info!(
            "{}: bridge loaded with {} pins ({:?})",
            config.component,
            L::PIN_COUNT,
            L::ENCODING
        );
        Ok(bridge)
    }

    /// Map the region if not already mapped. Not for the periodic path.
    pub fn acquire(&mut self) -> ConnectionState {
        let state = self.connection.acquire();
        self.status.connected = state == ConnectionState::Connected;
        if let Some(region) = self.connection.region() {
            let published = region.published_pin_count();
            if published != L::PIN_COUNT as i64 {
                warn!(
                    "peer publishes {published} pins, bridge is built for {}",
                    L::PIN_COUNT
                );
            }
        }
        state
    }

    /// Operator-triggered retry after a failed start. Cycles never call it.
    pub fn reconnect(&mut self) -> ConnectionState {
        if self.connection.is_connected() {
            return ConnectionState::Connected;
        }
        info!("retrying connection to {}", self.connection.path().display());
        self.acquire()
    }

    /// Unmap the region. Idempotent.
    pub fn release(&mut self) {
        self.connection.release();
        self.status.connected = false;
    }

    /// Release and log; called once by the host at unload.
    pub fn shutdown(&mut self) {
        info!(
            "shutting down bridge after {} updates, {} skipped cycles",
            self.status.update_count, self.status.error_count
        );
        self.release();
    }

    /// One cycle: all inbound pins to their slots, then all slots to the
    /// outbound pins, then raise the notification flag.
    ///
    /// When disconnected the cycle only bumps `error_count`; no slot and no
    /// outbound endpoint is touched.
    pub fn update(&mut self) {
        let Some(region) = self.connection.region() else {
            self.status.error_count = self.status.error_count.wrapping_add(1);
            return;
        };
        let pins = self.registry.pins_mut();

        for (i, pin) in pins.iter().enumerate() {
            if let Some(word) = L::coerce_inbound(pin) {
                region.store(slot_address(i), word);
            }
        }

        for (i, pin) in pins.iter_mut().enumerate() {
            L::fan_out(pin, region.load(slot_address(i)));
        }

        // Advisory only: the peer clears it, nothing orders it against the
        // slot stores above.
        region.store(UPDATE_FLAG_SLOT, 1);
        self.status.update_count = self.status.update_count.wrapping_add(1);
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn status(&self) -> BridgeStatus {
        self.status
    }

    pub fn registry(&self) -> &PinRegistry<L> {
        &self.registry
    }

    /// Host-side access to the endpoints between cycles.
    pub fn registry_mut(&mut self) -> &mut PinRegistry<L> {
        &mut self.registry
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    #[doc(hidden)]
    pub fn set_counters(&mut self, update_count: u32, error_count: u32) {
        self.status.update_count = update_count;
        self.status.error_count = error_count;
    }
}
