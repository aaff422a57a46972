// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// The peer side of the region contract: creates and sizes the file,
// publishes the pin count, consumes the notification flag.

use std::io;
use std::path::Path;

use crate::layout::{self, PIN_COUNT_SLOT, UPDATE_FLAG_SLOT};
use crate::region::ShmRegion;

/// A peer's mapping of the pin region.
#[derive(Debug)]
pub struct PeerRegion {
    region: ShmRegion,
    pin_count: usize,
}

impl PeerRegion {
    /// Create or reuse the file at `path`, zero every slot and publish
    /// `pin_count`.
    pub fn create(path: &Path, pin_count: usize) -> io::Result<Self> {
        layout::check_pin_count(pin_count)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let region = ShmRegion::create(path)?;
        for word in region.words() {
            word.store(0, std::sync::atomic::Ordering::Relaxed);
        }
        region.store(PIN_COUNT_SLOT, pin_count as i64);
        Ok(Self { region, pin_count })
    }

    pub fn pin_count(&self) -> usize {
        self.pin_count
    }

    /// Return whether the bridge completed a cycle since the last call, and
    /// clear the flag.
    pub fn take_update_flag(&self) -> bool {
        let raised = self.region.load(UPDATE_FLAG_SLOT) != 0;
        if raised {
            self.region.store(UPDATE_FLAG_SLOT, 0);
        }
        raised
    }

    /// Raw word of `pin`, or `None` past the published pin count.
    pub fn read_pin(&self, pin: usize) -> Option<i64> {
        (pin < self.pin_count).then(|| self.region.load(layout::slot_address(pin)))
    }

    /// Store a raw word into `pin`; returns `false` past the pin count.
    pub fn write_pin(&self, pin: usize, word: i64) -> bool {
        if pin >= self.pin_count {
            return false;
        }
        self.region.store(layout::slot_address(pin), word);
        true
    }

    pub fn read_pin_float(&self, pin: usize) -> Option<f64> {
        self.read_pin(pin).map(layout::word_to_float)
    }

    pub fn write_pin_float(&self, pin: usize, value: f64) -> bool {
        self.write_pin(pin, layout::float_to_word(value))
    }

    pub fn region(&self) -> &ShmRegion {
        &self.region
    }

    /// Remove the backing file. The mapping stays valid until drop.
    pub fn unlink(&self) -> io::Result<()> {
        std::fs::remove_file(self.region.path())
    }
}
