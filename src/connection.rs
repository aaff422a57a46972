// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Connection manager: owns the mapped region, or the absence of one.
//
// `acquire` and `release` may block (open/mmap/munmap/close) and are only
// called outside the periodic path. `is_connected` is a plain field read.

use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::region::ShmRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Single owner of the shared region handle.
///
/// Connected exactly when a handle is held.
#[derive(Debug)]
pub struct Connection {
    path: PathBuf,
    region: Option<ShmRegion>,
    last_error: Option<io::ErrorKind>,
}

impl Connection {
    /// A disconnected manager for the region at `path`. Nothing is opened.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            region: None,
            last_error: None,
        }
    }

    /// Try to open and map the region.
    ///
    /// A failure leaves the manager Disconnected with no handle; it is logged
    /// and recorded, never returned. Calling this while connected keeps the
    /// existing mapping.
    pub fn acquire(&mut self) -> ConnectionState {
        if self.region.is_some() {
            return ConnectionState::Connected;
        }
        match ShmRegion::open(&self.path) {
            Ok(region) => {
                info!(
                    "connected to shared memory {} (mapped at {:p})",
                    self.path.display(),
                    region.slot_ptr(0)
                );
                self.region = Some(region);
                self.last_error = None;
                ConnectionState::Connected
            }
            Err(e) => {
                warn!(
                    "failed to map shared memory {}: {e} (is the peer running?)",
                    self.path.display()
                );
                self.last_error = Some(e.kind());
                ConnectionState::Disconnected
            }
        }
    }

    /// Unmap and close the region if held. Safe to call any number of times.
    pub fn release(&mut self) {
        if let Some(region) = self.region.take() {
            info!("released shared memory {}", region.path().display());
        }
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.region.is_some()
    }

    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    #[inline]
    pub fn region(&self) -> Option<&ShmRegion> {
        self.region.as_ref()
    }

    /// Kind of the most recent acquisition failure, cleared on success.
    pub fn last_error(&self) -> Option<io::ErrorKind> {
        self.last_error
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.release();
    }
}
