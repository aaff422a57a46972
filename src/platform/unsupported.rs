// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Fallback for targets without POSIX file mappings. Every acquisition fails,
// which leaves the bridge in Disconnected mode.

use std::io;
use std::path::Path;

pub struct PlatformMap {
    _never: std::convert::Infallible,
}

impl PlatformMap {
    pub fn open_existing(_path: &Path, _size: usize) -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "shared file mappings are not supported on this platform",
        ))
    }

    pub fn create(path: &Path, size: usize) -> io::Result<Self> {
        Self::open_existing(path, size)
    }

    pub fn as_ptr(&self) -> *const u8 {
        match self._never {}
    }

    pub fn as_mut_ptr(&self) -> *mut u8 {
        match self._never {}
    }

    pub fn len(&self) -> usize {
        match self._never {}
    }
}
