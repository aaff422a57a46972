// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Word-level view of the mapped pin region.
//
// Each slot is accessed as an `AtomicI64` with `Relaxed` ordering: a plain
// aligned 64-bit load or store on the targets we build for, with no fence and
// no read-modify-write. The peer writes the same words without any lock, so
// a value can change between any two accesses. A reader can only observe a
// torn value if the peer itself performs narrower, split stores into a slot
// or the platform lacks native 64-bit atomics (the crate does not build
// there). Tests in `tests/test_region.rs` pin the alignment this relies on.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::layout::{PIN_COUNT_SLOT, REGION_SIZE, REGION_WORDS, UPDATE_FLAG_SLOT, WORD_SIZE};
use crate::platform::PlatformMap;

/// A mapped 4096-byte pin region.
///
/// Dropping the region unmaps it and closes the backing file.
pub struct ShmRegion {
    map: PlatformMap,
    path: PathBuf,
}

impl std::fmt::Debug for ShmRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShmRegion")
            .field("path", &self.path)
            .field("base", &self.map.as_ptr())
            .finish()
    }
}

impl ShmRegion {
    /// Map an existing region file. Never creates or resizes it.
    pub fn open(path: &Path) -> io::Result<Self> {
        let map = PlatformMap::open_existing(path, REGION_SIZE)?;
        Self::from_map(map, path)
    }

    /// Create and size the region file (peer side).
    pub fn create(path: &Path) -> io::Result<Self> {
        let map = PlatformMap::create(path, REGION_SIZE)?;
        Self::from_map(map, path)
    }

    fn from_map(map: PlatformMap, path: &Path) -> io::Result<Self> {
        if map.as_ptr() as usize % std::mem::align_of::<AtomicI64>() != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mapping is not aligned to the slot width",
            ));
        }
        debug_assert!(map.len() >= REGION_WORDS * WORD_SIZE);
        Ok(Self {
            map,
            path: path.to_path_buf(),
        })
    }

    /// All 512 slots.
    #[inline]
    pub fn words(&self) -> &[AtomicI64] {
        // Safety: the mapping is REGION_SIZE bytes, aligned (checked in
        // `from_map`) and lives as long as `self`.
        unsafe {
            std::slice::from_raw_parts(self.map.as_mut_ptr() as *const AtomicI64, REGION_WORDS)
        }
    }

    #[inline]
    pub fn load(&self, slot: usize) -> i64 {
        self.words()[slot].load(Ordering::Relaxed)
    }

    #[inline]
    pub fn store(&self, slot: usize, word: i64) {
        self.words()[slot].store(word, Ordering::Relaxed);
    }

    /// Pin count published by the peer in slot 0.
    pub fn published_pin_count(&self) -> i64 {
        self.load(PIN_COUNT_SLOT)
    }

    /// Current value of the update-notification flag.
    pub fn update_flag(&self) -> i64 {
        self.load(UPDATE_FLAG_SLOT)
    }

    /// Address of a slot; exposed for alignment checks.
    pub fn slot_ptr(&self, slot: usize) -> *const i64 {
        &self.words()[slot] as *const AtomicI64 as *const i64
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
