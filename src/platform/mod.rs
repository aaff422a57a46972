// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors

#[cfg(unix)]
pub mod posix;

#[cfg(not(unix))]
pub mod unsupported;

// Re-export the platform-specific implementation under a uniform name.

#[cfg(unix)]
pub use posix::PlatformMap;

#[cfg(not(unix))]
pub use unsupported::PlatformMap;
