// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// POSIX file-backed shared mapping.
// The bridge only ever opens a region the peer has already created and
// sized; `create` exists for the peer side and for tests.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

// ---------------------------------------------------------------------------
// PlatformMap — read-write MAP_SHARED view of a regular file
// ---------------------------------------------------------------------------

pub struct PlatformMap {
    mem: *mut u8,
    len: usize,
    fd: libc::c_int,
}

// Safety: the mapping is process-shared by design; all word access goes
// through atomics in `region`.
unsafe impl Send for PlatformMap {}
unsafe impl Sync for PlatformMap {}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

impl PlatformMap {
    /// Open an existing file read-write and map its first `size` bytes.
    ///
    /// Fails without mapping if the file is absent or shorter than `size`;
    /// touching pages past the end of a short file would fault.
    pub fn open_existing(path: &Path, size: usize) -> io::Result<Self> {
        if size == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "size is 0"));
        }
        let c_name = c_path(path)?;

        let fd = unsafe { libc::open(c_name.as_ptr(), libc::O_RDWR | libc::O_CLOEXEC) };
        if fd == -1 {
            return Err(io::Error::last_os_error());
        }

        let mut st: libc::stat = unsafe { std::mem::zeroed() };
        if unsafe { libc::fstat(fd, &mut st) } != 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(err);
        }
        if (st.st_size as u64) < size as u64 {
            unsafe { libc::close(fd) };
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} is {} bytes, region needs {size}",
                    path.display(),
                    st.st_size
                ),
            ));
        }

        Self::map_fd(fd, size)
    }

    /// Create (or reuse) `path`, size it to `size` bytes and map it.
    pub fn create(path: &Path, size: usize) -> io::Result<Self> {
        if size == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "size is 0"));
        }
        let c_name = c_path(path)?;

        let perms: libc::mode_t = 0o666;
        let fd = unsafe {
            libc::open(
                c_name.as_ptr(),
                libc::O_RDWR | libc::O_CREAT | libc::O_CLOEXEC,
                perms as libc::c_uint,
            )
        };
        if fd == -1 {
            return Err(io::Error::last_os_error());
        }

        if unsafe { libc::ftruncate(fd, size as libc::off_t) } != 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(err);
        }

        Self::map_fd(fd, size)
    }

    fn map_fd(fd: libc::c_int, len: usize) -> io::Result<Self> {
        let mem = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        if mem == libc::MAP_FAILED {
            let err = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(err);
        }

        Ok(Self {
            mem: mem as *mut u8,
            len,
            fd,
        })
    }

    /// Start of the mapping (page aligned).
    pub fn as_ptr(&self) -> *const u8 {
        self.mem
    }

    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.mem
    }

    /// Mapped length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }
}

impl Drop for PlatformMap {
    fn drop(&mut self) {
        if !self.mem.is_null() {
            unsafe { libc::munmap(self.mem as *mut libc::c_void, self.len) };
            self.mem = ptr::null_mut();
        }
        if self.fd >= 0 {
            unsafe { libc::close(self.fd) };
            self.fd = -1;
        }
    }
}
