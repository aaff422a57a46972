// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Real-time thread priority for a driver thread that calls `Bridge::update`
// on a fixed period. Hosts with their own scheduler never need this.

use std::io;

/// SCHED_FIFO priority used for the servo thread.
pub const SERVO_PRIORITY: i32 = 80;

/// Promote the calling thread to real-time scheduling.
///
/// Requires CAP_SYS_NICE (or root) on Linux. Unsupported elsewhere.
pub fn set_realtime_priority() -> io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        let param = libc::sched_param {
            sched_priority: SERVO_PRIORITY,
        };
        let eno =
            unsafe { libc::pthread_setschedparam(libc::pthread_self(), libc::SCHED_FIFO, &param) };
        if eno != 0 {
            return Err(io::Error::from_raw_os_error(eno));
        }
        Ok(())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "real-time scheduling is only wired up on Linux",
        ))
    }
}

/// Period in nanoseconds of a servo thread running at `rate_hz`.
pub fn servo_period_ns(rate_hz: u32) -> u64 {
    if rate_hz == 0 {
        return 0;
    }
    1_000_000_000 / rate_hz as u64
}
