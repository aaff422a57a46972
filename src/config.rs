// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Startup configuration for the bridge.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{BridgeError, BridgeResult};
use crate::layout::REGION_SIZE;

/// Path the peer creates the region at.
pub const DEFAULT_SHM_PATH: &str = "/tmp/hal_pins.shm";

/// Prefix of every exported point name.
pub const DEFAULT_COMPONENT: &str = "microkernel";

pub const ENV_SHM_PATH: &str = "PINBRIDGE_SHM_PATH";
pub const ENV_COMPONENT: &str = "PINBRIDGE_COMPONENT";
pub const ENV_PERIOD_US: &str = "PINBRIDGE_PERIOD_US";

/// Configuration for a bridge instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Region file shared with the peer.
    pub shm_path: PathBuf,
    /// Region size in bytes; must equal the protocol size.
    pub region_size: usize,
    /// Prefix for exported names (e.g. `"microkernel"`).
    pub component: String,
    /// Nominal period of the host scheduler. Used by drivers, never by the
    /// cycle itself.
    pub period: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            shm_path: PathBuf::from(DEFAULT_SHM_PATH),
            region_size: REGION_SIZE,
            component: DEFAULT_COMPONENT.to_owned(),
            period: Duration::from_millis(1),
        }
    }
}

impl BridgeConfig {
    pub fn new(shm_path: impl Into<PathBuf>) -> Self {
        Self {
            shm_path: shm_path.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `PINBRIDGE_*` environment variables.
    pub fn from_env() -> BridgeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit lookup, so
    /// callers can feed values from somewhere other than the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> BridgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(path) = lookup(ENV_SHM_PATH) {
            cfg.shm_path = PathBuf::from(path);
        }
        if let Some(component) = lookup(ENV_COMPONENT) {
            cfg.component = component;
        }
        if let Some(raw) = lookup(ENV_PERIOD_US) {
            let us: u64 = raw.trim().parse().map_err(|_| {
                BridgeError::InvalidConfig(format!("{ENV_PERIOD_US}={raw:?} is not an integer"))
            })?;
            cfg.period = Duration::from_micros(us);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.region_size != REGION_SIZE {
            return Err(BridgeError::InvalidConfig(format!(
                "region size {} does not match the protocol size {REGION_SIZE}",
                self.region_size
            )));
        }
        if self.shm_path.as_os_str().is_empty() {
            return Err(BridgeError::InvalidConfig("shm path is empty".into()));
        }
        if self.component.is_empty() {
            return Err(BridgeError::InvalidConfig("component name is empty".into()));
        }
        if self.period.is_zero() {
            return Err(BridgeError::InvalidConfig("period must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_the_peer_convention() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.shm_path, PathBuf::from("/tmp/hal_pins.shm"));
        assert_eq!(cfg.region_size, 4096);
        assert_eq!(cfg.component, "microkernel");
        cfg.validate().unwrap();
    }

    #[test]
    fn lookup_overrides() {
        let cfg = BridgeConfig::from_lookup(lookup(&[
            (ENV_SHM_PATH, "/dev/shm/pins"),
            (ENV_COMPONENT, "mk2"),
            (ENV_PERIOD_US, "250"),
        ]))
        .unwrap();
        assert_eq!(cfg.shm_path, PathBuf::from("/dev/shm/pins"));
        assert_eq!(cfg.component, "mk2");
        assert_eq!(cfg.period, Duration::from_micros(250));
    }

    #[test]
    fn bad_period_is_a_config_error() {
        let err = BridgeConfig::from_lookup(lookup(&[(ENV_PERIOD_US, "fast")])).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
        let err = BridgeConfig::from_lookup(lookup(&[(ENV_PERIOD_US, "0")])).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
    }

    #[test]
    fn wrong_region_size_is_rejected() {
        let cfg = BridgeConfig {
            region_size: 8192,
            ..BridgeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
