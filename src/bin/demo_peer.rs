// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Peer side of the pin bridge demo.
//
// Usage: demo_peer [--typed] [seconds]
//
// Creates the region file (PINBRIDGE_SHM_PATH or /tmp/hal_pins.shm),
// publishes the pin count, then polls the notification flag. In typed mode
// it also drives pins 200..208, which demo_bridge registers as outbound only.

use std::thread;
use std::time::{Duration, Instant};

use log::{error, info};

use pinbridge::{BridgeConfig, FloatLayout, PeerRegion, PinLayout, TypedLayout};

const PEER_DRIVEN_PINS: std::ops::Range<usize> = 200..208;

fn main() {
    env_logger::init();

    let mut typed = false;
    let mut seconds = 10u64;
    for arg in std::env::args().skip(1) {
        if arg == "--typed" {
            typed = true;
        } else if let Ok(s) = arg.parse() {
            seconds = s;
        } else {
            eprintln!("usage: demo_peer [--typed] [seconds]");
            std::process::exit(1);
        }
    }

    let config = match BridgeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("peer: {e}");
            std::process::exit(1);
        }
    };
    let pin_count = if typed {
        TypedLayout::PIN_COUNT
    } else {
        FloatLayout::PIN_COUNT
    };

    let peer = match PeerRegion::create(&config.shm_path, pin_count) {
        Ok(p) => p,
        Err(e) => {
            error!("peer: cannot create {}: {e}", config.shm_path.display());
            std::process::exit(1);
        }
    };
    info!(
        "peer: region {} ready with {pin_count} pins",
        config.shm_path.display()
    );

    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut cycles_seen = 0u64;
    let mut tick = 0i64;
    let mut last_report = Instant::now();

    while Instant::now() < deadline {
        if peer.take_update_flag() {
            cycles_seen += 1;
        }
        if typed {
            for pin in PEER_DRIVEN_PINS {
                peer.write_pin(pin, tick + pin as i64);
            }
            tick += 1;
        }
        if last_report.elapsed() >= Duration::from_secs(1) {
            last_report = Instant::now();
            if typed {
                println!(
                    "peer: flags_seen={cycles_seen}  pin3={:?}  pin200={:?}",
                    peer.read_pin(3),
                    peer.read_pin(200)
                );
            } else {
                println!(
                    "peer: flags_seen={cycles_seen}  pin0={:?}  pin1={:?}",
                    peer.read_pin_float(0),
                    peer.read_pin_float(1)
                );
            }
        }
        thread::sleep(Duration::from_millis(10));
    }

    info!("peer: done after {cycles_seen} observed updates");
    if let Err(e) = peer.unlink() {
        error!("peer: failed to remove {}: {e}", config.shm_path.display());
    }
}
