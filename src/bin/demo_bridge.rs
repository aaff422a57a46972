// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Control-loop side of the pin bridge demo.
//
// Usage: demo_bridge [seconds]
//
// Stands in for the host scheduler: loads the bridge, then calls
// `Bridge::update` once per PINBRIDGE_PERIOD_US (default 1 ms) while feeding
// the inbound endpoints. Build with `--features typed-pins` to run against
// the 256-pin layout (pair with `demo_peer --typed`).

use std::thread;
use std::time::{Duration, Instant};

use log::{error, info, warn};

use pinbridge::rt_prio::set_realtime_priority;
use pinbridge::{Bridge, BridgeConfig, PinLayout, PinRegistry};

#[cfg(not(feature = "typed-pins"))]
mod variant {
    use pinbridge::{BridgeResult, FloatLayout, PinRegistry};

    pub type Layout = FloatLayout;

    pub fn registry() -> BridgeResult<PinRegistry<Layout>> {
        PinRegistry::new()
    }

    /// Pin i carries a slow sine with phase offset i.
    pub fn feed(registry: &mut PinRegistry<Layout>, t: f64) {
        for i in 0..registry.pin_count() {
            if let Some(pin) = registry.pin_mut(i) {
                pin.input = (t + i as f64).sin();
            }
        }
    }

    pub fn report(registry: &PinRegistry<Layout>) -> String {
        let out = |i| registry.pin(i).map(|p| p.output).unwrap_or_default();
        format!("pin0.out={:.4}  pin1.out={:.4}", out(0), out(1))
    }
}

#[cfg(feature = "typed-pins")]
mod variant {
    use pinbridge::{BridgeResult, Direction, EndpointKind, PinRegistry, TypedLayout, ValueType};

    pub type Layout = TypedLayout;

    const IN: [EndpointKind; 2] = [
        EndpointKind::new(ValueType::Bit, Direction::In),
        EndpointKind::new(ValueType::S32, Direction::In),
    ];
    const OUT: [EndpointKind; 3] = [
        EndpointKind::new(ValueType::Bit, Direction::Out),
        EndpointKind::new(ValueType::S32, Direction::Out),
        EndpointKind::new(ValueType::Float, Direction::Out),
    ];

    /// Pins 0..8 are written by the control loop, 200..208 by the peer.
    pub fn registry() -> BridgeResult<PinRegistry<Layout>> {
        let mut reg = PinRegistry::new()?;
        for pin in 0..8 {
            for kind in IN.iter().chain(OUT.iter()) {
                reg.register(pin, *kind)?;
            }
        }
        for pin in 200..208 {
            for kind in OUT {
                reg.register(pin, kind)?;
            }
        }
        Ok(reg)
    }

    pub fn feed(registry: &mut PinRegistry<Layout>, t: f64) {
        let step = (t * 10.0) as i32;
        for i in 0..8 {
            if let Some(pin) = registry.pin_mut(i) {
                pin.set_bit_in(step % 2 == 0);
                pin.set_s32_in(if i == 3 { 42 } else { step * i as i32 });
            }
        }
    }

    pub fn report(registry: &PinRegistry<Layout>) -> String {
        let pin = |i| registry.pin(i).copied().unwrap_or_default();
        format!(
            "pin3.s32-out={:?}  pin200.s32-out={:?}  pin200.bit-out={:?}",
            pin(3).s32_out(),
            pin(200).s32_out(),
            pin(200).bit_out()
        )
    }
}

fn main() {
    env_logger::init();

    let seconds: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let config = match BridgeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("bridge: {e}");
            std::process::exit(1);
        }
    };

    let registry: PinRegistry<variant::Layout> = match variant::registry() {
        Ok(r) => r,
        Err(e) => {
            error!("bridge: {e}");
            std::process::exit(1);
        }
    };

    let mut bridge = match Bridge::start(&config, registry) {
        Ok(b) => b,
        Err(e) => {
            error!("bridge: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "bridge: exporting {} points for {} pins",
        bridge.names().len(),
        variant::Layout::PIN_COUNT
    );

    if let Err(e) = set_realtime_priority() {
        warn!("bridge: running without real-time priority: {e}");
    }

    let started = Instant::now();
    let stop_at = started + Duration::from_secs(seconds);
    let mut next = started;
    let mut last_report = started;

    while Instant::now() < stop_at {
        variant::feed(bridge.registry_mut(), started.elapsed().as_secs_f64());
        bridge.update();

        if last_report.elapsed() >= Duration::from_secs(1) {
            last_report = Instant::now();
            let st = bridge.status();
            println!(
                "bridge: connected={}  updates={}  errors={}  {}",
                st.connected,
                st.update_count,
                st.error_count,
                variant::report(bridge.registry())
            );
        }

        next += config.period;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        } else {
            next = now;
        }
    }

    bridge.shutdown();
}
