// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350A IR Remote Dart Turret
//!
//! This firmware drives a three-servo dart turret from an NEC IR remote using
//! the Embassy runtime.
//!
//! # Hardware Configuration
//! - **Microcontroller**: RP2350A (ARM Cortex-M33)
//! - **Servos**: yaw on GPIO 10, pitch on GPIO 12, roll on GPIO 14 (50 Hz PWM)
//! - **IR Receiver**: NEC protocol decoder on GPIO 5
//! - **Status LED**: GPIO 25
//!
//! # Features
//! - Passcode lock (default `1234`), relocked with `*`
//! - Directional control and single-dart fire once unlocked
//! - Record (`7`) and play back (`8`) movement sequences
//! - Shake-and-fire combo (`9`) and autonomous roulette mode (`#`)
//! - Real-time defmt logging for debugging
//!
//! # Build
//! ```bash
//! cargo build --release --target thumbv8m.main-none-eabihf --features rp2350
//! ```
//!
//! # Flash
//! ```bash
//! cargo run --release --target thumbv8m.main-none-eabihf --features rp2350
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Delay, Timer};
use ir_turret::actuator::Actuators;
use ir_turret::config::{POLL_INTERVAL_MS, SERVO_PWM_DIVIDER, SERVO_PWM_TOP, TurretConfig};
use ir_turret::controller::TurretController;
use ir_turret::ir_receiver::IrReceiver;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use {defmt_rtt as _, panic_probe as _};

/// Program metadata for picotool info command
///
/// This information is embedded in the binary and can be read by picotool
/// to display program information when querying the firmware.
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"IR Turret"),
    embassy_rp::binary_info::rp_program_description!(c"RP2350A Dart Turret with IR Remote Control"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Main turret task
///
/// Initializes the servos and IR receiver, homes the turret, and then polls
/// the remote forever. Each event is handled to completion before the next
/// poll, so gestures and roulette sessions block input while they run.
///
/// # Safety
/// Never returns. Runs indefinitely until power loss or reset.
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("RP2350A IR Turret Starting!");
    let p = embassy_rp::init(Default::default());

    // Initialize status LED on GPIO 25
    let mut led = Output::new(p.PIN_25, Level::Low);

    // 1µs ticks, 20ms frame
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = SERVO_PWM_DIVIDER.into();
    pwm_config.top = SERVO_PWM_TOP;
    pwm_config.compare_a = 0;

    let yaw = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, pwm_config.clone());
    let pitch = Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, pwm_config.clone());
    let roll = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, pwm_config.clone());

    let config = TurretConfig::default();
    let actuators = Actuators::new(yaw, pitch, roll, Delay, config.motion);
    let rng = SmallRng::seed_from_u64(RoscRng.next_u64());

    let mut turret = match TurretController::new(actuators, rng, config) {
        Ok(turret) => turret,
        Err(e) => {
            error!("Invalid turret configuration: {}", e);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };
    turret.home();

    // Initialize IR receiver input on GPIO 5 with pull-up
    let ir_pin = Input::new(p.PIN_5, Pull::Up);
    let mut ir = IrReceiver::new(&ir_pin);

    info!("Turret ready! Enter passcode...");
    led.set_high();

    // Main control loop
    loop {
        if let Some(event) = ir.read_event() {
            // Toggle LED to indicate command reception
            led.toggle();
            debug!("IR 0x{:02X} repeat={}", event.command, event.repeat);
            turret.handle_event(event);
        }
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}
