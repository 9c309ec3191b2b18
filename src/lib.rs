// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Control logic for an IR remote operated dart turret.
//!
//! The turret has three servos: yaw spins the base, pitch tilts the barrel,
//! and roll advances the barrel to fire darts. A remote decoded by the NEC
//! receiver drives it through a single-threaded interpreter:
//!
//! ```text
//! IrEvent -> TurretController --+--> PasscodeGate
//!                               +--> Recorder (playback re-enters the controller)
//!                               +--> motion routines --> Actuators --> servos
//!                               +--> roulette --------/
//! ```
//!
//! Everything except the GPIO receiver and the firmware entry point is
//! hardware independent: servos are any [`embedded_hal::pwm::SetDutyCycle`]
//! output and timing comes from a blocking [`embedded_hal::delay::DelayNs`].
//!
//! # Features
//! - `rp2350`: firmware binary and GPIO IR receiver (implies `defmt`)
//! - `defmt`: log through `defmt`
//! - `log`: log through the `log` facade

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod actuator;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
#[cfg(feature = "rp2350")]
pub mod ir_receiver;
pub mod motion;
pub mod nec;
pub mod passcode;
pub mod recorder;
pub mod roulette;
pub mod servo;

#[cfg(test)]
mod mock;

pub use actuator::{Actuators, Channel, Rotor};
pub use command::{Action, Direction, Key};
pub use config::{MotionConfig, RouletteConfig, TurretConfig};
pub use controller::TurretController;
pub use error::ConfigError;
pub use nec::IrEvent;
pub use roulette::RouletteReport;
