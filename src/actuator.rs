// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Three-axis servo turret actuators.
//!
//! This module wraps the three servo channels of the turret and the blocking
//! delay used to time their motion:
//!
//! - **Yaw**: continuous-rotation servo spinning the turret on its base
//! - **Pitch**: positional servo tilting the barrel, confined to safe angles
//! - **Roll**: continuous-rotation servo advancing the dart barrel
//!
//! Motion is open loop. A move is a speed write, a blocking hold, and a stop
//! write; nothing else runs while a hold is in progress.
//!
//! # Examples
//!
//! ```ignore
//! use actuator::{Actuators, Rotor, Channel};
//!
//! let mut turret = Actuators::new(yaw, pitch, roll, Delay, MotionConfig::default());
//! turret.home();
//!
//! // Spin left for 150ms, then stop
//! turret.set_speed(Rotor::Yaw, 90);
//! turret.hold_for(Channel::Yaw, 150);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::MotionConfig;
use crate::servo::Servo;

/// One of the three motor axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Yaw,
    Pitch,
    Roll,
}

/// A continuous-rotation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotor {
    Yaw,
    Roll,
}

/// Servo channels of the turret plus the delay that sequences them.
///
/// Owns the current value of every channel. The pitch value is kept inside
/// `[pitch_min, pitch_max]` at all times.
pub struct Actuators<P, D> {
    /// Base rotation servo
    yaw: Servo<P>,
    /// Barrel tilt servo
    pitch: Servo<P>,
    /// Barrel advance servo
    roll: Servo<P>,
    /// Blocking delay used for every hold
    delay: D,
    /// Channel geometry and timing
    motion: MotionConfig,
}

impl<P: SetDutyCycle, D: DelayNs> Actuators<P, D> {
    /// Creates the actuator set.
    ///
    /// No servo is written until [`home`](Self::home) or a motion call.
    ///
    /// # Arguments
    ///
    /// * `yaw` - PWM output of the yaw servo
    /// * `pitch` - PWM output of the pitch servo
    /// * `roll` - PWM output of the roll servo
    /// * `delay` - Blocking delay provider
    /// * `motion` - Channel geometry and timing
    pub fn new(yaw: P, pitch: P, roll: P, delay: D, motion: MotionConfig) -> Self {
        Self {
            yaw: Servo::new(yaw, motion.yaw_stop),
            pitch: Servo::new(pitch, motion.pitch_home),
            roll: Servo::new(roll, motion.roll_stop),
            delay,
            motion,
        }
    }

    /// Returns the channel geometry and timing.
    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Returns the last value written to `channel`.
    pub fn value(&self, channel: Channel) -> i16 {
        match channel {
            Channel::Yaw => self.yaw.value(),
            Channel::Pitch => self.pitch.value(),
            Channel::Roll => self.roll.value(),
        }
    }

    /// Returns the current pitch angle.
    pub fn pitch(&self) -> i16 {
        self.pitch.value()
    }

    /// Moves the pitch servo, clamping to the configured bounds.
    pub fn set_pitch(&mut self, degrees: i16) {
        let angle = degrees.clamp(self.motion.pitch_min, self.motion.pitch_max);
        self.pitch.write(angle);
    }

    /// Spins a continuous-rotation channel at `offset` from its stop value.
    ///
    /// The offset is not limited here; callers pick safe speeds.
    pub fn set_speed(&mut self, rotor: Rotor, offset: i16) {
        match rotor {
            Rotor::Yaw => self.yaw.write(self.motion.yaw_stop.saturating_add(offset)),
            Rotor::Roll => self.roll.write(self.motion.roll_stop.saturating_add(offset)),
        }
    }

    /// Writes the stop value to a continuous-rotation channel.
    pub fn stop(&mut self, rotor: Rotor) {
        self.set_speed(rotor, 0);
    }

    /// Blocks for `duration_ms`, then stops `channel` if it rotates.
    ///
    /// For the pitch channel this is a plain settle delay.
    pub fn hold_for(&mut self, channel: Channel, duration_ms: u32) {
        self.delay.delay_ms(duration_ms);
        match channel {
            Channel::Yaw => self.stop(Rotor::Yaw),
            Channel::Roll => self.stop(Rotor::Roll),
            Channel::Pitch => {}
        }
    }

    /// Blocks for `duration_ms` without touching any channel.
    pub fn pause(&mut self, duration_ms: u32) {
        self.delay.delay_ms(duration_ms);
    }

    /// Stops both rotors and levels the barrel at its home angle.
    pub fn home(&mut self) {
        self.stop(Rotor::Yaw);
        self.pause(20);
        self.stop(Rotor::Roll);
        self.pause(100);
        self.set_pitch(self.motion.pitch_home);
        self.pause(100);
        debug!("Servos homed, pitch {}", self.pitch());
    }
}
