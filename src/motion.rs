// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Timed motion routines built on the actuator primitives.
//!
//! Every routine here is synchronous: it writes the servos, blocks in
//! delays, and returns only once the motion has finished. While a routine
//! runs no remote input is read.
//!
//! # Routines
//!
//! - **Steps**: one yaw pulse or one pitch increment per repetition
//! - **Fire**: one barrel advance per dart, or six for the whole magazine
//! - **Gestures**: nod yes, shake no, and the shake-and-fire combo

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::actuator::{Actuators, Channel, Rotor};
use crate::command::Direction;

/// Settle time after each yaw or roll pulse
const SMOOTHING_MS: u32 = 5;

/// Settle time after each pitch step
const PITCH_SETTLE_MS: u32 = 50;

/// How far the barrel tilts when nodding
const NOD_DEGREES: i16 = 20;

/// Time spent on each degree of a nod
const NOD_DEGREE_MS: u32 = 7;

/// Pause at either end of a nod
const NOD_HOLD_MS: u32 = 50;

/// Yaw offset used when shaking the head
const SHAKE_OFFSET: i16 = 50;

/// Duration of each half of a head shake
const SHAKE_MS: u32 = 190;

/// Pause between shake pulses
const SHAKE_PAUSE_MS: u32 = 50;

/// Steps per direction in the combo gesture
const COMBO_STEPS: u8 = 2;

/// Pause after each shot of the combo gesture
const COMBO_SETTLE_MS: u32 = 500;

/// Chambers in the barrel
const MAGAZINE_SIZE: u32 = 6;

impl<P: SetDutyCycle, D: DelayNs> Actuators<P, D> {
    /// Steps `moves` times in `direction`.
    pub fn step(&mut self, direction: Direction, moves: u8) {
        match direction {
            Direction::Up => self.move_up(moves),
            Direction::Down => self.move_down(moves),
            Direction::Left => self.move_left(moves),
            Direction::Right => self.move_right(moves),
        }
    }

    /// Tilts the barrel up one pitch step per move.
    ///
    /// Up lowers the servo angle. A step that would pass `pitch_min` is
    /// skipped.
    pub fn move_up(&mut self, moves: u8) {
        for _ in 0..moves {
            let target = self.pitch().saturating_sub(self.motion().pitch_step);
            if target < self.motion().pitch_min {
                debug!("Up blocked at pitch {}", self.pitch());
                continue;
            }
            self.set_pitch(target);
            self.hold_for(Channel::Pitch, PITCH_SETTLE_MS);
            info!("Up");
        }
    }

    /// Tilts the barrel down one pitch step per move.
    ///
    /// Down raises the servo angle. A step that would pass `pitch_max` is
    /// skipped.
    pub fn move_down(&mut self, moves: u8) {
        for _ in 0..moves {
            let target = self.pitch().saturating_add(self.motion().pitch_step);
            if target > self.motion().pitch_max {
                debug!("Down blocked at pitch {}", self.pitch());
                continue;
            }
            self.set_pitch(target);
            self.hold_for(Channel::Pitch, PITCH_SETTLE_MS);
            info!("Down");
        }
    }

    /// Rotates the base left for one yaw precision interval per move.
    pub fn move_left(&mut self, moves: u8) {
        let speed = self.motion().yaw_move_speed;
        for _ in 0..moves {
            self.yaw_pulse(speed);
            info!("Left");
        }
    }

    /// Rotates the base right for one yaw precision interval per move.
    pub fn move_right(&mut self, moves: u8) {
        let speed = self.motion().yaw_move_speed;
        for _ in 0..moves {
            self.yaw_pulse(speed.saturating_neg());
            info!("Right");
        }
    }

    fn yaw_pulse(&mut self, offset: i16) {
        let precision = self.motion().yaw_precision_ms;
        self.set_speed(Rotor::Yaw, offset);
        self.hold_for(Channel::Yaw, precision);
        self.pause(SMOOTHING_MS);
    }

    /// Advances the barrel one chamber, firing a single dart.
    pub fn fire(&mut self) {
        let precision = self.motion().roll_precision_ms;
        self.barrel_pulse(precision);
    }

    /// Spins the barrel a full turn, firing every chamber.
    pub fn fire_all(&mut self) {
        let precision = self.motion().roll_precision_ms.saturating_mul(MAGAZINE_SIZE);
        self.barrel_pulse(precision);
    }

    fn barrel_pulse(&mut self, duration_ms: u32) {
        let speed = self.motion().roll_move_speed;
        self.set_speed(Rotor::Roll, speed);
        self.hold_for(Channel::Roll, duration_ms);
        self.pause(SMOOTHING_MS);
    }

    /// Nods the barrel three times, sweeping pitch up and back a degree at
    /// a time. Ends at the starting angle.
    pub fn nod_yes(&mut self) {
        info!("YES");
        let start = self.pitch();
        let end = start + NOD_DEGREES;
        for _ in 0..3 {
            for angle in start..=end {
                self.set_pitch(angle);
                self.pause(NOD_DEGREE_MS);
            }
            self.pause(NOD_HOLD_MS);
            for angle in (start..=end).rev() {
                self.set_pitch(angle);
                self.pause(NOD_DEGREE_MS);
            }
            self.pause(NOD_HOLD_MS);
        }
    }

    /// Shakes the base three times.
    ///
    /// Each shake turns counterclockwise first (yaw above stop, the
    /// [`move_left`](Self::move_left) direction), then clockwise.
    pub fn shake_no(&mut self) {
        info!("NO");
        for _ in 0..3 {
            self.set_speed(Rotor::Yaw, SHAKE_OFFSET);
            self.hold_for(Channel::Yaw, SHAKE_MS);
            self.pause(SHAKE_PAUSE_MS);
            self.set_speed(Rotor::Yaw, -SHAKE_OFFSET);
            self.hold_for(Channel::Yaw, SHAKE_MS);
            self.pause(SHAKE_PAUSE_MS);
        }
    }

    /// Tours right, up, left and down, firing after each leg.
    pub fn shake_and_fire(&mut self) {
        info!("COMBO");
        for direction in [Direction::Right, Direction::Up, Direction::Left, Direction::Down] {
            self.step(direction, COMBO_STEPS);
            self.fire();
            self.pause(COMBO_SETTLE_MS);
        }
    }
}
