// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hardware configuration, pin mappings and turret tuning for the RP2350.
//!
//! This module defines all compile-time configuration including:
//! - GPIO pin assignments
//! - Servo PWM timing
//! - Motion, passcode, recording and roulette parameters
//!
//! # Pin Mapping Summary
//!
//! ## Servos
//! - **Yaw (continuous rotation)**: GPIO 10 (PWM_SLICE5 Channel A)
//! - **Pitch (positional)**: GPIO 12 (PWM_SLICE6 Channel A)
//! - **Roll / barrel (continuous rotation)**: GPIO 14 (PWM_SLICE7 Channel A)
//!
//! ## Sensors
//! - **IR Receiver**: GPIO 5 (with pull-up)
//!
//! ## Indicators
//! - **Status LED**: GPIO 25 (onboard LED)
//!
//! # Servo PWM Configuration
//!
//! The 150 MHz system clock is divided by 150 so one PWM tick is 1µs. With a
//! top value of 19,999 the period is 20ms (50 Hz), which lets the compare
//! value be written directly as a pulse width in microseconds.

use crate::error::ConfigError;

/// GPIO pin number for status LED (onboard LED on RP2350)
pub const LED_PIN: u8 = 25;

/// GPIO pin number for IR receiver data output
pub const IR_RECEIVER_PIN: u8 = 5;

/// GPIO pin number for the yaw servo signal
pub const YAW_SERVO_PIN: u8 = 10;

/// GPIO pin number for the pitch servo signal
pub const PITCH_SERVO_PIN: u8 = 12;

/// GPIO pin number for the roll (barrel) servo signal
pub const ROLL_SERVO_PIN: u8 = 14;

/// PWM clock divider giving 1µs ticks from the 150 MHz system clock
pub const SERVO_PWM_DIVIDER: u8 = 150;

/// PWM top value for a 20ms servo frame
pub const SERVO_PWM_TOP: u16 = 19_999;

/// Servo frame period in microseconds
pub const SERVO_PERIOD_US: u16 = 20_000;

/// Pulse width commanding 0 degrees
pub const SERVO_MIN_PULSE_US: u16 = 544;

/// Pulse width commanding 180 degrees
pub const SERVO_MAX_PULSE_US: u16 = 2_400;

/// Largest angle a hobby servo accepts
pub const SERVO_MAX_ANGLE: i16 = 180;

/// Default unlock code
pub const PASSCODE: &str = "1234";

/// Storage reserved for passcode entry; the configured code must fit
pub const PASSCODE_CAPACITY: usize = 8;

/// Upper bound on the number of recorded movement commands
pub const MAX_RECORDED_COMMANDS: usize = 100;

/// Digit that toggles recording once unlocked
pub const RECORD_DIGIT: u8 = 7;

/// Digit that replays the recording once unlocked
pub const PLAYBACK_DIGIT: u8 = 8;

/// Digit that runs the shake-and-fire combo once unlocked
pub const COMBO_DIGIT: u8 = 9;

/// Delay between main loop polls
pub const POLL_INTERVAL_MS: u64 = 5;

/// Settle delay between replayed commands
pub const PLAYBACK_DELAY_MS: u32 = 5;

/// Timing and geometry of the three servo channels.
///
/// Continuous-rotation channels (yaw, roll) are driven with `stop + offset`,
/// so an offset of ±90 is full speed in either direction. The pitch channel
/// is positional and confined to `[pitch_min, pitch_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Lowest pitch angle the mechanics allow
    pub pitch_min: i16,
    /// Highest pitch angle the mechanics allow
    pub pitch_max: i16,
    /// Pitch angle set when homing
    pub pitch_home: i16,
    /// Degrees added or removed per up/down step
    pub pitch_step: i16,
    /// Yaw write value that stops rotation
    pub yaw_stop: i16,
    /// Yaw offset from stop used for left/right moves
    pub yaw_move_speed: i16,
    /// How long a single yaw move keeps rotating
    pub yaw_precision_ms: u32,
    /// Roll write value that stops rotation
    pub roll_stop: i16,
    /// Roll offset from stop used when firing
    pub roll_move_speed: i16,
    /// Rotation time advancing the barrel by one dart chamber
    pub roll_precision_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            pitch_min: 10,
            pitch_max: 175,
            pitch_home: 100,
            pitch_step: 8,
            yaw_stop: 90,
            yaw_move_speed: 90,
            yaw_precision_ms: 150,
            roll_stop: 90,
            roll_move_speed: 90,
            roll_precision_ms: 158,
        }
    }
}

/// Parameters of the autonomous roulette loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RouletteConfig {
    /// Darts in a full magazine
    pub darts: u8,
    /// Hard limit on loop iterations
    pub max_rounds: u16,
    /// Pitch angle held while scanning
    pub neutral_pitch: i16,
    /// Yaw offset from stop while scanning
    pub scan_offset: i16,
    /// How long each scan pulse lasts
    pub scan_ms: u32,
    /// Unit of the random wait after each scan
    pub base_delay_ms: u32,
    /// Pause before acting on a hit or miss
    pub settle_ms: u32,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            darts: 6,
            max_rounds: 60,
            neutral_pitch: 110,
            scan_offset: 55,
            scan_ms: 400,
            base_delay_ms: 400,
            settle_ms: 700,
        }
    }
}

/// Complete turret configuration.
///
/// # Examples
///
/// ```ignore
/// let config = TurretConfig {
///     record_capacity: 3,
///     ..TurretConfig::default()
/// };
/// config.validate()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurretConfig {
    /// Unlock code, digits only
    pub passcode: &'static str,
    /// Number of movement commands a recording may hold
    pub record_capacity: usize,
    /// Servo geometry and timing
    pub motion: MotionConfig,
    /// Roulette parameters
    pub roulette: RouletteConfig,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            passcode: PASSCODE,
            record_capacity: MAX_RECORDED_COMMANDS,
            motion: MotionConfig::default(),
            roulette: RouletteConfig::default(),
        }
    }
}

impl TurretConfig {
    /// Checks that the configuration describes a turret that can operate.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let motion = &self.motion;
        if motion.pitch_min < 0 || motion.pitch_max > SERVO_MAX_ANGLE || motion.pitch_min > motion.pitch_max {
            return Err(ConfigError::PitchBounds {
                min: motion.pitch_min,
                max: motion.pitch_max,
            });
        }
        if motion.pitch_step <= 0 {
            return Err(ConfigError::PitchStep(motion.pitch_step));
        }
        for angle in [motion.pitch_home, self.roulette.neutral_pitch] {
            if angle < motion.pitch_min || angle > motion.pitch_max {
                return Err(ConfigError::PitchOutOfBounds(angle));
            }
        }

        if self.passcode.is_empty() {
            return Err(ConfigError::EmptyPasscode);
        }
        if self.passcode.len() > PASSCODE_CAPACITY {
            return Err(ConfigError::PasscodeTooLong(self.passcode.len()));
        }
        if !self.passcode.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::PasscodeNotNumeric);
        }

        if self.record_capacity == 0 || self.record_capacity > MAX_RECORDED_COMMANDS {
            return Err(ConfigError::RecordCapacity(self.record_capacity));
        }

        if self.roulette.darts == 0 {
            return Err(ConfigError::EmptyMagazine);
        }
        if self.roulette.max_rounds == 0 {
            return Err(ConfigError::NoRouletteRounds);
        }
        Ok(())
    }
}
