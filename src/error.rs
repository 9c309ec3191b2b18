// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Configuration errors.
//!
//! Runtime turret operation has no failure modes: servo writes are
//! fire-and-forget and every out-of-range input is clamped or ignored. The
//! only thing that can be wrong is the configuration, which is checked once
//! when the controller is built.

use thiserror::Error;

/// Reasons a [`TurretConfig`](crate::config::TurretConfig) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("pitch bounds {min}..={max} must be ordered and within 0..=180")]
    PitchBounds { min: i16, max: i16 },

    #[error("pitch angle {0} lies outside the pitch bounds")]
    PitchOutOfBounds(i16),

    #[error("pitch step {0} must be positive")]
    PitchStep(i16),

    #[error("passcode is empty")]
    EmptyPasscode,

    #[error("passcode has {0} digits, more than the entry buffer holds")]
    PasscodeTooLong(usize),

    #[error("passcode may only contain the digits 0-9")]
    PasscodeNotNumeric,

    #[error("recording capacity {0} is outside 1..=100")]
    RecordCapacity(usize),

    #[error("roulette magazine holds no darts")]
    EmptyMagazine,

    #[error("roulette round limit is zero")]
    NoRouletteRounds,
}
