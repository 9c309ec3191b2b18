// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Autonomous roulette mode.
//!
//! The turret levels its barrel, sweeps slowly, waits a random time and then
//! rolls the dice: one round in three is a hit and fires a dart, sometimes
//! after a nod. On a miss it occasionally shakes its head. The session ends
//! when the magazine is empty or the round limit is reached, and always
//! leaves the yaw servo stopped.
//!
//! A session blocks for its whole duration.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use rand::Rng;

use crate::actuator::{Actuators, Channel, Rotor};
use crate::config::RouletteConfig;

/// Pause between the nod and the shot
const NOD_TO_FIRE_MS: u32 = 150;

/// Pause after a shot preceded by a nod
const AFTER_NOD_SHOT_MS: u32 = 100;

/// Pause after a plain shot
const AFTER_SHOT_MS: u32 = 50;

/// Pause after shaking the head on a miss
const AFTER_SHAKE_MS: u32 = 300;

/// Outcome of a roulette session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RouletteReport {
    /// Darts fired during the session
    pub darts_fired: u8,
    /// Rounds played
    pub rounds: u16,
}

/// Runs one roulette session to completion.
///
/// # Arguments
///
/// * `turret` - Actuators to drive
/// * `rng` - Source of the random waits and hit/miss rolls
/// * `config` - Magazine size, timing and round limit
///
/// # Examples
///
/// ```ignore
/// let report = roulette::run(&mut turret, &mut rng, &RouletteConfig::default());
/// info!("{} darts in {} rounds", report.darts_fired, report.rounds);
/// ```
pub fn run<P, D, R>(turret: &mut Actuators<P, D>, rng: &mut R, config: &RouletteConfig) -> RouletteReport
where
    P: SetDutyCycle,
    D: DelayNs,
    R: Rng,
{
    info!("ENTERING ROULETTE MODE");
    let mut darts_remaining = config.darts;
    let mut rounds = 0u16;

    while darts_remaining > 0 && rounds < config.max_rounds {
        rounds += 1;

        turret.set_pitch(config.neutral_pitch);
        turret.set_speed(Rotor::Yaw, config.scan_offset);
        turret.hold_for(Channel::Yaw, config.scan_ms);
        turret.pause(config.base_delay_ms.saturating_mul(rng.gen_range(1..4u32)));

        if rng.gen_ratio(1, 3) {
            turret.pause(config.settle_ms);
            if rng.gen_ratio(1, 2) {
                turret.nod_yes();
                turret.pause(NOD_TO_FIRE_MS);
                turret.fire();
                turret.pause(AFTER_NOD_SHOT_MS);
            } else {
                turret.fire();
                turret.pause(AFTER_SHOT_MS);
            }
            darts_remaining -= 1;
            info!("BANG, {} darts left", darts_remaining);
        } else if rng.gen_ratio(1, 6) {
            turret.pause(config.settle_ms);
            turret.shake_no();
            turret.pause(AFTER_SHAKE_MS);
        } else {
            turret.pause(config.settle_ms);
        }
    }

    turret.stop(Rotor::Yaw);

    let report = RouletteReport {
        darts_fired: config.darts - darts_remaining,
        rounds,
    };
    if darts_remaining > 0 {
        warn!("Roulette round limit reached with {} darts left", darts_remaining);
    }
    info!("ROULETTE OVER: {} darts in {} rounds", report.darts_fired, report.rounds);
    report
}
