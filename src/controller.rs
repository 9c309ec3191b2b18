// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Turret command interpreter.
//!
//! This module implements the turret's state machine, managing:
//! - Repeat debouncing of remote events
//! - Passcode entry and lock state
//! - Recording and playback of movements
//! - Dispatch to motion routines and roulette mode
//!
//! # Dispatch
//!
//! Every key follows the same path, whether it came from the remote or from
//! playback:
//!
//! 1. If recording, offer the key to the recorder
//! 2. Resolve the key to an [`Action`] against the lock and recording state
//! 3. Run the action to completion, blocking for any motion
//! 4. Validate the passcode entry if it holds a full code
//!
//! # Blocking
//!
//! Handlers return only after their motion has finished. Gestures take
//! around a second and a roulette session can take a minute; the remote is
//! not read in the meantime.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use rand::Rng;

use crate::actuator::Actuators;
use crate::command::{Action, Key};
use crate::config::{PLAYBACK_DELAY_MS, TurretConfig};
use crate::error::ConfigError;
use crate::nec::IrEvent;
use crate::passcode::{PasscodeGate, Verdict};
use crate::recorder::Recorder;
use crate::roulette::{self, RouletteReport};

/// Turret controller owning all session state.
///
/// # Examples
///
/// ```ignore
/// let mut turret = TurretController::new(actuators, rng, TurretConfig::default())?;
/// turret.home();
///
/// if let Some(event) = ir.read_event() {
///     turret.handle_event(event);
/// }
/// ```
pub struct TurretController<P, D, R> {
    /// Servo channels and delay
    turret: Actuators<P, D>,
    /// Lock state and passcode entry
    gate: PasscodeGate,
    /// Recorded movements
    recorder: Recorder,
    /// Randomness for roulette mode
    rng: R,
    /// Configuration the controller was built with
    config: TurretConfig,
}

impl<P, D, R> TurretController<P, D, R>
where
    P: SetDutyCycle,
    D: DelayNs,
    R: Rng,
{
    /// Creates a locked, idle controller.
    ///
    /// # Arguments
    ///
    /// * `turret` - Servo channels and delay
    /// * `rng` - Random source for roulette mode
    /// * `config` - Passcode, recording and roulette settings
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(turret: Actuators<P, D>, rng: R, config: TurretConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            turret,
            gate: PasscodeGate::new(config.passcode),
            recorder: Recorder::new(config.record_capacity),
            rng,
            config,
        })
    }

    /// Moves every servo to its rest position.
    pub fn home(&mut self) {
        self.turret.home();
    }

    /// Whether the passcode is required.
    pub fn is_locked(&self) -> bool {
        self.gate.is_locked()
    }

    /// Digits of the passcode entered so far.
    pub fn passcode_entry(&self) -> &str {
        self.gate.entry()
    }

    /// Whether movements are being recorded.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Keys captured by the latest recording.
    pub fn recorded(&self) -> &[Key] {
        self.recorder.recorded()
    }

    /// Servo channels, for inspecting the current position.
    pub fn actuators(&self) -> &Actuators<P, D> {
        &self.turret
    }

    /// Handles one decoded remote event.
    ///
    /// Held buttons are ignored while locked, so one press enters one
    /// digit. Once unlocked, repeats pass through and keep the turret
    /// moving while a direction is held.
    pub fn handle_event(&mut self, event: IrEvent) {
        if event.repeat && self.gate.is_locked() {
            debug!("DEBOUNCING REPEATED KEY - IGNORING INPUT");
            return;
        }
        self.dispatch(Key::from_ir_code(event.command));
    }

    /// Runs a key through the recorder, the action table and the gate.
    ///
    /// Returns the action that was resolved.
    pub fn dispatch(&mut self, key: Key) -> Action {
        self.recorder.capture(key);

        let action = Action::resolve(key, self.gate.is_locked(), self.recorder.is_recording());
        self.execute(action);

        if let Some(verdict) = self.gate.validate_if_complete() {
            self.acknowledge(verdict);
        }
        action
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Move(direction) => self.turret.step(direction, 1),
            Action::Fire => {
                self.turret.fire();
                info!("FIRE");
            }
            Action::Lock => {
                self.gate.lock();
            }
            Action::EnterDigit(digit) => {
                if let Some(verdict) = self.gate.add_digit(digit) {
                    self.acknowledge(verdict);
                }
            }
            Action::ToggleRecording => {
                if self.recorder.is_recording() {
                    self.recorder.stop();
                } else {
                    self.recorder.start();
                }
            }
            Action::Playback => self.playback(),
            Action::Combo => self.turret.shake_and_fire(),
            Action::Roulette => {
                self.roulette();
            }
            Action::Ignore => {}
            Action::Unknown(code) => {
                warn!("Command Read Failed or Unknown (0x{:02X}), Try Again", code);
            }
        }
    }

    fn acknowledge(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Accepted => self.turret.nod_yes(),
            Verdict::Rejected => self.turret.shake_no(),
        }
    }

    /// Replays the recorded keys in order through [`dispatch`](Self::dispatch).
    ///
    /// Replayed keys obey the lock exactly like live ones.
    pub fn playback(&mut self) {
        let keys = self.recorder.snapshot();
        info!("PLAYBACK ({} moves)", keys.len());
        for key in keys {
            self.dispatch(key);
            self.turret.pause(PLAYBACK_DELAY_MS);
        }
    }

    /// Runs a roulette session with the configured magazine.
    pub fn roulette(&mut self) -> RouletteReport {
        roulette::run(&mut self.turret, &mut self.rng, &self.config.roulette)
    }
}
