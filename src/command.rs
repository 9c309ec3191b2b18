// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Remote keys, IR code mapping, and the actions they trigger.
//!
//! This module defines the key set of the turret remote, maps NEC command
//! bytes to keys, and resolves a key to an [`Action`] given the session
//! state.
//!
//! # IR Remote Button Layout
//!
//! The turret is designed to work with the common 17-key NEC remote:
//!
//! ```text
//!        [  ^  ]           0x52 - Up
//!   [ < ][ OK  ][ > ]      0x08 - Left, 0x1C - Fire, 0x5A - Right
//!        [  v  ]           0x18 - Down
//!
//!   [ 1 ] 0x45   [ 2 ] 0x46   [ 3 ] 0x47
//!   [ 4 ] 0x44   [ 5 ] 0x40   [ 6 ] 0x43
//!   [ 7 ] 0x07   [ 8 ] 0x15   [ 9 ] 0x09
//!   [ * ] 0x16   [ 0 ] 0x19   [ # ] 0x0D
//! ```
//!
//! # Dual-purpose digits
//!
//! While locked every digit is passcode entry. Once unlocked three digits
//! take on a second meaning:
//!
//! - **7**: start or stop recording
//! - **8**: play the recording back (ignored while recording)
//! - **9**: shake-and-fire combo

use crate::config::{COMBO_DIGIT, PLAYBACK_DIGIT, RECORD_DIGIT};

/// Keys of the turret remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Tilt the barrel up
    Up,
    /// Tilt the barrel down
    Down,
    /// Rotate the base left
    Left,
    /// Rotate the base right
    Right,
    /// Fire one dart
    Ok,
    /// Lock the turret
    Star,
    /// Enter roulette mode
    Hash,
    /// Digit key, 0-9
    Digit(u8),
    /// Any code the remote map does not know
    Unknown(u8),
}

/// NEC command bytes of the digit keys, indexed by digit.
const DIGIT_CODES: [u8; 10] = [0x19, 0x45, 0x46, 0x47, 0x44, 0x40, 0x43, 0x07, 0x15, 0x09];

impl Key {
    /// Converts an IR remote button code to a key.
    ///
    /// # Arguments
    ///
    /// * `code` - 8-bit NEC IR protocol command byte
    ///
    /// # Examples
    ///
    /// ```ignore
    /// assert_eq!(Key::from_ir_code(0x52), Key::Up);
    /// assert_eq!(Key::from_ir_code(0x45), Key::Digit(1));
    /// assert_eq!(Key::from_ir_code(0xFF), Key::Unknown(0xFF));
    /// ```
    pub fn from_ir_code(code: u8) -> Self {
        match code {
            0x52 => Key::Up,
            0x18 => Key::Down,
            0x08 => Key::Left,
            0x5A => Key::Right,
            0x1C => Key::Ok,
            0x16 => Key::Star,
            0x0D => Key::Hash,
            _ => match DIGIT_CODES.iter().position(|&c| c == code) {
                Some(digit) => Key::Digit(digit as u8),
                None => Key::Unknown(code),
            },
        }
    }

    /// Returns the IR code for this key.
    ///
    /// `Unknown` keys return the code they were decoded from; digits above
    /// 9 have no code.
    pub fn to_ir_code(&self) -> Option<u8> {
        match *self {
            Key::Up => Some(0x52),
            Key::Down => Some(0x18),
            Key::Left => Some(0x08),
            Key::Right => Some(0x5A),
            Key::Ok => Some(0x1C),
            Key::Star => Some(0x16),
            Key::Hash => Some(0x0D),
            Key::Digit(d) => DIGIT_CODES.get(usize::from(d)).copied(),
            Key::Unknown(code) => Some(code),
        }
    }

    /// Whether the key moves or fires the turret, the only keys a
    /// recording keeps.
    pub fn is_motion(&self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right | Key::Ok)
    }
}

/// Direction of a single turret step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What the interpreter does with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Step once in a direction
    Move(Direction),
    /// Fire one dart
    Fire,
    /// Return to the locked state
    Lock,
    /// Append a digit to the passcode entry
    EnterDigit(u8),
    /// Start recording, or stop if already recording
    ToggleRecording,
    /// Replay the recorded movements
    Playback,
    /// Four-direction shake-and-fire gesture
    Combo,
    /// Autonomous roulette mode
    Roulette,
    /// Known key with no meaning in the current state
    Ignore,
    /// Key outside the remote map
    Unknown(u8),
}

impl Action {
    /// Resolves a key against the session state.
    ///
    /// Digits are passcode entry while locked; every other key acts only
    /// while unlocked. Digits 7, 8 and 9 are overloaded once unlocked.
    ///
    /// # Arguments
    ///
    /// * `key` - Key received from the remote
    /// * `locked` - Whether the passcode gate is locked
    /// * `recording` - Whether a recording is in progress
    pub fn resolve(key: Key, locked: bool, recording: bool) -> Self {
        match key {
            Key::Unknown(code) => Action::Unknown(code),
            Key::Digit(d) if locked => Action::EnterDigit(d),
            _ if locked => Action::Ignore,
            Key::Up => Action::Move(Direction::Up),
            Key::Down => Action::Move(Direction::Down),
            Key::Left => Action::Move(Direction::Left),
            Key::Right => Action::Move(Direction::Right),
            Key::Ok => Action::Fire,
            Key::Star => Action::Lock,
            Key::Hash => Action::Roulette,
            Key::Digit(RECORD_DIGIT) => Action::ToggleRecording,
            Key::Digit(PLAYBACK_DIGIT) if !recording => Action::Playback,
            Key::Digit(COMBO_DIGIT) => Action::Combo,
            Key::Digit(_) => Action::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [Key; 17] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Ok,
        Key::Star,
        Key::Hash,
        Key::Digit(0),
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
    ];

    #[test]
    fn remote_codes_map_to_keys() {
        assert_eq!(Key::from_ir_code(0x52), Key::Up);
        assert_eq!(Key::from_ir_code(0x18), Key::Down);
        assert_eq!(Key::from_ir_code(0x08), Key::Left);
        assert_eq!(Key::from_ir_code(0x5A), Key::Right);
        assert_eq!(Key::from_ir_code(0x1C), Key::Ok);
        assert_eq!(Key::from_ir_code(0x45), Key::Digit(1));
        assert_eq!(Key::from_ir_code(0x19), Key::Digit(0));
        assert_eq!(Key::from_ir_code(0x0D), Key::Hash);
        assert_eq!(Key::from_ir_code(0xFF), Key::Unknown(0xFF));
    }

    #[test]
    fn every_key_has_a_distinct_code() {
        for key in ALL_KEYS {
            let code = key.to_ir_code().unwrap();
            assert_eq!(Key::from_ir_code(code), key);
        }
        assert_eq!(Key::Digit(12).to_ir_code(), None);
    }

    #[test]
    fn locked_turret_only_accepts_digits() {
        for key in ALL_KEYS {
            let action = Action::resolve(key, true, false);
            match key {
                Key::Digit(d) => assert_eq!(action, Action::EnterDigit(d)),
                _ => assert_eq!(action, Action::Ignore),
            }
        }
    }

    #[test]
    fn unlocked_turret_never_enters_digits() {
        for key in ALL_KEYS {
            for recording in [false, true] {
                assert!(!matches!(
                    Action::resolve(key, false, recording),
                    Action::EnterDigit(_)
                ));
            }
        }
    }

    #[test]
    fn unlocked_keys_map_to_actions() {
        assert_eq!(Action::resolve(Key::Up, false, false), Action::Move(Direction::Up));
        assert_eq!(Action::resolve(Key::Right, false, false), Action::Move(Direction::Right));
        assert_eq!(Action::resolve(Key::Ok, false, false), Action::Fire);
        assert_eq!(Action::resolve(Key::Star, false, false), Action::Lock);
        assert_eq!(Action::resolve(Key::Hash, false, false), Action::Roulette);
        assert_eq!(Action::resolve(Key::Digit(3), false, false), Action::Ignore);
    }

    #[test]
    fn dual_purpose_digits_when_unlocked() {
        assert_eq!(Action::resolve(Key::Digit(7), false, false), Action::ToggleRecording);
        assert_eq!(Action::resolve(Key::Digit(7), false, true), Action::ToggleRecording);
        assert_eq!(Action::resolve(Key::Digit(8), false, false), Action::Playback);
        assert_eq!(Action::resolve(Key::Digit(8), false, true), Action::Ignore);
        assert_eq!(Action::resolve(Key::Digit(9), false, true), Action::Combo);
    }

    #[test]
    fn unknown_codes_stay_unknown_in_any_state() {
        assert_eq!(Action::resolve(Key::Unknown(0x42), true, false), Action::Unknown(0x42));
        assert_eq!(Action::resolve(Key::Unknown(0x42), false, true), Action::Unknown(0x42));
    }

    #[test]
    fn only_movement_and_fire_are_motion_keys() {
        let motion: Vec<Key> = ALL_KEYS.into_iter().filter(Key::is_motion).collect();
        assert_eq!(motion, vec![Key::Up, Key::Down, Key::Left, Key::Right, Key::Ok]);
        assert!(!Key::Unknown(0x52).is_motion());
    }
}
