// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Movement recording.
//!
//! While recording, every movement or fire key that reaches the interpreter
//! is appended to a bounded list. Other keys are not kept. Filling the list
//! stops the recording but keeps what was captured. Playback itself lives in
//! the controller so replayed keys take the same path as live ones.

use heapless::Vec;

use crate::command::Key;
use crate::config::MAX_RECORDED_COMMANDS;

/// Bounded recorder of movement keys.
pub struct Recorder {
    /// Whether keys are being captured
    recording: bool,
    /// Captured keys, oldest first
    keys: Vec<Key, MAX_RECORDED_COMMANDS>,
    /// Number of keys a recording may hold
    capacity: usize,
}

impl Recorder {
    /// Creates an idle recorder holding at most `capacity` keys.
    ///
    /// The capacity is limited to [`MAX_RECORDED_COMMANDS`].
    pub fn new(capacity: usize) -> Self {
        Self {
            recording: false,
            keys: Vec::new(),
            capacity: capacity.min(MAX_RECORDED_COMMANDS),
        }
    }

    /// Whether keys are being captured.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Keys captured by the latest recording.
    pub fn recorded(&self) -> &[Key] {
        &self.keys
    }

    /// Copy of the captured keys, for replaying while the recorder stays
    /// borrowable.
    pub fn snapshot(&self) -> Vec<Key, MAX_RECORDED_COMMANDS> {
        self.keys.clone()
    }

    /// Discards the previous recording and starts a new one.
    pub fn start(&mut self) {
        self.keys.clear();
        self.recording = true;
        info!("RECORDING");
    }

    /// Stops recording, keeping the captured keys.
    pub fn stop(&mut self) {
        self.recording = false;
        info!("RECORDING STOPPED ({} moves)", self.keys.len());
    }

    /// Records `key` if a recording is active and `key` is a motion key.
    ///
    /// A full recorder stops recording instead of appending.
    pub fn capture(&mut self, key: Key) {
        if !self.recording || !key.is_motion() {
            return;
        }
        if self.keys.len() >= self.capacity {
            warn!("Recording full after {} moves, stopping", self.keys.len());
            self.recording = false;
            return;
        }
        // Capacity never exceeds the backing storage
        let _ = self.keys.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_recorder_ignores_keys() {
        let mut recorder = Recorder::new(10);
        recorder.capture(Key::Up);
        assert!(recorder.recorded().is_empty());
        assert!(!recorder.is_recording());
    }

    #[test]
    fn captures_only_motion_keys() {
        let mut recorder = Recorder::new(10);
        recorder.start();
        for key in [
            Key::Up,
            Key::Digit(7),
            Key::Star,
            Key::Left,
            Key::Hash,
            Key::Unknown(0x99),
            Key::Ok,
        ] {
            recorder.capture(key);
        }
        assert_eq!(recorder.recorded(), &[Key::Up, Key::Left, Key::Ok]);
    }

    #[test]
    fn stop_keeps_and_start_clears() {
        let mut recorder = Recorder::new(10);
        recorder.start();
        recorder.capture(Key::Down);
        recorder.stop();
        recorder.capture(Key::Up);
        assert_eq!(recorder.recorded(), &[Key::Down]);

        recorder.start();
        assert!(recorder.recorded().is_empty());
    }

    #[test]
    fn full_recorder_stops_without_truncating() {
        let mut recorder = Recorder::new(3);
        recorder.start();
        for key in [Key::Up, Key::Down, Key::Left] {
            recorder.capture(key);
        }
        assert!(recorder.is_recording());

        recorder.capture(Key::Right);

        assert!(!recorder.is_recording());
        assert_eq!(recorder.recorded(), &[Key::Up, Key::Down, Key::Left]);
    }

    #[test]
    fn capacity_is_bounded_by_storage() {
        let mut recorder = Recorder::new(MAX_RECORDED_COMMANDS * 2);
        recorder.start();
        for _ in 0..MAX_RECORDED_COMMANDS + 5 {
            recorder.capture(Key::Ok);
        }
        assert_eq!(recorder.recorded().len(), MAX_RECORDED_COMMANDS);
        assert!(!recorder.is_recording());
    }
}
