// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Passcode gate guarding every turret action.
//!
//! The gate starts locked. Digits accumulate in an entry buffer; once the
//! buffer holds as many digits as the code, it is compared and cleared. A
//! match unlocks the turret, a mismatch leaves it locked. Locking again is
//! an explicit command and needs no code.
//!
//! ```text
//!            add_digit x N, match
//!   LOCKED ------------------------> UNLOCKED
//!     ^  \_ add_digit x N, mismatch _/ |
//!     |                                |
//!     +------------- lock() -----------+
//! ```

use heapless::String;

use crate::config::PASSCODE_CAPACITY;

/// Result of comparing a complete entry against the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// Lock state and passcode entry buffer.
pub struct PasscodeGate {
    /// Digits that unlock the turret
    code: &'static str,
    /// Digits entered so far
    entry: String<PASSCODE_CAPACITY>,
    /// Whether actions are refused
    locked: bool,
}

impl PasscodeGate {
    /// Creates a locked gate for `code`.
    pub fn new(code: &'static str) -> Self {
        Self {
            code,
            entry: String::new(),
            locked: true,
        }
    }

    /// Whether a passcode is required.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Digits entered so far.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Number of digits that make up a complete entry.
    pub fn code_len(&self) -> usize {
        self.code.len()
    }

    /// Appends a digit while locked.
    ///
    /// Completing the entry validates it immediately.
    ///
    /// # Returns
    ///
    /// * `Some(verdict)` - The digit completed the entry
    /// * `None` - The entry is still incomplete, or the digit was refused
    pub fn add_digit(&mut self, digit: u8) -> Option<Verdict> {
        if !self.locked || digit > 9 {
            return None;
        }

        if self.entry.len() < self.code.len() {
            if self.entry.push(char::from(b'0' + digit)).is_err() {
                warn!("Passcode entry overflow, clearing");
                self.entry.clear();
                return None;
            }
            info!("Passcode digit {} ({}/{})", digit, self.entry.len(), self.code.len());
            return self.validate_if_complete();
        }

        if self.entry.len() > self.code.len() + 1 {
            warn!("Passcode entry overflow, clearing");
            self.entry.clear();
        }
        None
    }

    /// Validates the entry if it holds a full code.
    pub fn validate_if_complete(&mut self) -> Option<Verdict> {
        (self.entry.len() == self.code.len()).then(|| self.validate())
    }

    /// Compares the entry with the code and clears it.
    ///
    /// A match unlocks the gate; a mismatch keeps it locked.
    pub fn validate(&mut self) -> Verdict {
        let verdict = if self.entry.as_str() == self.code {
            info!("CORRECT PASSCODE");
            self.locked = false;
            Verdict::Accepted
        } else {
            info!("INCORRECT PASSCODE");
            self.locked = true;
            Verdict::Rejected
        };
        self.entry.clear();
        verdict
    }

    /// Locks an unlocked gate.
    ///
    /// Returns `false` if the gate was already locked.
    pub fn lock(&mut self) -> bool {
        if self.locked {
            return false;
        }
        info!("LOCKING");
        self.locked = true;
        self.entry.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(gate: &mut PasscodeGate, digits: &[u8]) -> Option<Verdict> {
        digits.iter().fold(None, |_, &d| gate.add_digit(d))
    }

    #[test]
    fn starts_locked_and_empty() {
        let gate = PasscodeGate::new("1234");
        assert!(gate.is_locked());
        assert_eq!(gate.entry(), "");
        assert_eq!(gate.code_len(), 4);
    }

    #[test]
    fn correct_code_unlocks() {
        let mut gate = PasscodeGate::new("1234");
        assert_eq!(gate.add_digit(1), None);
        assert_eq!(gate.entry(), "1");
        assert_eq!(enter(&mut gate, &[2, 3, 4]), Some(Verdict::Accepted));
        assert!(!gate.is_locked());
        assert_eq!(gate.entry(), "");
    }

    #[test]
    fn wrong_code_stays_locked() {
        let mut gate = PasscodeGate::new("1234");
        assert_eq!(enter(&mut gate, &[1, 2, 3, 5]), Some(Verdict::Rejected));
        assert!(gate.is_locked());
        assert_eq!(gate.entry(), "");
    }

    #[test]
    fn every_four_digit_code_only_unlocks_on_match() {
        for n in 0..10_000u16 {
            let digits = [
                (n / 1000) as u8,
                (n / 100 % 10) as u8,
                (n / 10 % 10) as u8,
                (n % 10) as u8,
            ];
            let mut gate = PasscodeGate::new("0427");
            let verdict = enter(&mut gate, &digits);
            assert_eq!(verdict == Some(Verdict::Accepted), n == 427);
            assert_eq!(gate.is_locked(), n != 427);
            assert_eq!(gate.entry(), "");
        }
    }

    #[test]
    fn retry_after_rejection() {
        let mut gate = PasscodeGate::new("1234");
        enter(&mut gate, &[9, 9, 9, 9]);
        assert_eq!(enter(&mut gate, &[1, 2, 3, 4]), Some(Verdict::Accepted));
    }

    #[test]
    fn digits_refused_while_unlocked() {
        let mut gate = PasscodeGate::new("1234");
        enter(&mut gate, &[1, 2, 3, 4]);
        assert_eq!(gate.add_digit(5), None);
        assert_eq!(gate.entry(), "");
        assert!(!gate.is_locked());
    }

    #[test]
    fn lock_only_from_unlocked() {
        let mut gate = PasscodeGate::new("1234");
        assert!(!gate.lock());
        enter(&mut gate, &[1, 2, 3, 4]);
        assert!(gate.lock());
        assert!(gate.is_locked());
        assert_eq!(gate.entry(), "");
    }

    #[test]
    fn entry_overflow_is_cleared() {
        // Longer than the entry buffer, so the buffer overflows first
        let mut gate = PasscodeGate::new("123456789");
        assert_eq!(enter(&mut gate, &[1, 2, 3, 4, 5, 6, 7, 8]), None);
        assert_eq!(gate.entry().len(), PASSCODE_CAPACITY);
        assert_eq!(gate.add_digit(9), None);
        assert_eq!(gate.entry(), "");
        assert!(gate.is_locked());
    }

    #[test]
    fn validate_if_complete_waits_for_full_entry() {
        let mut gate = PasscodeGate::new("12");
        gate.add_digit(1);
        assert_eq!(gate.validate_if_complete(), None);
        assert_eq!(gate.entry(), "1");
    }
}
