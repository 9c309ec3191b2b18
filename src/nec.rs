// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! NEC IR protocol timing rules and repeat tracking.
//!
//! This module holds the hardware-independent half of the NEC decoder: it
//! classifies measured pulse widths and turns frames into [`IrEvent`]s. The
//! GPIO half that measures the pulses lives in `ir_receiver`.
//!
//! # NEC Protocol Timing
//!
//! - **Lead Pulse**: 9ms LOW
//! - **Space**: 4.5ms HIGH for a data frame, 2.25ms HIGH for a repeat frame
//! - **Logical '0'**: 560µs LOW + 560µs HIGH
//! - **Logical '1'**: 560µs LOW + 1.69ms HIGH
//! - **Frame Format**: 8-bit address, 8-bit inverse address, 8-bit command, 8-bit inverse command
//!
//! # Data Frame Structure
//!
//! ```text
//! [Lead Pulse][Space][Address][~Address][Command][~Command]
//!    9ms LOW   4.5ms   8 bits    8 bits    8 bits   8 bits
//! ```
//!
//! While a button is held the remote sends one data frame followed by a
//! repeat frame (lead pulse + 2.25ms space, no data) every 108ms.

/// Shortest accepted lead pulse
pub const LEAD_MIN_US: u64 = 8_000;

/// Longest accepted lead pulse
pub const LEAD_MAX_US: u64 = 10_000;

/// Accepted space after the lead pulse of a data frame
pub const DATA_SPACE_US: core::ops::RangeInclusive<u64> = 3_500..=5_000;

/// Accepted space after the lead pulse of a repeat frame
pub const REPEAT_SPACE_US: core::ops::RangeInclusive<u64> = 1_750..=2_750;

/// Spaces shorter than this are noise
pub const BIT_MIN_US: u64 = 200;

/// Spaces longer than this encode a '1'
pub const BIT_ONE_THRESHOLD_US: u64 = 1_200;

/// Interval between repeat frames while a button is held
pub const REPEAT_PERIOD_MS: u64 = 108;

/// A repeat frame arriving later than this after the last event is stale.
///
/// Between two events the receiver is blind while the controller runs the
/// previous action (a step or a shot blocks for up to ~165ms) and can then
/// miss up to two repeat frames that were already in flight.
pub const REPEAT_TIMEOUT_MS: u64 = 500;

/// A decoded remote button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrEvent {
    /// NEC command byte of the button
    pub command: u8,
    /// Whether this event comes from the button being held
    pub repeat: bool,
}

/// Kind of frame announced by the lead pulse and space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Leader {
    /// 32 data bits follow
    Data,
    /// Button still held, no data follows
    Repeat,
}

/// Classifies a lead pulse and the space after it.
///
/// # Arguments
///
/// * `mark_us` - Length of the LOW lead pulse
/// * `space_us` - Length of the HIGH space that followed
///
/// # Returns
///
/// * `Some(leader)` - The timing matches a data or repeat frame
/// * `None` - Not an NEC frame
pub fn classify_leader(mark_us: u64, space_us: u64) -> Option<Leader> {
    if !(LEAD_MIN_US..=LEAD_MAX_US).contains(&mark_us) {
        return None;
    }
    if DATA_SPACE_US.contains(&space_us) {
        Some(Leader::Data)
    } else if REPEAT_SPACE_US.contains(&space_us) {
        Some(Leader::Repeat)
    } else {
        None
    }
}

/// Decodes one data bit from the HIGH time that follows its 560µs mark.
pub fn bit_from_space(space_us: u64) -> Option<bool> {
    if space_us < BIT_MIN_US {
        None
    } else {
        Some(space_us > BIT_ONE_THRESHOLD_US)
    }
}

/// Checks the inverse bytes of a frame and returns its command.
///
/// Bytes arrive LSB first, in the order address, ~address, command,
/// ~command.
pub fn command_from_frame(data: [u8; 4]) -> Option<u8> {
    let address_ok = data[0].wrapping_add(data[1]) == 0xFF;
    let command_ok = data[2].wrapping_add(data[3]) == 0xFF;
    (address_ok && command_ok).then_some(data[2])
}

/// Turns decoded frames into events, resolving repeat frames to the button
/// that is being held.
#[derive(Debug, Default)]
pub struct RepeatTracker {
    /// Command and time (ms) of the most recent event
    last: Option<(u8, u64)>,
}

impl RepeatTracker {
    /// Creates a tracker with no button held.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Records a data frame carrying `command`.
    pub fn data(&mut self, command: u8, now_ms: u64) -> IrEvent {
        self.last = Some((command, now_ms));
        IrEvent {
            command,
            repeat: false,
        }
    }

    /// Records a repeat frame.
    ///
    /// Returns `None` if no button was pressed yet, or if the previous event
    /// is older than [`REPEAT_TIMEOUT_MS`]. A stale repeat still proves the
    /// button is held, so it restarts the timeout and the next repeat frame
    /// is delivered again.
    pub fn repeat(&mut self, now_ms: u64) -> Option<IrEvent> {
        let (command, at) = self.last?;
        self.last = Some((command, now_ms));
        if now_ms.saturating_sub(at) > REPEAT_TIMEOUT_MS {
            debug!("Stale repeat frame after {}ms", now_ms.saturating_sub(at));
            return None;
        }
        Some(IrEvent {
            command,
            repeat: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_leaders() {
        assert_eq!(classify_leader(9_000, 4_500), Some(Leader::Data));
        assert_eq!(classify_leader(9_000, 2_250), Some(Leader::Repeat));
        assert_eq!(classify_leader(7_000, 4_500), None);
        assert_eq!(classify_leader(9_000, 3_000), None);
        assert_eq!(classify_leader(9_000, 6_000), None);
    }

    #[test]
    fn decodes_bits_by_space_length() {
        assert_eq!(bit_from_space(560), Some(false));
        assert_eq!(bit_from_space(1_690), Some(true));
        assert_eq!(bit_from_space(100), None);
    }

    #[test]
    fn validates_inverse_bytes() {
        assert_eq!(command_from_frame([0x00, 0xFF, 0x1C, 0xE3]), Some(0x1C));
        assert_eq!(command_from_frame([0x00, 0xFF, 0x1C, 0xE2]), None);
        assert_eq!(command_from_frame([0x00, 0xFE, 0x1C, 0xE3]), None);
    }

    #[test]
    fn repeat_frames_follow_the_held_button() {
        let mut tracker = RepeatTracker::new();
        assert_eq!(
            tracker.data(0x52, 1_000),
            IrEvent {
                command: 0x52,
                repeat: false
            }
        );
        assert_eq!(
            tracker.repeat(1_108),
            Some(IrEvent {
                command: 0x52,
                repeat: true
            })
        );
        assert_eq!(
            tracker.repeat(1_216),
            Some(IrEvent {
                command: 0x52,
                repeat: true
            })
        );
    }

    #[test]
    fn held_key_survives_a_blocking_step() {
        // Left arrow: the receiver is busy for the 32 data bits and the
        // 155ms yaw pulse, then catches every repeat frame after that
        let mut tracker = RepeatTracker::new();
        tracker.data(0x08, 10_000);

        for now in [10_322, 10_430, 10_538] {
            assert_eq!(
                tracker.repeat(now),
                Some(IrEvent {
                    command: 0x08,
                    repeat: true
                })
            );
        }
    }

    #[test]
    fn orphan_and_stale_repeats_are_dropped() {
        let mut tracker = RepeatTracker::new();
        assert_eq!(tracker.repeat(50), None);
        assert_eq!(tracker.repeat(50 + REPEAT_PERIOD_MS), None);

        tracker.data(0x45, 1_000);
        assert_eq!(tracker.repeat(1_000 + REPEAT_TIMEOUT_MS + 1), None);
        // Still held after the long gap: the stream resumes
        assert_eq!(
            tracker.repeat(1_000 + REPEAT_TIMEOUT_MS + 1 + REPEAT_PERIOD_MS),
            Some(IrEvent {
                command: 0x45,
                repeat: true
            })
        );
    }
}
