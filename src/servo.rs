// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hobby servo output on a single PWM channel.
//!
//! A servo is commanded with a 50 Hz pulse train whose high time encodes the
//! target: 544µs is 0 degrees, 2400µs is 180 degrees. Positional servos move
//! to that angle; continuous-rotation servos interpret it as a speed where 90
//! is stopped.
//!
//! # Examples
//!
//! ```ignore
//! use servo::Servo;
//!
//! let mut pitch = Servo::new(pwm_pitch);
//!
//! // Level the barrel
//! pitch.write(100);
//! ```

use embedded_hal::pwm::SetDutyCycle;

use crate::config::{SERVO_MAX_ANGLE, SERVO_MAX_PULSE_US, SERVO_MIN_PULSE_US, SERVO_PERIOD_US};

/// Converts a servo angle to its pulse width in microseconds.
///
/// Angles outside 0-180 saturate at the nearest end of the range.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(pulse_width_us(0), 544);
/// assert_eq!(pulse_width_us(180), 2400);
/// ```
pub fn pulse_width_us(angle: i16) -> u16 {
    let angle = angle.clamp(0, SERVO_MAX_ANGLE) as u32;
    let span = u32::from(SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US);
    SERVO_MIN_PULSE_US + (span * angle / SERVO_MAX_ANGLE as u32) as u16
}

/// One servo channel driven by a PWM output.
///
/// Remembers the last value written so motion routines can compute
/// relative moves without reading back from the hardware.
pub struct Servo<P> {
    /// PWM output carrying the servo signal
    pwm: P,
    /// Last commanded angle or speed
    value: i16,
}

impl<P: SetDutyCycle> Servo<P> {
    /// Wraps a PWM output. Nothing is written until the first [`write`](Self::write).
    ///
    /// # Arguments
    ///
    /// * `pwm` - PWM channel configured for a 20ms period
    /// * `initial` - Value reported by [`value`](Self::value) before any write
    pub fn new(pwm: P, initial: i16) -> Self {
        Self { pwm, value: initial }
    }

    /// Commands the servo to `value` and remembers it.
    ///
    /// The pulse width is expressed as a fraction of the servo period, so the
    /// write is independent of the PWM top value.
    pub fn write(&mut self, value: i16) {
        let pulse = pulse_width_us(value);
        self.pwm.set_duty_cycle_fraction(pulse, SERVO_PERIOD_US).ok();
        self.value = value;
        trace!("servo <- {} ({}us)", value, pulse);
    }

    /// Returns the last commanded value.
    pub fn value(&self) -> i16 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::Channel;
    use crate::mock::{Event, Journal, MockPwm};

    #[test]
    fn pulse_width_spans_servo_range() {
        assert_eq!(pulse_width_us(0), SERVO_MIN_PULSE_US);
        assert_eq!(pulse_width_us(90), 1472);
        assert_eq!(pulse_width_us(180), SERVO_MAX_PULSE_US);
    }

    #[test]
    fn pulse_width_saturates_out_of_range_angles() {
        assert_eq!(pulse_width_us(-30), SERVO_MIN_PULSE_US);
        assert_eq!(pulse_width_us(250), SERVO_MAX_PULSE_US);
    }

    #[test]
    fn write_emits_pulse_and_tracks_value() {
        let journal = Journal::default();
        let mut servo = Servo::new(MockPwm::new(Channel::Pitch, &journal), 90);
        assert_eq!(servo.value(), 90);

        servo.write(45);

        assert_eq!(servo.value(), 45);
        assert_eq!(
            journal.events(),
            vec![Event::Write {
                channel: Channel::Pitch,
                pulse_us: pulse_width_us(45),
            }]
        );
    }
}
