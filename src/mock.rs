// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Host-side stand-ins for the PWM outputs and the blocking delay.
//!
//! Every servo write and every delay is appended to one shared [`Journal`]
//! so tests can check ordering across channels as well as elapsed time.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::actuator::{Actuators, Channel};
use crate::config::{MotionConfig, SERVO_PERIOD_US};
use crate::servo::pulse_width_us;

/// Something the hardware was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Write { channel: Channel, pulse_us: u16 },
    Delay(u32),
}

/// Shared, ordered record of hardware activity.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Pulse widths written to `channel`, in order.
    pub fn writes(&self, channel: Channel) -> Vec<u16> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::Write { channel: c, pulse_us } if c == channel => Some(pulse_us),
                _ => None,
            })
            .collect()
    }

    /// Number of writes of `angle` to `channel`.
    pub fn count_writes(&self, channel: Channel, angle: i16) -> usize {
        let pulse = pulse_width_us(angle);
        self.writes(channel).iter().filter(|&&p| p == pulse).count()
    }

    /// Pulse width of the most recent write to `channel`.
    pub fn last_write(&self, channel: Channel) -> Option<u16> {
        self.writes(channel).last().copied()
    }

    /// Total time spent in delays.
    pub fn elapsed_ms(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|event| match *event {
                Event::Delay(ms) => u64::from(ms),
                Event::Write { .. } => 0,
            })
            .sum()
    }
}

pub struct MockPwm {
    channel: Channel,
    journal: Journal,
}

impl MockPwm {
    pub fn new(channel: Channel, journal: &Journal) -> Self {
        Self {
            channel,
            journal: journal.clone(),
        }
    }
}

impl ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        SERVO_PERIOD_US
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.journal.push(Event::Write {
            channel: self.channel,
            pulse_us: duty,
        });
        Ok(())
    }
}

pub struct MockDelay {
    journal: Journal,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.journal.push(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.journal.push(Event::Delay(ms));
    }
}

pub type MockActuators = Actuators<MockPwm, MockDelay>;

/// Builds actuators over mock hardware, homed and with an empty journal.
pub fn actuators(motion: MotionConfig) -> (MockActuators, Journal) {
    let journal = Journal::default();
    let mut actuators = Actuators::new(
        MockPwm::new(Channel::Yaw, &journal),
        MockPwm::new(Channel::Pitch, &journal),
        MockPwm::new(Channel::Roll, &journal),
        MockDelay {
            journal: journal.clone(),
        },
        motion,
    );
    actuators.home();
    journal.clear();
    (actuators, journal)
}
