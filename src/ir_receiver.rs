// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! NEC IR receiver on an RP2350 GPIO pin.
//!
//! Measures pulse widths from a 38kHz IR receiver module by polling its
//! output and hands them to the [`nec`](crate::nec) timing rules. Data
//! frames and repeat frames both produce an [`IrEvent`], so a held button
//! yields a stream of events flagged as repeats.
//!
//! # Examples
//!
//! ```ignore
//! use ir_receiver::IrReceiver;
//!
//! let ir_pin = Input::new(p.PIN_5, Pull::Up);
//! let mut ir = IrReceiver::new(&ir_pin);
//!
//! if let Some(event) = ir.read_event() {
//!     info!("0x{:02X} repeat={}", event.command, event.repeat);
//! }
//! ```

use embassy_rp::gpio::{Input, Level};
use embassy_time::{Duration, Instant};

use crate::nec::{self, IrEvent, Leader, RepeatTracker};

/// How long to wait for a lead pulse before giving up
const IDLE_TIMEOUT_US: u64 = 150_000;

/// NEC IR protocol receiver and decoder.
///
/// # Hardware Requirements
///
/// - IR receiver module (38kHz carrier frequency)
/// - Output connected to RP2350 GPIO with pull-up resistor
/// - Receiver output is active LOW (pulls LOW when IR detected)
pub struct IrReceiver<'a> {
    /// GPIO input pin connected to IR receiver module
    pin: &'a Input<'a>,
    /// Last button seen, for resolving repeat frames
    tracker: RepeatTracker,
}

impl<'a> IrReceiver<'a> {
    /// Creates a new IR receiver instance.
    ///
    /// # Arguments
    ///
    /// * `pin` - GPIO input configured with pull-up resistor
    pub fn new(pin: &'a Input<'a>) -> Self {
        Self {
            pin,
            tracker: RepeatTracker::new(),
        }
    }

    /// Reads and decodes a single NEC frame.
    ///
    /// Busy-waits for up to ~150ms for IR activity.
    ///
    /// # Returns
    ///
    /// * `Some(event)` - A data frame, or a repeat frame for a recently pressed button
    /// * `None` - Timeout, bad timing, checksum mismatch, or stale repeat
    pub fn read_event(&mut self) -> Option<IrEvent> {
        self.wait_for_level(Level::Low, IDLE_TIMEOUT_US)?;
        let mark = self.wait_for_level(Level::High, 12_000)?;
        let space = self.wait_for_level(Level::Low, 7_000)?;
        let now_ms = Instant::now().as_millis();

        match nec::classify_leader(mark, space)? {
            Leader::Repeat => self.tracker.repeat(now_ms),
            Leader::Data => {
                let command = nec::command_from_frame(self.read_data()?)?;
                Some(self.tracker.data(command, now_ms))
            }
        }
    }

    /// Reads the 32 data bits of a frame, LSB first.
    fn read_data(&self) -> Option<[u8; 4]> {
        let mut data = [0u8; 4];
        for i in 0..32 {
            // 560µs mark
            self.wait_for_level(Level::High, 1_000)?;
            let space = self.wait_for_level(Level::Low, 2_500)?;
            if nec::bit_from_space(space)? {
                data[i / 8] |= 1 << (i % 8);
            }
        }
        Some(data)
    }

    /// Polls the pin until it reads `level`, returning the elapsed
    /// microseconds, or `None` after `timeout_us`.
    fn wait_for_level(&self, level: Level, timeout_us: u64) -> Option<u64> {
        let start = Instant::now();
        let timeout = Duration::from_micros(timeout_us);

        loop {
            if self.pin.get_level() == level {
                return Some(start.elapsed().as_micros());
            }
            if start.elapsed() > timeout {
                return None;
            }
        }
    }
}
