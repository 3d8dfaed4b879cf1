// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::access::RegisterAccess;
use crate::field::{Mode, OutputType, Pin, Pull};
use crate::gpio::Gpio;
use crate::map::Port;

/// Static configuration of one pin, applied once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    pub port: Port,
    pub pin: Pin,
    pub mode: Mode,
    pub pull: Pull,
    pub output_type: OutputType,
}

impl PinConfig {
    pub const fn input(port: Port, pin: Pin, pull: Pull) -> Self {
        Self {
            port,
            pin,
            mode: Mode::Input,
            pull,
            output_type: OutputType::PushPull,
        }
    }

    pub const fn output(port: Port, pin: Pin, output_type: OutputType, pull: Pull) -> Self {
        Self {
            port,
            pin,
            mode: Mode::Output,
            pull,
            output_type,
        }
    }

    pub const fn gpio(&self) -> Gpio {
        Gpio::new(self.port)
    }

    /// Writes MODER, then OTYPER (outputs only), then PUPDR.
    pub fn apply<A: RegisterAccess + ?Sized>(&self, bus: &mut A) {
        let gpio = self.gpio();
        gpio.set_mode(bus, self.pin, self.mode);
        if self.mode == Mode::Output {
            gpio.set_output_type(bus, self.pin, self.output_type);
        }
        gpio.set_pull(bus, self.pin, self.pull);

        log::debug!(
            "P{}{}: mode={:?} pull={:?} otype={:?}",
            self.port.letter(),
            self.pin.index(),
            self.mode,
            self.pull,
            self.output_type
        );
    }
}
