// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::access::{Register, RegisterAccess};
use crate::field::{self, Mode, OutputType, Pin, Pull};
use crate::map::{
    Port, GPIO_BSRR_OFFSET, GPIO_IDR_OFFSET, GPIO_MODER_OFFSET, GPIO_ODR_OFFSET,
    GPIO_OTYPER_OFFSET, GPIO_PUPDR_OFFSET,
};

/// Register handles of one STM32F4 GPIO port.
///
/// Configuration registers are updated read-modify-write. Output changes go
/// through BSRR, which only acts on the bits written as 1, so it is written
/// directly.
#[derive(Debug, Clone, Copy)]
pub struct Gpio {
    port: Port,
    moder: Register,
    otyper: Register,
    pupdr: Register,
    idr: Register,
    odr: Register,
    bsrr: Register,
}

impl Gpio {
    pub const fn new(port: Port) -> Self {
        let base = port.base();
        Self {
            port,
            moder: Register::at(base, GPIO_MODER_OFFSET),
            otyper: Register::at(base, GPIO_OTYPER_OFFSET),
            pupdr: Register::at(base, GPIO_PUPDR_OFFSET),
            idr: Register::at(base, GPIO_IDR_OFFSET),
            odr: Register::at(base, GPIO_ODR_OFFSET),
            bsrr: Register::at(base, GPIO_BSRR_OFFSET),
        }
    }

    pub const fn port(&self) -> Port {
        self.port
    }

    pub fn set_mode<A: RegisterAccess + ?Sized>(&self, bus: &mut A, pin: Pin, mode: Mode) {
        self.moder.modify(bus, |r| field::with_mode(r, pin, mode));
    }

    pub fn mode<A: RegisterAccess + ?Sized>(&self, bus: &A, pin: Pin) -> Mode {
        field::mode_of(self.moder.read(bus), pin)
    }

    pub fn set_output_type<A: RegisterAccess + ?Sized>(
        &self,
        bus: &mut A,
        pin: Pin,
        otype: OutputType,
    ) {
        self.otyper
            .modify(bus, |r| field::with_output_type(r, pin, otype));
    }

    pub fn set_pull<A: RegisterAccess + ?Sized>(&self, bus: &mut A, pin: Pin, pull: Pull) {
        self.pupdr.modify(bus, |r| field::with_pull(r, pin, pull));
    }

    /// Raw IDR contents.
    pub fn input<A: RegisterAccess + ?Sized>(&self, bus: &A) -> u32 {
        self.idr.read(bus)
    }

    pub fn is_low<A: RegisterAccess + ?Sized>(&self, bus: &A, pin: Pin) -> bool {
        self.input(bus) & field::idr_mask(pin) == 0
    }

    pub fn is_high<A: RegisterAccess + ?Sized>(&self, bus: &A, pin: Pin) -> bool {
        !self.is_low(bus, pin)
    }

    pub fn set_high<A: RegisterAccess + ?Sized>(&self, bus: &mut A, pin: Pin) {
        self.bsrr.write(bus, field::set_bit(pin));
    }

    pub fn set_low<A: RegisterAccess + ?Sized>(&self, bus: &mut A, pin: Pin) {
        self.bsrr.write(bus, field::reset_bit(pin));
    }

    /// Whether the output latch (ODR) drives `pin` high.
    pub fn output_is_set<A: RegisterAccess + ?Sized>(&self, bus: &A, pin: Pin) -> bool {
        self.odr.read(bus) & field::set_bit(pin) != 0
    }
}
