// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::access::{Register, RegisterAccess};
use crate::map::{Port, RCC_AHB1ENR_OFFSET, RCC_BASE};

/// RCC_AHB1ENR enable bit for a GPIO port.
pub const fn gpio_enable_bit(port: Port) -> u32 {
    1 << port.index()
}

pub const RCC_AHB1ENR_GPIOAEN: u32 = gpio_enable_bit(Port::A);
pub const RCC_AHB1ENR_GPIOCEN: u32 = gpio_enable_bit(Port::C);

/// `ahb1enr` with the clock of `port` switched on.
pub const fn with_gpio_enabled(ahb1enr: u32, port: Port) -> u32 {
    ahb1enr | gpio_enable_bit(port)
}

/// Reset and clock control. Only the AHB1 clock gates are driven.
#[derive(Debug, Clone, Copy)]
pub struct Rcc {
    ahb1enr: Register,
}

impl Rcc {
    pub const fn new() -> Self {
        Self {
            ahb1enr: Register::at(RCC_BASE, RCC_AHB1ENR_OFFSET),
        }
    }

    pub fn enable_gpio<A: RegisterAccess + ?Sized>(&self, bus: &mut A, port: Port) {
        self.ahb1enr.modify(bus, |r| with_gpio_enabled(r, port));
        log::debug!("RCC: GPIO{} clock enabled", port.letter());
    }

    pub fn is_gpio_enabled<A: RegisterAccess + ?Sized>(&self, bus: &A, port: Port) -> bool {
        self.ahb1enr.read(bus) & gpio_enable_bit(port) != 0
    }
}

impl Default for Rcc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::fake::FakeRegisters;

    const AHB1ENR: u32 = RCC_BASE + RCC_AHB1ENR_OFFSET;

    #[test]
    fn test_enable_bits() {
        assert_eq!(RCC_AHB1ENR_GPIOAEN, 1 << 0);
        assert_eq!(RCC_AHB1ENR_GPIOCEN, 1 << 2);
    }

    #[test]
    fn test_enable_a_then_c_from_zero() {
        let reg = with_gpio_enabled(with_gpio_enabled(0, Port::A), Port::C);
        assert_eq!(reg, 0b101);
    }

    #[test]
    fn test_enable_keeps_unrelated_bits() {
        for initial in [0u32, 0x0010_0000, 0xFFFF_0000, 0x8000_0002, u32::MAX] {
            let reg = with_gpio_enabled(with_gpio_enabled(initial, Port::A), Port::C);
            assert_eq!(reg & !0b101, initial & !0b101);
            assert_eq!(reg & 0b101, 0b101);
        }
    }

    #[test]
    fn test_enable_gpio_is_read_modify_write() {
        let mut bus = FakeRegisters::new().with(AHB1ENR, 0x0010_0000);
        let rcc = Rcc::new();

        rcc.enable_gpio(&mut bus, Port::A);
        rcc.enable_gpio(&mut bus, Port::C);

        assert_eq!(bus.peek(AHB1ENR), 0x0010_0005);
        assert_eq!(
            bus.writes(),
            vec![(AHB1ENR, 0x0010_0001), (AHB1ENR, 0x0010_0005)]
        );
        assert!(rcc.is_gpio_enabled(&bus, Port::A));
        assert!(!rcc.is_gpio_enabled(&bus, Port::B));
        assert!(rcc.is_gpio_enabled(&bus, Port::C));
    }
}
