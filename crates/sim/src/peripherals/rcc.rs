// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{SimResult, SimulationError};
use blackpill_board::map::{RCC_AHB1ENR_OFFSET, RCC_APB1ENR_OFFSET, RCC_APB2ENR_OFFSET};
use blackpill_board::rcc::gpio_enable_bit;
use blackpill_board::Port;

const RCC_AHB2ENR_OFFSET: u32 = 0x34;

/// AHB1ENR reset value: only the DMA1/2 bus-matrix bit is set.
pub const AHB1ENR_RESET: u32 = 0x0010_0000;

/// Minimal RCC (Reset and Clock Control) model: the peripheral clock-enable
/// registers only.
#[derive(Debug, serde::Serialize)]
pub struct Rcc {
    ahb1enr: u32,
    ahb2enr: u32,
    apb1enr: u32,
    apb2enr: u32,
}

impl Rcc {
    pub fn new() -> Self {
        Self {
            ahb1enr: AHB1ENR_RESET,
            ahb2enr: 0,
            apb1enr: 0,
            apb2enr: 0,
        }
    }

    pub fn ahb1enr(&self) -> u32 {
        self.ahb1enr
    }

    pub fn gpio_clock_enabled(&self, port: Port) -> bool {
        self.ahb1enr & gpio_enable_bit(port) != 0
    }
}

impl Default for Rcc {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::Peripheral for Rcc {
    fn read(&self, offset: u32) -> SimResult<u32> {
        match offset {
            RCC_AHB1ENR_OFFSET => Ok(self.ahb1enr),
            RCC_AHB2ENR_OFFSET => Ok(self.ahb2enr),
            RCC_APB1ENR_OFFSET => Ok(self.apb1enr),
            RCC_APB2ENR_OFFSET => Ok(self.apb2enr),
            _ => Err(SimulationError::MemoryViolation(offset)),
        }
    }

    fn write(&mut self, offset: u32, value: u32) -> SimResult<()> {
        match offset {
            RCC_AHB1ENR_OFFSET => {
                let newly = value & !self.ahb1enr;
                for port in Port::ALL {
                    if newly & gpio_enable_bit(port) != 0 {
                        tracing::debug!("RCC: GPIO{} clock on", port.letter());
                    }
                }
                self.ahb1enr = value;
            }
            RCC_AHB2ENR_OFFSET => self.ahb2enr = value,
            RCC_APB1ENR_OFFSET => self.apb1enr = value,
            RCC_APB2ENR_OFFSET => self.apb2enr = value,
            _ => return Err(SimulationError::MemoryViolation(offset)),
        }
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::Rcc;
    use crate::Peripheral;
    use blackpill_board::Port;

    #[test]
    fn test_rcc_reset_values() {
        let rcc = Rcc::new();
        assert_eq!(rcc.read(0x30).unwrap(), 0x0010_0000);
        assert_eq!(rcc.read(0x40).unwrap(), 0);
        assert!(!rcc.gpio_clock_enabled(Port::A));
    }

    #[test]
    fn test_rcc_enable_registers() {
        let mut rcc = Rcc::new();
        rcc.write(0x30, 0x0010_0005).unwrap();
        rcc.write(0x44, 0x55).unwrap();
        assert!(rcc.gpio_clock_enabled(Port::A));
        assert!(!rcc.gpio_clock_enabled(Port::B));
        assert!(rcc.gpio_clock_enabled(Port::C));
        assert_eq!(rcc.read(0x44).unwrap(), 0x55);
    }

    #[test]
    fn test_rcc_unmapped_offset() {
        let mut rcc = Rcc::new();
        assert!(rcc.read(0x00).is_err());
        assert!(rcc.write(0x84, 1).is_err());
    }
}
