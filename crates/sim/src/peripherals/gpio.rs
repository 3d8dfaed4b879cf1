// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{SimResult, SimulationError};
use blackpill_board::field::{self, Mode, Pin, Pull};
use blackpill_board::map::{
    GPIO_AFRH_OFFSET, GPIO_AFRL_OFFSET, GPIO_BSRR_OFFSET, GPIO_IDR_OFFSET, GPIO_LCKR_OFFSET,
    GPIO_MODER_OFFSET, GPIO_ODR_OFFSET, GPIO_OSPEEDR_OFFSET, GPIO_OTYPER_OFFSET,
    GPIO_PUPDR_OFFSET,
};
use blackpill_board::Port;

/// STM32F4 GPIO port.
///
/// IDR is not stored: it is derived from the output latch for output pins,
/// from externally driven levels, and from the pull resistors otherwise.
#[derive(Debug, serde::Serialize)]
pub struct GpioPort {
    port: char,
    moder: u32,   // 0x00: mode register
    otyper: u32,  // 0x04: output type register
    ospeedr: u32, // 0x08: output speed register
    pupdr: u32,   // 0x0C: pull-up/pull-down register
    odr: u32,     // 0x14: output data register
    lckr: u32,    // 0x1C: configuration lock register
    afrl: u32,    // 0x20: alternate function low register
    afrh: u32,    // 0x24: alternate function high register
    driven: u16,
    levels: u16,
}

impl GpioPort {
    pub fn new(port: Port) -> Self {
        // Reset values differ on A and B because of the SWD/JTAG pins.
        let (moder, ospeedr, pupdr) = match port {
            Port::A => (0xA800_0000, 0x0C00_0000, 0x6400_0000),
            Port::B => (0x0000_0280, 0x0000_00C0, 0x0000_0100),
            _ => (0, 0, 0),
        };
        Self {
            port: port.letter(),
            moder,
            otyper: 0,
            ospeedr,
            pupdr,
            odr: 0,
            lckr: 0,
            afrl: 0,
            afrh: 0,
            driven: 0,
            levels: 0,
        }
    }

    pub fn moder(&self) -> u32 {
        self.moder
    }

    pub fn otyper(&self) -> u32 {
        self.otyper
    }

    pub fn pupdr(&self) -> u32 {
        self.pupdr
    }

    pub fn odr(&self) -> u32 {
        self.odr
    }

    /// Force an external level onto `pin`, as a button or jumper would.
    pub fn drive(&mut self, pin: Pin, high: bool) {
        let bit = 1u16 << pin.index();
        self.driven |= bit;
        if high {
            self.levels |= bit;
        } else {
            self.levels &= !bit;
        }
    }

    /// Stop driving `pin` externally.
    pub fn release(&mut self, pin: Pin) {
        let bit = 1u16 << pin.index();
        self.driven &= !bit;
        self.levels &= !bit;
    }

    /// Electrical level of one pin.
    pub fn level(&self, pin: Pin) -> bool {
        let bit = 1u16 << pin.index();
        match field::mode_of(self.moder, pin) {
            Mode::Output => self.odr & field::set_bit(pin) != 0,
            Mode::Analog => false,
            Mode::Input | Mode::Alternate => {
                if self.driven & bit != 0 {
                    self.levels & bit != 0
                } else {
                    // Floating inputs read low.
                    field::pull_of(self.pupdr, pin) == Some(Pull::Up)
                }
            }
        }
    }

    pub fn idr(&self) -> u32 {
        Pin::all()
            .filter(|&pin| self.level(pin))
            .fold(0, |acc, pin| acc | field::idr_mask(pin))
    }

    fn bsrr(&mut self, value: u32) {
        let set = value & 0xFFFF;
        let reset = (value >> 16) & 0xFFFF;
        // Set wins when both bits of a pin are written.
        self.odr = (self.odr & !reset) | set;
        tracing::trace!("GPIO{}: BSRR {:#010x} -> ODR {:#06x}", self.port, value, self.odr);
    }
}

impl crate::Peripheral for GpioPort {
    fn read(&self, offset: u32) -> SimResult<u32> {
        match offset {
            GPIO_MODER_OFFSET => Ok(self.moder),
            GPIO_OTYPER_OFFSET => Ok(self.otyper),
            GPIO_OSPEEDR_OFFSET => Ok(self.ospeedr),
            GPIO_PUPDR_OFFSET => Ok(self.pupdr),
            GPIO_IDR_OFFSET => Ok(self.idr()),
            GPIO_ODR_OFFSET => Ok(self.odr),
            // BSRR is write-only and reads as zero.
            GPIO_BSRR_OFFSET => Ok(0),
            GPIO_LCKR_OFFSET => Ok(self.lckr),
            GPIO_AFRL_OFFSET => Ok(self.afrl),
            GPIO_AFRH_OFFSET => Ok(self.afrh),
            _ => Err(SimulationError::MemoryViolation(offset)),
        }
    }

    fn write(&mut self, offset: u32, value: u32) -> SimResult<()> {
        match offset {
            GPIO_MODER_OFFSET => self.moder = value,
            GPIO_OTYPER_OFFSET => self.otyper = value & 0xFFFF,
            GPIO_OSPEEDR_OFFSET => self.ospeedr = value,
            GPIO_PUPDR_OFFSET => self.pupdr = value,
            GPIO_IDR_OFFSET => {
                tracing::trace!("GPIO{}: write to read-only IDR ignored", self.port);
            }
            GPIO_ODR_OFFSET => self.odr = value & 0xFFFF,
            GPIO_BSRR_OFFSET => self.bsrr(value),
            GPIO_LCKR_OFFSET => self.lckr = value & 0x1_FFFF,
            GPIO_AFRL_OFFSET => self.afrl = value,
            GPIO_AFRH_OFFSET => self.afrh = value,
            _ => return Err(SimulationError::MemoryViolation(offset)),
        }
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
