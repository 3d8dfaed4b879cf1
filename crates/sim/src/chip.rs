// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::peripherals::{GpioPort, Rcc};
use crate::{Peripheral, SimResult, SimulationError};
use blackpill_board::map::{GPIO_BLOCK_SIZE, RCC_BASE};
use blackpill_board::{Port, RegisterAccess};
use std::cell::RefCell;

const RCC_SIZE: u32 = 0x400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusAccess {
    Read { addr: u32, value: u32 },
    Write { addr: u32, value: u32 },
}

/// RCC plus the six GPIO ports of an STM32F411, decoded on a 32-bit bus.
///
/// A GPIO port whose AHB1 clock is off reads as zero and drops writes, as
/// the silicon does.
#[derive(Debug)]
pub struct Stm32F411 {
    rcc: Rcc,
    gpio: Vec<(Port, GpioPort)>,
    journal: RefCell<Vec<BusAccess>>,
}

impl Stm32F411 {
    pub fn new() -> Self {
        Self {
            rcc: Rcc::new(),
            gpio: Port::ALL
                .into_iter()
                .map(|port| (port, GpioPort::new(port)))
                .collect(),
            journal: RefCell::new(Vec::new()),
        }
    }

    pub fn rcc(&self) -> &Rcc {
        &self.rcc
    }

    pub fn gpio(&self, port: Port) -> &GpioPort {
        &self.gpio[Self::slot(port)].1
    }

    pub fn gpio_mut(&mut self, port: Port) -> &mut GpioPort {
        &mut self.gpio[Self::slot(port)].1
    }

    /// Every bus access so far, in order.
    pub fn journal(&self) -> Vec<BusAccess> {
        self.journal.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|access| match *access {
                BusAccess::Write { addr, value } => Some((addr, value)),
                BusAccess::Read { .. } => None,
            })
            .collect()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn load(&self, addr: u32) -> SimResult<u32> {
        if addr % 4 != 0 {
            return Err(SimulationError::Unaligned(addr));
        }
        if (RCC_BASE..RCC_BASE + RCC_SIZE).contains(&addr) {
            return self
                .rcc
                .read(addr - RCC_BASE)
                .map_err(|_| SimulationError::MemoryViolation(addr));
        }
        let port = Port::containing(addr).ok_or(SimulationError::MemoryViolation(addr))?;
        if !self.rcc.gpio_clock_enabled(port) {
            tracing::warn!("read of GPIO{} at {:#x} with its clock off", port.letter(), addr);
            return Ok(0);
        }
        self.gpio(port)
            .read(addr - port.base())
            .map_err(|_| SimulationError::MemoryViolation(addr))
    }

    pub fn store(&mut self, addr: u32, value: u32) -> SimResult<()> {
        if addr % 4 != 0 {
            return Err(SimulationError::Unaligned(addr));
        }
        if (RCC_BASE..RCC_BASE + RCC_SIZE).contains(&addr) {
            return self
                .rcc
                .write(addr - RCC_BASE, value)
                .map_err(|_| SimulationError::MemoryViolation(addr));
        }
        let port = Port::containing(addr).ok_or(SimulationError::MemoryViolation(addr))?;
        if !self.rcc.gpio_clock_enabled(port) {
            tracing::warn!(
                "write of {:#x} to GPIO{} at {:#x} dropped, clock off",
                value,
                port.letter(),
                addr
            );
            return Ok(());
        }
        tracing::debug!("GPIO{} [{:#x}] <- {:#010x}", port.letter(), addr, value);
        self.gpio_mut(port)
            .write(addr - port.base(), value)
            .map_err(|_| SimulationError::MemoryViolation(addr))
    }

    pub fn snapshot(&self) -> serde_json::Value {
        let gpio: serde_json::Map<String, serde_json::Value> = self
            .gpio
            .iter()
            .map(|(port, regs)| {
                let name = format!("gpio{}", port.letter().to_ascii_lowercase());
                (name, regs.snapshot())
            })
            .collect();
        serde_json::json!({
            "rcc": self.rcc.snapshot(),
            "gpio": gpio,
        })
    }

    fn slot(port: Port) -> usize {
        match port {
            Port::A => 0,
            Port::B => 1,
            Port::C => 2,
            Port::D => 3,
            Port::E => 4,
            Port::H => 5,
        }
    }
}

impl Default for Stm32F411 {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterAccess for Stm32F411 {
    fn read(&self, addr: u32) -> u32 {
        let value = self.load(addr).unwrap_or_else(|e| {
            tracing::warn!("bus read: {}", e);
            0
        });
        self.journal
            .borrow_mut()
            .push(BusAccess::Read { addr, value });
        value
    }

    fn write(&mut self, addr: u32, value: u32) {
        if let Err(e) = self.store(addr, value) {
            tracing::warn!("bus write: {}", e);
        }
        self.journal
            .borrow_mut()
            .push(BusAccess::Write { addr, value });
    }
}
