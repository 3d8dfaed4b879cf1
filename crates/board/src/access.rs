// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Hardware-access boundary.
//!
//! Drivers never dereference addresses themselves. They hold [`Register`]
//! handles and perform every access through a [`RegisterAccess`]
//! implementation: [`Mmio`] on the target, a simulator or a fake on the host.

/// 32-bit register bus.
///
/// Implementations must perform each call exactly once and in program order;
/// for memory-mapped I/O that means volatile accesses.
pub trait RegisterAccess {
    fn read(&self, addr: u32) -> u32;
    fn write(&mut self, addr: u32, value: u32);
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    fn read(&self, addr: u32) -> u32 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u32, value: u32) {
        (**self).write(addr, value)
    }
}

/// Volatile access to the physical address space.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// Only call this on a target where the addresses in [`crate::map`] are
    /// the STM32F411 peripheral blocks, and keep a single instance alive so
    /// read-modify-write sequences are not interleaved.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterAccess for Mmio {
    #[inline(always)]
    fn read(&self, addr: u32) -> u32 {
        // SAFETY: `Mmio::new` requires `addr` to be a mapped, aligned
        // peripheral register.
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline(always)]
    fn write(&mut self, addr: u32, value: u32) {
        // SAFETY: see `read`.
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}

/// Typed handle to one 32-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    addr: u32,
}

impl Register {
    pub const fn at(base: u32, offset: u32) -> Self {
        Self {
            addr: base + offset,
        }
    }

    pub const fn addr(self) -> u32 {
        self.addr
    }

    pub fn read<A: RegisterAccess + ?Sized>(self, bus: &A) -> u32 {
        bus.read(self.addr)
    }

    pub fn write<A: RegisterAccess + ?Sized>(self, bus: &mut A, value: u32) {
        bus.write(self.addr, value)
    }

    /// Read-modify-write: one read, one write, nothing in between.
    pub fn modify<A, F>(self, bus: &mut A, f: F)
    where
        A: RegisterAccess + ?Sized,
        F: FnOnce(u32) -> u32,
    {
        let value = bus.read(self.addr);
        bus.write(self.addr, f(value));
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{Access, FakeRegisters};
    use super::*;

    #[test]
    fn test_register_address() {
        let reg = Register::at(0x4002_0800, 0x18);
        assert_eq!(reg.addr(), 0x4002_0818);
    }

    #[test]
    fn test_modify_is_single_read_then_write() {
        let mut bus = FakeRegisters::new().with(0x100, 0xF0);
        let reg = Register::at(0x100, 0);

        reg.modify(&mut bus, |v| v | 0x01);

        assert_eq!(bus.peek(0x100), 0xF1);
        assert_eq!(
            bus.journal(),
            vec![Access::Read(0x100), Access::Write(0x100, 0xF1)]
        );
    }

    #[test]
    fn test_access_through_mut_ref() {
        let mut bus = FakeRegisters::new();
        {
            let mut by_ref = &mut bus;
            Register::at(0x20, 0).write(&mut by_ref, 7);
            assert_eq!(Register::at(0x20, 0).read(&by_ref), 7);
        }
        assert_eq!(bus.writes(), vec![(0x20, 7)]);
    }
}
