// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! STM32F411 memory map (RM0383) for the blocks the firmware touches.

// AHB1
pub const RCC_BASE: u32 = 0x4002_3800;
pub const GPIOA_BASE: u32 = 0x4002_0000;
pub const GPIOB_BASE: u32 = 0x4002_0400;
pub const GPIOC_BASE: u32 = 0x4002_0800;
pub const GPIOD_BASE: u32 = 0x4002_0C00;
pub const GPIOE_BASE: u32 = 0x4002_1000;
pub const GPIOH_BASE: u32 = 0x4002_1C00;

/// Size of one GPIO register block.
pub const GPIO_BLOCK_SIZE: u32 = 0x400;

// RCC register offsets
pub const RCC_AHB1ENR_OFFSET: u32 = 0x30;
pub const RCC_APB1ENR_OFFSET: u32 = 0x40;
pub const RCC_APB2ENR_OFFSET: u32 = 0x44;

// GPIO register offsets
pub const GPIO_MODER_OFFSET: u32 = 0x00;
pub const GPIO_OTYPER_OFFSET: u32 = 0x04;
pub const GPIO_OSPEEDR_OFFSET: u32 = 0x08;
pub const GPIO_PUPDR_OFFSET: u32 = 0x0C;
pub const GPIO_IDR_OFFSET: u32 = 0x10;
pub const GPIO_ODR_OFFSET: u32 = 0x14;
pub const GPIO_BSRR_OFFSET: u32 = 0x18;
pub const GPIO_LCKR_OFFSET: u32 = 0x1C;
pub const GPIO_AFRL_OFFSET: u32 = 0x20;
pub const GPIO_AFRH_OFFSET: u32 = 0x24;

/// GPIO ports present on the STM32F411 (there is no F or G).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    H,
}

impl Port {
    pub const ALL: [Port; 6] = [Port::A, Port::B, Port::C, Port::D, Port::E, Port::H];

    pub const fn base(self) -> u32 {
        match self {
            Port::A => GPIOA_BASE,
            Port::B => GPIOB_BASE,
            Port::C => GPIOC_BASE,
            Port::D => GPIOD_BASE,
            Port::E => GPIOE_BASE,
            Port::H => GPIOH_BASE,
        }
    }

    /// Position of the port in the AHB1 address space, which is also its
    /// clock-enable bit in RCC_AHB1ENR.
    pub const fn index(self) -> u32 {
        (self.base() - GPIOA_BASE) / GPIO_BLOCK_SIZE
    }

    pub const fn letter(self) -> char {
        match self {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
            Port::D => 'D',
            Port::E => 'E',
            Port::H => 'H',
        }
    }

    /// Port whose register block contains `addr`, if any.
    pub fn containing(addr: u32) -> Option<Port> {
        Self::ALL
            .into_iter()
            .find(|port| addr >= port.base() && addr < port.base() + GPIO_BLOCK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_index_matches_ahb1enr_layout() {
        assert_eq!(Port::A.index(), 0);
        assert_eq!(Port::B.index(), 1);
        assert_eq!(Port::C.index(), 2);
        assert_eq!(Port::E.index(), 4);
        assert_eq!(Port::H.index(), 7);
    }

    #[test]
    fn test_containing() {
        assert_eq!(Port::containing(GPIOA_BASE), Some(Port::A));
        assert_eq!(Port::containing(GPIOC_BASE + GPIO_BSRR_OFFSET), Some(Port::C));
        assert_eq!(Port::containing(GPIOC_BASE + GPIO_BLOCK_SIZE), Some(Port::D));
        assert_eq!(Port::containing(0x4002_1400), None);
        assert_eq!(Port::containing(RCC_BASE), None);
    }
}
