// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Bit-field encoding for the STM32F4 GPIO register block.
//!
//! MODER and PUPDR carry a 2-bit field per pin at bit `2n`, OTYPER and IDR a
//! single bit at `n`. BSRR sets pin `n` through bit `n` and resets it through
//! bit `n + 16`.

/// Highest pin index in a GPIO port.
pub const MAX_PIN: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    #[error("GPIO pin {0} out of range (0..=15)")]
    OutOfRange(u8),
}

/// Index of a pin inside one GPIO port, always in `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    pub const fn new(index: u8) -> Result<Self, PinError> {
        if index > MAX_PIN {
            Err(PinError::OutOfRange(index))
        } else {
            Ok(Self(index))
        }
    }

    /// Compile-time constructor for board constants.
    pub const fn from_const(index: u8) -> Self {
        match Self::new(index) {
            Ok(pin) => pin,
            Err(_) => panic!("GPIO pin out of range"),
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// All sixteen pins of a port, in order.
    pub fn all() -> impl Iterator<Item = Pin> {
        (0..=MAX_PIN).map(Pin)
    }
}

impl TryFrom<u8> for Pin {
    type Error = PinError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// MODER field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Mode {
    Input = 0,
    Output = 1,
    Alternate = 2,
    Analog = 3,
}

impl Mode {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Self::Input,
            1 => Self::Output,
            2 => Self::Alternate,
            _ => Self::Analog,
        }
    }
}

/// PUPDR field values. `0b11` is reserved on this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Pull {
    None = 0,
    Up = 1,
    Down = 2,
}

impl Pull {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits & 0b11 {
            0 => Some(Self::None),
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            _ => None,
        }
    }
}

/// OTYPER bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum OutputType {
    PushPull = 0,
    OpenDrain = 1,
}

impl OutputType {
    pub const fn bits(self) -> u32 {
        self as u32
    }
}

pub const fn mode_shift(pin: Pin) -> u32 {
    (pin.0 as u32) << 1
}

pub const fn mode_mask(pin: Pin) -> u32 {
    0b11 << mode_shift(pin)
}

pub const fn pull_shift(pin: Pin) -> u32 {
    (pin.0 as u32) << 1
}

pub const fn pull_mask(pin: Pin) -> u32 {
    0b11 << pull_shift(pin)
}

pub const fn otype_shift(pin: Pin) -> u32 {
    pin.0 as u32
}

pub const fn otype_mask(pin: Pin) -> u32 {
    1 << otype_shift(pin)
}

pub const fn idr_mask(pin: Pin) -> u32 {
    1 << pin.0
}

pub const fn set_bit(pin: Pin) -> u32 {
    1 << pin.0
}

pub const fn reset_bit(pin: Pin) -> u32 {
    1 << (pin.0 + 16)
}

/// Replace the field selected by `mask` with `value << shift`, keeping every
/// other bit of `reg`.
pub const fn insert(reg: u32, mask: u32, shift: u32, value: u32) -> u32 {
    (reg & !mask) | ((value << shift) & mask)
}

pub const fn with_mode(reg: u32, pin: Pin, mode: Mode) -> u32 {
    insert(reg, mode_mask(pin), mode_shift(pin), mode.bits())
}

pub const fn with_pull(reg: u32, pin: Pin, pull: Pull) -> u32 {
    insert(reg, pull_mask(pin), pull_shift(pin), pull.bits())
}

pub const fn with_output_type(reg: u32, pin: Pin, otype: OutputType) -> u32 {
    insert(reg, otype_mask(pin), otype_shift(pin), otype.bits())
}

pub const fn mode_of(reg: u32, pin: Pin) -> Mode {
    Mode::from_bits(reg >> mode_shift(pin))
}

pub const fn pull_of(reg: u32, pin: Pin) -> Option<Pull> {
    Pull::from_bits(reg >> pull_shift(pin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_range() {
        assert_eq!(Pin::new(0).unwrap().index(), 0);
        assert_eq!(Pin::new(15).unwrap().index(), 15);
        assert_eq!(Pin::new(16), Err(PinError::OutOfRange(16)));
        assert_eq!(Pin::try_from(200u8), Err(PinError::OutOfRange(200)));
        assert_eq!(Pin::all().count(), 16);
    }

    #[test]
    fn test_mode_mask_covers_two_bits_per_pin() {
        for pin in Pin::all() {
            let n = pin.index() as u32;
            assert_eq!(mode_mask(pin), (1 << (2 * n)) | (1 << (2 * n + 1)));
            assert_eq!(mode_mask(pin).count_ones(), 2);
            assert_eq!(mode_shift(pin), 2 * n);
            assert_eq!(Mode::Alternate.bits() << mode_shift(pin), 0b10 << (2 * n));
        }
    }

    #[test]
    fn test_pull_fields_match_mode_layout() {
        for pin in Pin::all() {
            assert_eq!(pull_mask(pin), mode_mask(pin));
            assert_eq!(pull_shift(pin), mode_shift(pin));
            assert_eq!(
                Pull::Up.bits() << pull_shift(pin),
                1 << (2 * pin.index() as u32)
            );
        }
    }

    #[test]
    fn test_set_and_reset_bits_are_disjoint() {
        for pin in Pin::all() {
            let n = pin.index() as u32;
            assert_eq!(set_bit(pin), 1 << n);
            assert_eq!(reset_bit(pin), 1 << (n + 16));
            assert_eq!(set_bit(pin) & reset_bit(pin), 0);
        }
    }

    #[test]
    fn test_with_mode_preserves_other_pins() {
        let pa0 = Pin::from_const(0);
        let pc13 = Pin::from_const(13);

        // Pin 0 in analog mode, everything else zero.
        let reg = with_mode(0, pa0, Mode::Analog);
        let reg = with_mode(reg, pc13, Mode::Output);

        assert_eq!(mode_of(reg, pa0), Mode::Analog);
        assert_eq!(mode_of(reg, pc13), Mode::Output);
        assert_eq!(reg & mode_mask(pa0), 0b11);
        assert_eq!(reg & !(mode_mask(pa0) | mode_mask(pc13)), 0);
    }

    #[test]
    fn test_with_mode_clears_stale_bits() {
        let pin = Pin::from_const(13);
        let reg = with_mode(u32::MAX, pin, Mode::Input);
        assert_eq!(reg, !mode_mask(pin));

        let reg = with_mode(u32::MAX, pin, Mode::Output);
        assert_eq!(reg & mode_mask(pin), 0b01 << 26);
        assert_eq!(reg | mode_mask(pin), u32::MAX);
    }

    #[test]
    fn test_pull_and_otype_encoding() {
        let pa0 = Pin::from_const(0);
        let pc13 = Pin::from_const(13);

        assert_eq!(with_pull(0, pa0, Pull::Up), 0b01);
        assert_eq!(with_pull(0, pa0, Pull::Down), 0b10);
        assert_eq!(with_pull(0xFFFF_FFFF, pc13, Pull::None), !(0b11 << 26));
        assert_eq!(pull_of(with_pull(0, pc13, Pull::Down), pc13), Some(Pull::Down));
        assert_eq!(pull_of(0b11, pa0), None);

        assert_eq!(with_output_type(0, pc13, OutputType::OpenDrain), 1 << 13);
        assert_eq!(with_output_type(0xFFFF, pc13, OutputType::PushPull), 0xDFFF);
    }

    #[test]
    fn test_idr_mask() {
        assert_eq!(idr_mask(Pin::from_const(0)), 0x0001);
        assert_eq!(idr_mask(Pin::from_const(15)), 0x8000);
    }
}
