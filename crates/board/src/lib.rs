// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Bare-metal support for the STM32F411 "Black Pill" button/LED firmware.
//!
//! The crate is split in two halves:
//!
//! * [`field`], [`map`] and the pure helpers in [`rcc`] encode register bit
//!   fields and addresses. They never touch hardware and are tested on the host.
//! * [`access`] is the hardware-access boundary. Every register read or write
//!   goes through the [`access::RegisterAccess`] trait; [`access::Mmio`] is the
//!   only implementation that dereferences physical addresses.
//!
//! [`app`] ties both together into the initializer and the polling loop.
#![cfg_attr(not(test), no_std)]

pub mod access;
pub mod app;
pub mod delay;
pub mod field;
pub mod gpio;
pub mod map;
pub mod pin;
pub mod rcc;

pub use access::{Mmio, Register, RegisterAccess};
pub use field::{Mode, OutputType, Pin, PinError, Pull};
pub use map::Port;
