#![no_std]
// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.
#![no_main]

use blackpill_board::{app, Mmio};
use cortex_m_rt::entry;
use panic_halt as _;

#[entry]
fn main() -> ! {
    // SAFETY: running on the STM32F411 and this is the only register bus
    // handle in the program.
    let mut bus = unsafe { Mmio::new() };

    // Inner debounce iterations are single NOPs so the spin survives -O.
    app::run(&mut bus, cortex_m::asm::nop)
}
