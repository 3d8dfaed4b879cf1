// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod board;
pub mod chip;
pub mod peripherals;

pub use board::{BoardIoBinding, BoardIoKind, BoardManifest, SimBoard};
pub use chip::{BusAccess, Stm32F411};

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Memory access violation at {0:#x}")]
    MemoryViolation(u32),
    #[error("Unaligned register access at {0:#x}")]
    Unaligned(u32),
    #[error("Unsupported chip '{0}'; supported: stm32f411")]
    UnsupportedChip(String),
    #[error("Unknown peripheral '{0}'")]
    UnknownPeripheral(String),
    #[error("Unknown board I/O '{0}'")]
    UnknownBoardIo(String),
    #[error("Board I/O '{id}' is a {actual:?}, not a {expected:?}")]
    WrongKind {
        id: String,
        expected: BoardIoKind,
        actual: BoardIoKind,
    },
    #[error(transparent)]
    Pin(#[from] blackpill_board::PinError),
}

pub type SimResult<T> = Result<T, SimulationError>;

/// A memory-mapped register block, addressed by word offset from its base.
pub trait Peripheral: std::fmt::Debug + Send {
    fn read(&self, offset: u32) -> SimResult<u32>;
    fn write(&mut self, offset: u32, value: u32) -> SimResult<()>;
    fn snapshot(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}
