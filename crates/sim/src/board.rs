// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::chip::Stm32F411;
use crate::{SimResult, SimulationError};
use anyhow::{Context, Result};
use blackpill_board::{Pin, Port, RegisterAccess};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BLACK_PILL_MANIFEST: &str = include_str!("../boards/blackpill.yaml");

/// Default schema version for YAML manifests
fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoardIoKind {
    Led,
    Button,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoardIoBinding {
    pub id: String,
    pub kind: BoardIoKind,
    pub peripheral: String, // "gpioa", "gpioc", ...
    pub pin: u8,
    #[serde(default = "default_true")]
    pub active_high: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoardManifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub name: String,
    pub chip: String,
    #[serde(default)]
    pub board_io: Vec<BoardIoBinding>,
}

impl BoardManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read board manifest {:?}", path))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse Board Manifest")
    }

    /// WeAct Black Pill: PA0 key to ground, PC13 LED.
    pub fn black_pill() -> Result<Self> {
        Self::from_yaml(BLACK_PILL_MANIFEST)
    }
}

fn parse_port(name: &str) -> SimResult<Port> {
    let v = name.trim().to_ascii_lowercase();
    let letter = v.strip_prefix("gpio").unwrap_or(&v);
    match letter {
        "a" => Ok(Port::A),
        "b" => Ok(Port::B),
        "c" => Ok(Port::C),
        "d" => Ok(Port::D),
        "e" => Ok(Port::E),
        "h" => Ok(Port::H),
        _ => Err(SimulationError::UnknownPeripheral(name.to_string())),
    }
}

#[derive(Debug, Clone)]
struct BoardIo {
    id: String,
    kind: BoardIoKind,
    port: Port,
    pin: Pin,
    active_high: bool,
}

impl BoardIo {
    fn resolve(binding: &BoardIoBinding) -> SimResult<Self> {
        Ok(Self {
            id: binding.id.clone(),
            kind: binding.kind,
            port: parse_port(&binding.peripheral)?,
            pin: Pin::new(binding.pin)?,
            active_high: binding.active_high,
        })
    }
}

/// A simulated chip with buttons and LEDs wired to it.
#[derive(Debug)]
pub struct SimBoard {
    name: String,
    chip: Stm32F411,
    io: Vec<BoardIo>,
}

impl SimBoard {
    pub fn new(manifest: &BoardManifest) -> SimResult<Self> {
        if !manifest.chip.eq_ignore_ascii_case("stm32f411") {
            return Err(SimulationError::UnsupportedChip(manifest.chip.clone()));
        }
        let io = manifest
            .board_io
            .iter()
            .map(BoardIo::resolve)
            .collect::<SimResult<Vec<_>>>()?;

        tracing::info!("Board '{}': {} I/O bindings", manifest.name, io.len());
        Ok(Self {
            name: manifest.name.clone(),
            chip: Stm32F411::new(),
            io,
        })
    }

    pub fn black_pill() -> Result<Self> {
        let manifest = BoardManifest::black_pill()?;
        Ok(Self::new(&manifest)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chip(&self) -> &Stm32F411 {
        &self.chip
    }

    pub fn chip_mut(&mut self) -> &mut Stm32F411 {
        &mut self.chip
    }

    /// Close the button contact: the pin is tied to its active level.
    pub fn press(&mut self, id: &str) -> SimResult<()> {
        let io = self.binding(id, BoardIoKind::Button)?.clone();
        tracing::debug!("{} pressed", io.id);
        self.chip
            .gpio_mut(io.port)
            .drive(io.pin, io.active_high);
        Ok(())
    }

    /// Open the button contact: the pin is left to its pull resistor.
    pub fn release(&mut self, id: &str) -> SimResult<()> {
        let io = self.binding(id, BoardIoKind::Button)?.clone();
        tracing::debug!("{} released", io.id);
        self.chip.gpio_mut(io.port).release(io.pin);
        Ok(())
    }

    pub fn led_is_on(&self, id: &str) -> SimResult<bool> {
        let io = self.binding(id, BoardIoKind::Led)?;
        Ok(self.chip.gpio(io.port).level(io.pin) == io.active_high)
    }

    fn binding(&self, id: &str, expected: BoardIoKind) -> SimResult<&BoardIo> {
        let io = self
            .io
            .iter()
            .find(|io| io.id == id)
            .ok_or_else(|| SimulationError::UnknownBoardIo(id.to_string()))?;
        if io.kind != expected {
            return Err(SimulationError::WrongKind {
                id: id.to_string(),
                expected,
                actual: io.kind,
            });
        }
        Ok(io)
    }
}

impl RegisterAccess for SimBoard {
    fn read(&self, addr: u32) -> u32 {
        self.chip.read(addr)
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.chip.write(addr, value)
    }
}
