// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Button-to-LED application: one-time init, then poll forever.

use crate::access::RegisterAccess;
use crate::delay::{BusyWait, CounterPolicy};
use crate::field::{self, Pin};
use crate::gpio::Gpio;
use crate::rcc::Rcc;

/// Black Pill wiring and loop constants.
pub mod board {
    use crate::delay::CounterPolicy;
    use crate::field::{OutputType, Pin, Pull};
    use crate::map::Port;
    use crate::pin::PinConfig;

    /// PA0, user key to ground, needs the internal pull-up.
    pub const BUTTON: PinConfig = PinConfig::input(Port::A, Pin::from_const(0), Pull::Up);

    /// PC13 on-board LED.
    pub const LED: PinConfig =
        PinConfig::output(Port::C, Pin::from_const(13), OutputType::PushPull, Pull::None);

    pub const DEBOUNCE_COUNT: u32 = 5;
    pub const DEBOUNCE_DELAY: u32 = 1000;

    // Outer debounce counter is never re-armed, see `CounterPolicy::Latched`.
    pub const DEBOUNCE_POLICY: CounterPolicy = CounterPolicy::Latched;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedState {
    On,
    Off,
}

/// Active-low button: a clear input bit means pressed, which lights the LED.
pub const fn decide(idr: u32, button: Pin) -> LedState {
    if idr & field::idr_mask(button) == 0 {
        LedState::On
    } else {
        LedState::Off
    }
}

/// Clock both GPIO ports, then configure the button and the LED pins.
pub fn init<A: RegisterAccess + ?Sized>(bus: &mut A) {
    let rcc = Rcc::new();
    rcc.enable_gpio(bus, board::BUTTON.port);
    rcc.enable_gpio(bus, board::LED.port);

    board::BUTTON.apply(bus);
    board::LED.apply(bus);

    log::info!(
        "init done: button P{}{}, LED P{}{}",
        board::BUTTON.port.letter(),
        board::BUTTON.pin.index(),
        board::LED.port.letter(),
        board::LED.pin.index()
    );
}

/// Polling loop state.
#[derive(Debug, Clone)]
pub struct App {
    button: Gpio,
    button_pin: Pin,
    led: Gpio,
    led_pin: Pin,
    debounce: BusyWait,
    last: Option<LedState>,
}

impl App {
    pub fn new(policy: CounterPolicy) -> Self {
        Self {
            button: board::BUTTON.gpio(),
            button_pin: board::BUTTON.pin,
            led: board::LED.gpio(),
            led_pin: board::LED.pin,
            debounce: BusyWait::new(board::DEBOUNCE_COUNT, board::DEBOUNCE_DELAY, policy),
            last: None,
        }
    }

    pub fn last_state(&self) -> Option<LedState> {
        self.last
    }

    /// One loop iteration: sample the button, drive the LED, then debounce.
    pub fn poll_once<A, F>(&mut self, bus: &mut A, spin: F) -> LedState
    where
        A: RegisterAccess + ?Sized,
        F: FnMut(),
    {
        let state = decide(self.button.input(bus), self.button_pin);
        match state {
            LedState::On => self.led.set_high(bus, self.led_pin),
            LedState::Off => self.led.set_low(bus, self.led_pin),
        }
        if self.last != Some(state) {
            log::trace!("LED {:?}", state);
            self.last = Some(state);
        }

        self.debounce.wait(spin);
        state
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(board::DEBOUNCE_POLICY)
    }
}

/// Firmware main loop. Never returns.
pub fn run<A, F>(bus: &mut A, mut spin: F) -> !
where
    A: RegisterAccess + ?Sized,
    F: FnMut(),
{
    init(bus);

    let mut app = App::default();
    loop {
        app.poll_once(bus, &mut spin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::fake::FakeRegisters;
    use crate::field::Mode;
    use crate::map::*;
    use crate::rcc::RCC_AHB1ENR_GPIOAEN;

    const AHB1ENR: u32 = RCC_BASE + RCC_AHB1ENR_OFFSET;
    const GPIOA_IDR: u32 = GPIOA_BASE + GPIO_IDR_OFFSET;
    const GPIOC_BSRR: u32 = GPIOC_BASE + GPIO_BSRR_OFFSET;

    fn reset_state() -> FakeRegisters {
        FakeRegisters::new()
            .with(AHB1ENR, 0x0010_0000)
            .with(GPIOA_BASE + GPIO_MODER_OFFSET, 0xA800_0000)
            .with(GPIOA_BASE + GPIO_PUPDR_OFFSET, 0x6400_0000)
    }

    #[test]
    fn test_decide_active_low() {
        let pa0 = board::BUTTON.pin;
        assert_eq!(decide(0x0000_0000, pa0), LedState::On);
        assert_eq!(decide(0x0000_0001, pa0), LedState::Off);
        assert_eq!(decide(0xFFFF_FFFE, pa0), LedState::On);
        assert_eq!(decide(0xFFFF_FFFF, pa0), LedState::Off);
    }

    #[test]
    fn test_init_register_sequence() {
        let mut bus = reset_state();
        init(&mut bus);

        assert_eq!(
            bus.writes(),
            vec![
                (AHB1ENR, 0x0010_0000 | RCC_AHB1ENR_GPIOAEN),
                (AHB1ENR, 0x0010_0005),
                (GPIOA_BASE + GPIO_MODER_OFFSET, 0xA800_0000),
                (GPIOA_BASE + GPIO_PUPDR_OFFSET, 0x6400_0001),
                (GPIOC_BASE + GPIO_MODER_OFFSET, 0x0400_0000),
                (GPIOC_BASE + GPIO_OTYPER_OFFSET, 0),
                (GPIOC_BASE + GPIO_PUPDR_OFFSET, 0),
            ]
        );
        assert_eq!(board::LED.gpio().mode(&bus, board::LED.pin), Mode::Output);
    }

    #[test]
    fn test_poll_drives_bsrr() {
        let mut bus = reset_state();
        init(&mut bus);
        bus.clear_journal();
        let mut app = App::new(CounterPolicy::Rearm);

        bus.poke(GPIOA_IDR, 0x0000);
        assert_eq!(app.poll_once(&mut bus, || {}), LedState::On);
        bus.poke(GPIOA_IDR, 0x0001);
        assert_eq!(app.poll_once(&mut bus, || {}), LedState::Off);

        assert_eq!(
            bus.writes(),
            vec![(GPIOC_BSRR, 1 << 13), (GPIOC_BSRR, 1 << 29)]
        );
        assert_eq!(app.last_state(), Some(LedState::Off));
    }

    #[test]
    fn test_poll_debounce_follows_policy() {
        let mut bus = reset_state().with(GPIOA_IDR, 1);
        let mut latched = App::default();
        let mut rearmed = App::new(CounterPolicy::Rearm);

        let mut counts = Vec::new();
        for _ in 0..3 {
            let mut n = 0u32;
            latched.poll_once(&mut bus, || n += 1);
            counts.push(n);
        }
        assert_eq!(counts, vec![5000, 0, 0]);

        for _ in 0..3 {
            let mut n = 0u32;
            rearmed.poll_once(&mut bus, || n += 1);
            assert_eq!(n, board::DEBOUNCE_COUNT * board::DEBOUNCE_DELAY);
        }
    }
}
