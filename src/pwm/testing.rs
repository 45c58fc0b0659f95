//! Host doubles for the collaborator traits

use core::cell::Cell;

use fugit_timer::HertzU32;

use super::{Fault, FaultSink, PinId, Settings, Warning};
use crate::support::{GpioSink, TickSource, Ticks};

/// 1 MHz tick, so 1 kHz is a 1000 tick period
pub fn settings() -> Settings {
    Settings::from_clock(1_000_000)
}

pub fn hz(raw: u32) -> HertzU32 {
    HertzU32::from_raw(raw)
}

pub struct ManualClock {
    now: Cell<Ticks>,
    rate: u32,
}

impl ManualClock {
    /// Ticks at the same 1 MHz as [`settings`]
    pub fn new(now: Ticks) -> Self {
        Self {
            now: Cell::new(now),
            rate: 1_000_000,
        }
    }

    pub fn at_rate(rate: u32) -> Self {
        Self {
            now: Cell::new(0),
            rate,
        }
    }

    pub fn set(&self, now: Ticks) {
        self.now.set(now)
    }
}

impl TickSource for ManualClock {
    fn now(&self) -> Ticks {
        self.now.get()
    }

    fn ticks_per_second(&self) -> u32 {
        self.rate
    }
}

#[derive(Default)]
pub struct RecordingGpio {
    pub writes: Vec<(PinId, bool)>,
}

impl RecordingGpio {
    pub fn take(&mut self) -> Vec<(PinId, bool)> {
        core::mem::take(&mut self.writes)
    }
}

impl GpioSink for RecordingGpio {
    fn set_high(&mut self, pin: PinId) {
        self.writes.push((pin, true));
    }

    fn set_low(&mut self, pin: PinId) {
        self.writes.push((pin, false));
    }
}

#[derive(Default)]
pub struct RecordingFaults {
    pub warnings: Vec<Warning>,
}

impl FaultSink for RecordingFaults {
    fn fatal(&mut self, fault: Fault) -> ! {
        panic!("fatal: {}", fault)
    }

    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
