use core::convert::Infallible;

use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;

use crate::pwm::{PinId, Rejected};

/// Set/clear primitives the update pass drives pins with.
///
/// Implementations must not read-modify-write the port: the update pass can
/// preempt any other code touching the same bank.
pub trait GpioSink {
    fn set_high(&mut self, pin: PinId);
    fn set_low(&mut self, pin: PinId);
}

pub type DynPin<'a> = &'a mut dyn OutputPin<Error = Infallible>;

/// [`GpioSink`] over HAL output pins, for pins a direct register write can't reach.
///
/// Writes to pins that were never attached are ignored.
pub struct HalPins<'a, const N: usize> {
    pins: Vec<(PinId, DynPin<'a>), N>,
}

impl<'a, const N: usize> HalPins<'a, N> {
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Routes writes for `id` to `pin`. A rejected pin is handed back.
    pub fn attach(&mut self, id: PinId, pin: DynPin<'a>) -> Result<(), (Rejected, DynPin<'a>)> {
        if self.pins.iter().any(|(attached, _)| *attached == id) {
            return Err((Rejected::Duplicate, pin));
        }
        self.pins
            .push((id, pin))
            .map_err(|(_, pin)| (Rejected::Full, pin))
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl<'a, const N: usize> Default for HalPins<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> GpioSink for HalPins<'a, N> {
    fn set_high(&mut self, id: PinId) {
        if let Some((_, pin)) = self.pins.iter_mut().find(|(attached, _)| *attached == id) {
            pin.set_high().ok();
        }
    }

    fn set_low(&mut self, id: PinId) {
        if let Some((_, pin)) = self.pins.iter_mut().find(|(attached, _)| *attached == id) {
            pin.set_low().ok();
        }
    }
}
