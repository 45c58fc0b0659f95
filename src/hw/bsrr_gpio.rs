use stm32f1xx_hal::pac::{gpioa, GPIOA, GPIOB, GPIOC, GPIOD, GPIOE};

use crate::pwm::{PinId, Port};
use crate::support::GpioSink;

/// Drives pins through the bit set/reset register: one write, no read-modify-write.
///
/// The pins must be configured as outputs beforehand; their HAL handles may live
/// anywhere else since BSRR writes never disturb other bits of the bank.
pub struct BsrrGpio {
    _private: (),
}

impl BsrrGpio {
    pub fn new() -> Self {
        Self { _private: () }
    }

    #[inline]
    fn write(port: Port, bits: u32) {
        let block: *const gpioa::RegisterBlock = match port {
            Port::A => GPIOA::ptr(),
            Port::B => GPIOB::ptr(),
            Port::C => GPIOC::ptr(),
            Port::D => GPIOD::ptr(),
            Port::E => GPIOE::ptr(),
        };

        // BSRR is write-only and atomic per bit
        unsafe { (*block).bsrr.write(|w| w.bits(bits)) };
    }
}

impl Default for BsrrGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioSink for BsrrGpio {
    #[inline]
    fn set_high(&mut self, pin: PinId) {
        Self::write(pin.port(), 1 << pin.pin());
    }

    #[inline]
    fn set_low(&mut self, pin: PinId) {
        Self::write(pin.port(), 1 << (pin.pin() + 16));
    }
}
