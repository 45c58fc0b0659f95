//! STM32F1 side of the collaborator traits

mod dwt_ticks;
pub use dwt_ticks::DwtTicks;

#[cfg(feature = "stm32f103")]
mod bsrr_gpio;
#[cfg(feature = "stm32f103")]
pub use bsrr_gpio::BsrrGpio;

pub mod itm;
