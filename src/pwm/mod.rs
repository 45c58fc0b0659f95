mod fault;
mod pin;
mod pwm_calc;
mod scheduler;
mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use fault::{Fault, FaultSink, LogFaultSink, Rejected, Warning};
pub use pin::{Drive, PinDescriptor, PinId, Port};
pub use pwm_calc::MAX_DUTY;
pub use scheduler::{BoardPwm, PinHandle, SoftPwm};
pub use settings::{FrequencyChange, PollInterval, Settings};
