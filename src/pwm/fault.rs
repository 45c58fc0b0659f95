use core::fmt;

use super::{PinId, Port};

/// Configuration that cannot be run, the system must stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    InvalidPort(Port),
    InvalidPin(u8),
    InvalidDuty(u8),
    ZeroFrequency,
    FrequencyAboveTickRate(u32),
    UnknownHandle(usize),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::InvalidPort(port) => write!(f, "port {} is not available on this board", port),
            Fault::InvalidPin(pin) => {
                write!(f, "invalid pin {}, each port only has pins 0-15", pin)
            }
            Fault::InvalidDuty(duty) => write!(f, "duty cycle {}% is out of 0-100", duty),
            Fault::ZeroFrequency => f.write_str("frequency must not be zero"),
            Fault::FrequencyAboveTickRate(freq) => {
                write!(f, "frequency {} Hz is above the tick rate", freq)
            }
            Fault::UnknownHandle(slot) => write!(f, "no pin registered at slot {}", slot),
        }
    }
}

/// Risky configuration, the operation is degraded or rejected but the system keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    FrequencyTooHigh { frequency: u32, limit: u32 },
    RegistryFull { capacity: usize },
    AlreadyRegistered(PinId),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::FrequencyTooHigh { frequency, limit } => write!(
                f,
                "frequency {} Hz might be too high to handle (limit {} Hz)",
                frequency, limit
            ),
            Warning::RegistryFull { capacity } => write!(
                f,
                "registry is full ({} pins), increase SW_PWM_MAX_PINS",
                capacity
            ),
            Warning::AlreadyRegistered(id) => write!(f, "{} is already registered", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    Full,
    Duplicate,
}

/// Where every validation failure ends up.
///
/// `fatal` must not return: the caller's state is undefined after it.
pub trait FaultSink {
    fn fatal(&mut self, fault: Fault) -> !;
    fn warn(&mut self, warning: Warning);
}

impl<S: FaultSink + ?Sized> FaultSink for &mut S {
    fn fatal(&mut self, fault: Fault) -> ! {
        (**self).fatal(fault)
    }

    fn warn(&mut self, warning: Warning) {
        (**self).warn(warning)
    }
}

/// Reports through the `log` facade, halts by panicking
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFaultSink;

impl FaultSink for LogFaultSink {
    fn fatal(&mut self, fault: Fault) -> ! {
        log::error!("sw pwm: {}", fault);
        panic!("sw pwm: {}", fault)
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("sw pwm: {}", warning);
    }
}
