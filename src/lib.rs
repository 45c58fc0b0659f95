#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod pwm;
pub mod support;

#[cfg(target_os = "none")]
pub mod hw;

pub use pwm::{
    BoardPwm, FaultSink, LogFaultSink, PinDescriptor, PinHandle, Port, Settings, SoftPwm,
};
pub use support::{GpioSink, PollTimer, TickSource};
