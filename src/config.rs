use crate::pwm::Port;

pub const MCU_XTAL_HZ: u32 = 8_000_000;
pub const SYSCLK_HZ: u32 = 72_000_000;

//-----------------------------------------------------------------------------

pub const SYSTICK_RATE_HZ: u32 = 1_000;

//-----------------------------------------------------------------------------

/// Every registered pin adds to the time spent in the poll interrupt
pub const SW_PWM_MAX_PINS: usize = 5;

/// Time between two update passes, us.
/// Lower values give finer PWM resolution but load the CPU more.
pub const SW_PWM_POLL_TIME_US: u32 = 100;

/// Frequencies above `tick rate / HIGH_FREQ_DIVIDER` are reported as risky
pub const HIGH_FREQ_DIVIDER: u32 = 100;

/// Banks routed to the connectors of the board (STM32F103C8, 48 pins)
pub const BOARD_PORTS: &[Port] = &[Port::A, Port::B, Port::C];

//-----------------------------------------------------------------------------

/// HSI, the core clock out of reset
pub const HSI_HZ: u32 = 8_000_000;

/// SWO output rate, must match the probe's setting
pub const ITM_BAUDRATE_HZ: u32 = 2_000_000;

pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;
