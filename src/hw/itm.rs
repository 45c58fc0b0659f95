//! SWO logging through the `itm_logger` crate.
//!
//! The TPIU prescaler is derived from the core clock, so it has to be set again
//! every time SYSCLK changes.

use itm_logger::{logger_init, update_tpiu_baudrate};
use log::LevelFilter;

use crate::config;

/// The TPIU can't produce `ITM_BAUDRATE_HZ` from this core clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaudrateError {
    pub sysclk_hz: u32,
}

/// Sets up the TPIU for the reset clock (HSI) and installs the logger
pub fn itm_reset(level: LevelFilter) -> Result<(), BaudrateError> {
    set_baudrate(config::HSI_HZ)?;
    logger_init();
    log::set_max_level(level);
    Ok(())
}

/// Re-derives the TPIU prescaler after the clocks were frozen
pub fn itm_update_clocks(sysclk_hz: u32) -> Result<(), BaudrateError> {
    set_baudrate(sysclk_hz)
}

fn set_baudrate(sysclk_hz: u32) -> Result<(), BaudrateError> {
    update_tpiu_baudrate(sysclk_hz, config::ITM_BAUDRATE_HZ)
        .map_err(|_| BaudrateError { sysclk_hz })
}
