use cortex_m::peripheral::{DCB, DWT};

use crate::support::{TickSource, Ticks};

/// Core cycle counter, ticks at SYSCLK and wraps every 2^32 cycles (~59 s at 72 MHz)
pub struct DwtTicks {
    sysclk_hz: u32,
}

impl DwtTicks {
    /// `sysclk_hz` is the frozen core clock, the counter has no prescaler
    pub fn enable(dcb: &mut DCB, dwt: &mut DWT, sysclk_hz: u32) -> Self {
        dcb.enable_trace();
        dwt.enable_cycle_counter();
        Self { sysclk_hz }
    }
}

impl TickSource for DwtTicks {
    #[inline]
    fn now(&self) -> Ticks {
        DWT::cycle_count()
    }

    fn ticks_per_second(&self) -> u32 {
        self.sysclk_hz
    }
}
