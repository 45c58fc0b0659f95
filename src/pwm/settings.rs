use super::{pwm_calc, Fault, FaultSink, Port, Warning};
use crate::config;
use crate::support::{TickSource, Ticks};

pub type PollInterval = fugit_timer::Duration<u32, 1, 1_000_000>;

/// What `change_frequency` does with the on-duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyChange {
    /// Only the period is recomputed, the on-duration keeps its tick count.
    /// The effective duty drifts until the next `change_duty`.
    #[default]
    KeepOnDuration,
    /// The on-duration follows the new period, keeping the last requested duty.
    RescaleOnDuration,
}

/// Timing and board parameters every descriptor is computed against
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub ticks_per_second: u32,
    pub poll_interval: PollInterval,
    pub ports: &'static [Port],
    pub high_freq_divider: u32,
    pub frequency_change: FrequencyChange,
}

impl Settings {
    /// Board constants, ticking at SYSCLK like the DWT cycle counter
    pub const fn board() -> Self {
        Self::from_clock(config::SYSCLK_HZ)
    }

    /// `ticks_per_second` must be the rate of the tick source `update_all` is fed with
    pub const fn from_clock(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second,
            poll_interval: PollInterval::from_ticks(config::SW_PWM_POLL_TIME_US),
            ports: config::BOARD_PORTS,
            high_freq_divider: config::HIGH_FREQ_DIVIDER,
            frequency_change: FrequencyChange::KeepOnDuration,
        }
    }

    pub fn for_ticks<T: TickSource + ?Sized>(ticks: &T) -> Self {
        Self::from_clock(ticks.ticks_per_second())
    }

    pub const fn with_frequency_change(self, frequency_change: FrequencyChange) -> Self {
        Self {
            frequency_change,
            ..self
        }
    }

    /// Above this the poll granularity can't resolve the waveform
    pub const fn max_safe_frequency(&self) -> u32 {
        self.ticks_per_second / self.high_freq_divider
    }

    /// Ticks between two update passes, the resolution floor
    pub const fn poll_ticks(&self) -> Ticks {
        (self.ticks_per_second as u64 * self.poll_interval.ticks() as u64 / 1_000_000) as Ticks
    }

    pub fn check_port(&self, port: Port) -> Result<Port, Fault> {
        if self.ports.contains(&port) {
            Ok(port)
        } else {
            Err(Fault::InvalidPort(port))
        }
    }

    pub(crate) fn period_for<F: FaultSink + ?Sized>(
        &self,
        frequency: u32,
        faults: &mut F,
    ) -> Result<Ticks, Fault> {
        let period = pwm_calc::period_ticks(self.ticks_per_second, frequency)?;

        let limit = self.max_safe_frequency();
        if frequency > limit {
            faults.warn(Warning::FrequencyTooHigh { frequency, limit });
        }

        Ok(period)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::board()
    }
}
