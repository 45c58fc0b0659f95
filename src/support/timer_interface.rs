use crate::pwm::PollInterval;

/// Hardware timer that fires the update pass every poll interval.
///
/// The timer must already have its update interrupt enabled (`listen`).
pub struct PollTimer<TIM> {
    timer: TIM,
    interval: PollInterval,
}

impl<TIM> PollTimer<TIM> {
    pub fn new(timer: TIM, interval: PollInterval) -> Self {
        Self { timer, interval }
    }

    pub fn interval(&self) -> PollInterval {
        self.interval
    }

    pub fn release(self) -> TIM {
        self.timer
    }
}

impl<TIM> PollTimer<TIM>
where
    TIM: fugit_timer::Timer<1_000_000>,
{
    /// Starts the periodic update interrupt
    pub fn start(&mut self) -> Result<(), TIM::Error> {
        log::debug!("sw pwm: poll every {} us", self.interval.ticks());
        self.timer.start(self.interval)
    }

    /// Stops the update interrupt, pins keep their last level
    pub fn stop(&mut self) -> Result<(), TIM::Error> {
        self.timer.cancel()
    }
}
