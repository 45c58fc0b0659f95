pub type Ticks = u32;

/// Free running tick counter, wraps at `Ticks::MAX`
pub trait TickSource {
    fn now(&self) -> Ticks;

    /// Rate `now` advances at. Periods are computed in this unit.
    fn ticks_per_second(&self) -> u32;

    fn elapsed_since(&self, since: Ticks) -> Ticks {
        self.now().wrapping_sub(since)
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now(&self) -> Ticks {
        (**self).now()
    }

    fn ticks_per_second(&self) -> u32 {
        (**self).ticks_per_second()
    }
}
