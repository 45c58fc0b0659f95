use core::fmt;

use fugit_timer::HertzU32;

use super::{pwm_calc, Fault, FaultSink, FrequencyChange, Settings};
use crate::support::Ticks;

/// GPIO bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

impl Port {
    pub const fn letter(self) -> char {
        match self {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
            Port::D => 'D',
            Port::E => 'E',
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.letter())
    }
}

/// Physical pin: bank + bit position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinId {
    port: Port,
    pin: u8,
}

impl PinId {
    pub const MAX_PIN: u8 = 15;

    pub fn new(port: Port, pin: u8) -> Result<Self, Fault> {
        if pin > Self::MAX_PIN {
            return Err(Fault::InvalidPin(pin));
        }
        Ok(Self { port, pin })
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port.letter(), self.pin)
    }
}

/// Output decision of one update pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    High,
    Low,
    Keep,
}

/// One software PWM channel.
///
/// `period` and `on_duration` are in ticks of the [`TickSource`](crate::support::TickSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinDescriptor {
    id: PinId,
    period: Ticks,
    on_duration: Ticks,
    duty: u8,
    // None until the first high edge, so the first pass always starts a cycle
    last_transition: Option<Ticks>,
}

impl PinDescriptor {
    /// Validates the pin and computes its timing.
    ///
    /// A frequency above [`Settings::max_safe_frequency`] is reported to `faults`
    /// as a warning and the descriptor is still built.
    pub fn try_create<F: FaultSink + ?Sized>(
        port: Port,
        pin: u8,
        frequency: HertzU32,
        duty: u8,
        settings: &Settings,
        faults: &mut F,
    ) -> Result<Self, Fault> {
        let port = settings.check_port(port)?;
        let id = PinId::new(port, pin)?;
        let duty = pwm_calc::check_duty(duty)?;
        let period = settings.period_for(frequency.raw(), faults)?;
        let on_duration = pwm_calc::on_ticks(period, duty)?;

        log::trace!(
            "sw pwm: {} {} Hz {}% -> period {} on {}",
            id,
            frequency.raw(),
            duty,
            period,
            on_duration
        );

        Ok(Self {
            id,
            period,
            on_duration,
            duty,
            last_transition: None,
        })
    }

    /// Same as [`try_create`](Self::try_create), invalid configuration goes to `faults.fatal`
    pub fn create<F: FaultSink + ?Sized>(
        port: Port,
        pin: u8,
        frequency: HertzU32,
        duty: u8,
        settings: &Settings,
        faults: &mut F,
    ) -> Self {
        match Self::try_create(port, pin, frequency, duty, settings, faults) {
            Ok(descriptor) => descriptor,
            Err(fault) => faults.fatal(fault),
        }
    }

    pub fn try_change_frequency<F: FaultSink + ?Sized>(
        &mut self,
        frequency: HertzU32,
        settings: &Settings,
        faults: &mut F,
    ) -> Result<(), Fault> {
        let period = settings.period_for(frequency.raw(), faults)?;
        let on_duration = match settings.frequency_change {
            FrequencyChange::KeepOnDuration => self.on_duration,
            FrequencyChange::RescaleOnDuration => pwm_calc::on_ticks(period, self.duty)?,
        };

        self.period = period;
        self.on_duration = on_duration;

        log::trace!(
            "sw pwm: {} {} Hz -> period {} on {}",
            self.id,
            frequency.raw(),
            period,
            on_duration
        );
        Ok(())
    }

    pub fn change_frequency<F: FaultSink + ?Sized>(
        &mut self,
        frequency: HertzU32,
        settings: &Settings,
        faults: &mut F,
    ) {
        if let Err(fault) = self.try_change_frequency(frequency, settings, faults) {
            faults.fatal(fault)
        }
    }

    /// Recomputes the on-duration against the current period
    pub fn try_change_duty(&mut self, duty: u8) -> Result<(), Fault> {
        self.on_duration = pwm_calc::on_ticks(self.period, duty)?;
        self.duty = duty;

        log::trace!("sw pwm: {} {}% -> on {}", self.id, duty, self.on_duration);
        Ok(())
    }

    pub fn change_duty<F: FaultSink + ?Sized>(&mut self, duty: u8, faults: &mut F) {
        if let Err(fault) = self.try_change_duty(duty) {
            faults.fatal(fault)
        }
    }

    /// Evaluates the pin at `now`, starting a new cycle if the period is over.
    ///
    /// Runs from the poll interrupt: no checks, no logging.
    #[inline]
    pub fn poll(&mut self, now: Ticks) -> Drive {
        let elapsed = match self.last_transition {
            Some(at) => now.wrapping_sub(at),
            None => Ticks::MAX,
        };

        if elapsed >= self.period {
            self.last_transition = Some(now);
            Drive::High
        } else if elapsed >= self.on_duration {
            Drive::Low
        } else {
            Drive::Keep
        }
    }

    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn port(&self) -> Port {
        self.id.port
    }

    pub fn pin(&self) -> u8 {
        self.id.pin
    }

    pub fn period(&self) -> Ticks {
        self.period
    }

    pub fn on_duration(&self) -> Ticks {
        self.on_duration
    }

    /// Last requested duty, not necessarily `on_duration / period`
    /// after a frequency change with [`FrequencyChange::KeepOnDuration`]
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Tick of the last high edge, 0 if the pin never fired
    pub fn last_transition(&self) -> Ticks {
        self.last_transition.unwrap_or(0)
    }
}
