use fugit_timer::HertzU32;
use heapless::Vec;

use super::{Drive, Fault, FaultSink, PinDescriptor, Port, Rejected, Settings, Warning};
use crate::config;
use crate::support::{GpioSink, TickSource};

/// Slot of a registered pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinHandle(usize);

impl PinHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

pub type BoardPwm<F> = SoftPwm<F, { config::SW_PWM_MAX_PINS }>;

/// Software PWM over up to `N` GPIO pins.
///
/// Pins are owned by value and updated in registration order. Registration is
/// append-only. The scheduler must be shared with the poll interrupt through a
/// lock that masks it (RTIC `lock`) while any `&mut self` method other than
/// [`update_all`](Self::update_all) runs.
pub struct SoftPwm<F: FaultSink, const N: usize> {
    settings: Settings,
    pins: Vec<PinDescriptor, N>,
    faults: F,
}

impl<F: FaultSink, const N: usize> SoftPwm<F, N> {
    pub fn new(settings: Settings, faults: F) -> Self {
        Self {
            settings,
            pins: Vec::new(),
            faults,
        }
    }

    /// Builds a descriptor against this scheduler's settings, see [`PinDescriptor::create`]
    pub fn create_pin(
        &mut self,
        port: Port,
        pin: u8,
        frequency: HertzU32,
        duty: u8,
    ) -> PinDescriptor {
        PinDescriptor::create(port, pin, frequency, duty, &self.settings, &mut self.faults)
    }

    /// Appends `pin` to the update list.
    ///
    /// A full registry or a pin that is already driven is rejected with a warning
    /// and nothing changes.
    pub fn register(&mut self, pin: PinDescriptor) -> Result<PinHandle, Rejected> {
        if self.is_full() {
            self.faults.warn(Warning::RegistryFull { capacity: N });
            return Err(Rejected::Full);
        }

        let id = pin.id();
        if self.pins.iter().any(|registered| registered.id() == id) {
            self.faults.warn(Warning::AlreadyRegistered(id));
            return Err(Rejected::Duplicate);
        }

        let handle = PinHandle(self.pins.len());
        self.pins.push(pin).map_err(|_| Rejected::Full)?;

        log::debug!("sw pwm: {} registered at slot {}", id, handle.0);
        Ok(handle)
    }

    pub fn change_frequency(&mut self, handle: PinHandle, frequency: HertzU32) {
        let result = match self.pins.get_mut(handle.0) {
            Some(pin) => pin.try_change_frequency(frequency, &self.settings, &mut self.faults),
            None => Err(Fault::UnknownHandle(handle.0)),
        };

        if let Err(fault) = result {
            self.faults.fatal(fault)
        }
    }

    pub fn change_duty(&mut self, handle: PinHandle, duty: u8) {
        let result = match self.pins.get_mut(handle.0) {
            Some(pin) => pin.try_change_duty(duty),
            None => Err(Fault::UnknownHandle(handle.0)),
        };

        if let Err(fault) = result {
            self.faults.fatal(fault)
        }
    }

    /// One poll tick: every pin is evaluated against the same `now`.
    ///
    /// Called from the timer interrupt. Everything was validated at
    /// configuration time, so nothing is checked here.
    pub fn update_all<T, G>(&mut self, ticks: &T, gpio: &mut G)
    where
        T: TickSource + ?Sized,
        G: GpioSink + ?Sized,
    {
        let now = ticks.now();

        for pin in self.pins.iter_mut() {
            match pin.poll(now) {
                Drive::High => gpio.set_high(pin.id()),
                Drive::Low => gpio.set_low(pin.id()),
                Drive::Keep => {}
            }
        }
    }

    pub fn pin(&self, handle: PinHandle) -> Option<&PinDescriptor> {
        self.pins.get(handle.0)
    }

    /// Registered pins in update order
    pub fn pins(&self) -> &[PinDescriptor] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pins.len() == N
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn faults(&self) -> &F {
        &self.faults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pwm::testing::{hz, settings, ManualClock, RecordingFaults, RecordingGpio};
    use crate::pwm::{FrequencyChange, PinId};

    type TestPwm = SoftPwm<RecordingFaults, 3>;

    fn scheduler() -> TestPwm {
        SoftPwm::new(settings(), RecordingFaults::default())
    }

    fn id(port: Port, pin: u8) -> PinId {
        PinId::new(port, pin).unwrap()
    }

    #[test]
    fn registration_is_bounded() {
        let mut pwm = scheduler();

        for pin in 0..3 {
            let descriptor = pwm.create_pin(Port::A, pin, hz(1_000), 50);
            assert_eq!(pwm.register(descriptor), Ok(PinHandle(pin as usize)));
        }
        assert!(pwm.is_full());

        let extra = pwm.create_pin(Port::A, 3, hz(1_000), 50);
        assert_eq!(pwm.register(extra), Err(Rejected::Full));
        assert_eq!(pwm.len(), 3);
        assert_eq!(pwm.capacity(), 3);
        assert_eq!(pwm.faults().warnings, [Warning::RegistryFull { capacity: 3 }]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut pwm = scheduler();
        let descriptor = pwm.create_pin(Port::B, 12, hz(1_000), 50);

        assert!(pwm.register(descriptor.clone()).is_ok());
        assert_eq!(pwm.register(descriptor), Err(Rejected::Duplicate));
        assert_eq!(pwm.len(), 1);

        // another descriptor for the same physical pin
        let other = pwm.create_pin(Port::B, 12, hz(50), 10);
        assert_eq!(pwm.register(other), Err(Rejected::Duplicate));
        assert_eq!(pwm.len(), 1);
        assert_eq!(
            pwm.faults().warnings,
            [
                Warning::AlreadyRegistered(id(Port::B, 12)),
                Warning::AlreadyRegistered(id(Port::B, 12))
            ]
        );
    }

    #[test]
    fn update_all_drives_pins_in_registration_order() {
        let mut pwm = scheduler();
        let clock = ManualClock::new(0);
        let mut gpio = RecordingGpio::default();

        // 1 kHz 30% -> period 1000, on 300
        let slow = pwm.create_pin(Port::C, 13, hz(1_000), 30);
        // 2 kHz 50% -> period 500, on 250
        let fast = pwm.create_pin(Port::A, 1, hz(2_000), 50);
        pwm.register(slow).unwrap();
        pwm.register(fast).unwrap();

        pwm.update_all(&clock, &mut gpio);
        assert_eq!(gpio.take(), [(id(Port::C, 13), true), (id(Port::A, 1), true)]);

        clock.set(100);
        pwm.update_all(&clock, &mut gpio);
        assert!(gpio.take().is_empty());

        clock.set(300);
        pwm.update_all(&clock, &mut gpio);
        assert_eq!(gpio.take(), [(id(Port::C, 13), false), (id(Port::A, 1), false)]);

        clock.set(500);
        pwm.update_all(&clock, &mut gpio);
        assert_eq!(gpio.take(), [(id(Port::C, 13), false), (id(Port::A, 1), true)]);
        assert_eq!(pwm.pins()[0].last_transition(), 0);
        assert_eq!(pwm.pins()[1].last_transition(), 500);

        clock.set(1_000);
        pwm.update_all(&clock, &mut gpio);
        assert_eq!(gpio.take(), [(id(Port::C, 13), true), (id(Port::A, 1), true)]);
    }

    #[test]
    fn update_all_on_empty_registry_is_a_no_op() {
        let mut pwm = scheduler();
        let mut gpio = RecordingGpio::default();

        pwm.update_all(&ManualClock::new(1234), &mut gpio);
        assert!(pwm.is_empty());
        assert!(gpio.writes.is_empty());
    }

    #[test]
    fn reconfigure_through_handle() {
        let mut pwm = scheduler();
        let descriptor = pwm.create_pin(Port::A, 8, hz(1_000), 30);
        let handle = pwm.register(descriptor).unwrap();

        pwm.change_duty(handle, 70);
        assert_eq!(pwm.pin(handle).map(|p| p.on_duration()), Some(700));

        pwm.change_frequency(handle, hz(500));
        let pin = pwm.pin(handle).unwrap();
        assert_eq!(pin.period(), 2_000);
        assert_eq!(pin.on_duration(), 700);
    }

    #[test]
    fn rescaling_scheduler_keeps_duty() {
        let settings = settings().with_frequency_change(FrequencyChange::RescaleOnDuration);
        let mut pwm: TestPwm = SoftPwm::new(settings, RecordingFaults::default());
        let descriptor = pwm.create_pin(Port::A, 8, hz(1_000), 30);
        let handle = pwm.register(descriptor).unwrap();

        pwm.change_frequency(handle, hz(500));
        assert_eq!(pwm.pin(handle).map(|p| p.on_duration()), Some(600));
    }

    #[test]
    fn duty_change_applies_from_the_next_pass() {
        let mut pwm = scheduler();
        let clock = ManualClock::new(0);
        let mut gpio = RecordingGpio::default();
        let descriptor = pwm.create_pin(Port::A, 8, hz(1_000), 30);
        let handle = pwm.register(descriptor).unwrap();

        pwm.update_all(&clock, &mut gpio);
        pwm.change_duty(handle, 60);

        clock.set(400);
        pwm.update_all(&clock, &mut gpio);
        clock.set(600);
        pwm.update_all(&clock, &mut gpio);
        assert_eq!(
            gpio.take(),
            [(id(Port::A, 8), true), (id(Port::A, 8), false)]
        );
    }

    #[test]
    #[should_panic(expected = "fatal: no pin registered at slot 2")]
    fn foreign_handle_is_fatal() {
        let mut pwm = scheduler();
        pwm.change_duty(PinHandle(2), 10);
    }

    #[test]
    #[should_panic(expected = "fatal: frequency must not be zero")]
    fn zero_frequency_change_is_fatal() {
        let mut pwm = scheduler();
        let descriptor = pwm.create_pin(Port::A, 8, hz(1_000), 30);
        let handle = pwm.register(descriptor).unwrap();
        pwm.change_frequency(handle, hz(0));
    }
}
