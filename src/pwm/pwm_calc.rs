use super::Fault;
use crate::support::Ticks;

pub const MAX_DUTY: u8 = 100;

pub fn check_duty(duty: u8) -> Result<u8, Fault> {
    if duty > MAX_DUTY {
        Err(Fault::InvalidDuty(duty))
    } else {
        Ok(duty)
    }
}

/// Length of one PWM cycle in ticks
pub fn period_ticks(ticks_per_second: u32, frequency: u32) -> Result<Ticks, Fault> {
    if frequency == 0 {
        return Err(Fault::ZeroFrequency);
    }
    if frequency > ticks_per_second {
        // period would round down to 0
        return Err(Fault::FrequencyAboveTickRate(frequency));
    }

    Ok(ticks_per_second / frequency)
}

/// Part of `period` the pin stays high.
/// 1 Hz at 72 MHz gives 72e6 * 100, so the product is taken in 64 bits.
pub fn on_ticks(period: Ticks, duty: u8) -> Result<Ticks, Fault> {
    let duty = check_duty(duty)?;
    Ok((period as u64 * duty as u64 / MAX_DUTY as u64) as Ticks)
}
