//! Touch reset-line control.
//!
//! Both controller variants share the board's touch reset line, but the line
//! itself differs by revision: a direct GPIO on some boards, a pin behind an
//! I2C I/O expander on others. The facade therefore takes reset sequencing
//! behind a trait instead of a concrete pin type.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Hardware reset sequencing for the touch controller.
pub trait ResetDriver {
    /// Error type of the underlying line driver.
    type Error;

    /// Run the full reset sequence and leave the controller out of reset,
    /// ready to accept I2C transactions.
    fn reset(&mut self) -> Result<(), Self::Error>;
}

/// Reset pulse width. Both controllers specify at least 100 us low time.
const RESET_PULSE_MS: u32 = 10;
/// Settle time before the controller accepts I2C transactions again.
const RESET_SETTLE_MS: u32 = 60;

/// Reset via a push-pull GPIO pin driving the line directly.
pub struct GpioReset<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> GpioReset<P, D> {
    /// Wrap a reset pin and a delay source.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Hand the pin and delay source back.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> ResetDriver for GpioReset<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.pin.set_high()?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }
}

/// No-op reset for boards where the line is strapped in hardware.
pub struct NoReset;

impl ResetDriver for NoReset {
    type Error = core::convert::Infallible;

    fn reset(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
