//! Touchscreen facade.
//!
//! One context object owns the touch I2C bus and reset line, detects which
//! controller variant the board carries, and answers the capability and
//! proximity queries. The context replaces the process-global state a C BSP
//! would keep: initialization status and bound variant live in the value
//! itself, so a second bus gets a second, independent context.

use embedded_hal::i2c::{Error, ErrorKind, I2c};

use crate::error::TouchError;
use crate::reset::ResetDriver;
use crate::{gt911, st7123};

/// Touch subsystem configuration.
///
/// Carries no options today; `#[non_exhaustive]` keeps room to add some
/// without breaking callers.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {}

impl TouchConfig {
    /// Default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

/// Which physical touch controller the probe bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerVariant {
    /// Goodix GT911 (original board revision). No proximity sensor.
    Gt911,
    /// Sitronix ST7123 (current board revision). Carries a proximity sensor.
    St7123,
}

impl ControllerVariant {
    /// True when this variant carries a proximity sensor.
    #[must_use]
    pub const fn has_proximity(self) -> bool {
        matches!(self, Self::St7123)
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    /// No controller bound. Only `init` and the pure queries are meaningful.
    Uninitialized,
    /// A controller answered the probe and finished its init sequence.
    Bound {
        variant: ControllerVariant,
        /// 7-bit slave address the controller answered on.
        address: u8,
    },
}

/// Touchscreen context.
///
/// Owns the bus and reset driver; uniquely owned by the caller and consumed
/// exactly once by [`Touch::release`], so the underlying resources can never
/// be handed back twice.
pub struct Touch<I2C, RST> {
    i2c: I2C,
    reset: RST,
    state: State,
}

impl<I2C, RST> Touch<I2C, RST> {
    /// Create an uninitialized context. No bus traffic.
    pub fn new(i2c: I2C, reset: RST) -> Self {
        Self {
            i2c,
            reset,
            state: State::Uninitialized,
        }
    }

    /// Which controller variant is bound, if any.
    #[must_use]
    pub fn controller(&self) -> Option<ControllerVariant> {
        match self.state {
            State::Uninitialized => None,
            State::Bound { variant, .. } => Some(variant),
        }
    }

    /// 7-bit slave address the bound controller answered on, if any.
    #[must_use]
    pub fn address(&self) -> Option<u8> {
        match self.state {
            State::Uninitialized => None,
            State::Bound { address, .. } => Some(address),
        }
    }

    /// True when the bound controller carries a proximity sensor.
    ///
    /// Pure state query: never touches the bus, safe to call in any state,
    /// and reports `false` until a proximity-capable controller is bound.
    #[must_use]
    pub fn has_proximity(&self) -> bool {
        match self.state {
            State::Uninitialized => false,
            State::Bound { variant, .. } => variant.has_proximity(),
        }
    }

    /// Tear the context down, handing the bus and reset driver back.
    ///
    /// The controller itself is left in its current power state.
    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.reset)
    }
}

impl<I2C, RST> Touch<I2C, RST>
where
    I2C: I2c,
    RST: ResetDriver,
{
    /// Reset the controller, detect which variant the board carries, and
    /// initialize it.
    ///
    /// Probes the current-revision ST7123 first, then the GT911 at its
    /// primary and secondary addresses. A NACK during probing means "not
    /// present" and the next candidate is tried; any other bus fault aborts
    /// the probe and is passed through. No retries at this layer.
    ///
    /// On success the context is bound to the returned variant. On any
    /// failure the context is left uninitialized, including when it was
    /// bound before the call, since a failed re-init leaves the hardware in
    /// an unknown state.
    ///
    /// # Errors
    /// - [`TouchError::Reset`] when the reset sequence fails.
    /// - [`TouchError::NotDetected`] when no supported controller answers.
    /// - [`TouchError::Bus`] on a non-NACK bus fault.
    pub fn init(
        &mut self,
        _config: &TouchConfig,
    ) -> Result<ControllerVariant, TouchError<I2C::Error, RST::Error>> {
        self.state = State::Uninitialized;

        self.reset.reset().map_err(TouchError::Reset)?;

        let Some((variant, address)) = self.probe()? else {
            #[cfg(feature = "defmt")]
            defmt::warn!("no touch controller answered the probe");
            return Err(TouchError::NotDetected);
        };

        match variant {
            ControllerVariant::Gt911 => {
                gt911::enter_normal_mode(&mut self.i2c, address).map_err(TouchError::Bus)?;
            }
            ControllerVariant::St7123 => {
                st7123::enable_proximity_scan(&mut self.i2c).map_err(TouchError::Bus)?;
            }
        }

        self.state = State::Bound { variant, address };

        #[cfg(feature = "defmt")]
        defmt::info!("touch controller bound: {} at 0x{=u8:x}", variant, address);

        Ok(variant)
    }

    /// Read the proximity-sensor status.
    ///
    /// One status-register transaction on the ST7123. A GT911 binding is
    /// rejected from remembered state without touching the bus.
    ///
    /// # Errors
    /// - [`TouchError::InvalidState`] before a successful [`Touch::init`].
    /// - [`TouchError::NotSupported`] when the bound controller is a GT911.
    /// - [`TouchError::Bus`] when the status read fails.
    pub fn read_proximity(&mut self) -> Result<bool, TouchError<I2C::Error, RST::Error>> {
        let variant = match self.state {
            State::Uninitialized => return Err(TouchError::InvalidState),
            State::Bound { variant, .. } => variant,
        };
        if !variant.has_proximity() {
            return Err(TouchError::NotSupported);
        }
        let status = st7123::read_proximity_status(&mut self.i2c).map_err(TouchError::Bus)?;
        Ok(st7123::proximity_detected(status))
    }

    /// Probe the bus for a supported controller, newest revision first.
    fn probe(
        &mut self,
    ) -> Result<Option<(ControllerVariant, u8)>, TouchError<I2C::Error, RST::Error>> {
        match st7123::read_chip_id(&mut self.i2c) {
            Ok(id) if id == st7123::CHIP_ID => {
                return Ok(Some((ControllerVariant::St7123, st7123::ST7123_I2C_ADDR)));
            }
            // Something unknown answered at the ST7123 address; keep probing.
            Ok(_) => {}
            Err(e) if is_nack(&e) => {}
            Err(e) => return Err(TouchError::Bus(e)),
        }

        for addr in [gt911::GT911_I2C_ADDR_PRIMARY, gt911::GT911_I2C_ADDR_SECONDARY] {
            match gt911::read_product_id(&mut self.i2c, addr) {
                Ok(id) if gt911::is_gt911(&id) => {
                    return Ok(Some((ControllerVariant::Gt911, addr)));
                }
                Ok(_) => {}
                Err(e) if is_nack(&e) => {}
                Err(e) => return Err(TouchError::Bus(e)),
            }
        }

        Ok(None)
    }
}

/// NACK means "no device at this address" while probing; anything else is a
/// real bus fault.
fn is_nack<E: Error>(err: &E) -> bool {
    matches!(err.kind(), ErrorKind::NoAcknowledge(_))
}
