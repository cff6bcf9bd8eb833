//! Touch subsystem error taxonomy.

/// Errors surfaced by the touch facade.
///
/// A thin superset of the underlying driver failures: the two kinds the
/// facade synthesizes from its own state (`NotSupported`, `InvalidState`)
/// plus unmodified passthrough of bus and reset-line faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<BusE, RstE> {
    /// The bound controller variant has no proximity sensor.
    NotSupported,
    /// No controller has been initialized yet.
    InvalidState,
    /// No supported controller answered on the bus during probing.
    NotDetected,
    /// An I2C transaction failed. Carries the HAL error unmodified.
    Bus(BusE),
    /// The reset-line sequence failed.
    Reset(RstE),
}

// HAL error types only guarantee Debug, not Display.
#[allow(clippy::use_debug)]
impl<BusE, RstE> core::fmt::Display for TouchError<BusE, RstE>
where
    BusE: core::fmt::Debug,
    RstE: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotSupported => write!(f, "bound touch controller has no proximity sensor"),
            Self::InvalidState => write!(f, "touch controller not initialized"),
            Self::NotDetected => write!(f, "no supported touch controller detected"),
            Self::Bus(e) => write!(f, "touch I2C transaction failed: {e:?}"),
            Self::Reset(e) => write!(f, "touch reset sequence failed: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<BusE, RstE> std::error::Error for TouchError<BusE, RstE>
where
    BusE: core::fmt::Debug,
    RstE: core::fmt::Debug,
{
}
