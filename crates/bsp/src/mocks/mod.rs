//! Mock implementations for host-side testing.
//!
//! Register-level simulation of the board's touch bus: the facade and the
//! controller shims run unmodified against [`MockTouchBus`], and the reset
//! seam against [`MockResetPin`] / [`MockDelay`].

#![cfg(any(test, feature = "std"))]
// Test doubles do bounded counter arithmetic and buffer fills.
#![allow(clippy::arithmetic_side_effects)]

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::{gt911, st7123};

/// Error type produced by [`MockTouchBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBusError {
    /// No simulated device answered at the addressed slave.
    Nack,
    /// Injected bus fault (arbitration loss, stuck line, ...).
    Fault,
}

impl embedded_hal::i2c::Error for MockBusError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            Self::Fault => ErrorKind::Other,
        }
    }
}

/// Simulated touch bus.
///
/// Populate it with at most one controller, script the proximity status
/// byte, and optionally inject a single non-NACK fault. Addresses without a
/// simulated device NACK, which is what a real bus does.
pub struct MockTouchBus {
    st7123_present: bool,
    gt911_address: Option<u8>,
    proximity_status: u8,
    pending_fault: bool,
    transactions: usize,
    proximity_ctrl_writes: heapless::Vec<u8, 8>,
    command_writes: heapless::Vec<u8, 8>,
}

impl MockTouchBus {
    /// Empty bus: every address NACKs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            st7123_present: false,
            gt911_address: None,
            proximity_status: 0,
            pending_fault: false,
            transactions: 0,
            proximity_ctrl_writes: heapless::Vec::new(),
            command_writes: heapless::Vec::new(),
        }
    }

    /// Bus with a simulated ST7123 at its fixed address.
    #[must_use]
    pub fn with_st7123() -> Self {
        Self {
            st7123_present: true,
            ..Self::new()
        }
    }

    /// Bus with a simulated GT911 answering at the given 7-bit address.
    #[must_use]
    pub fn with_gt911(address: u8) -> Self {
        Self {
            gt911_address: Some(address),
            ..Self::new()
        }
    }

    /// Script the byte the proximity status register reads back.
    pub fn set_proximity_status(&mut self, raw: u8) {
        self.proximity_status = raw;
    }

    /// Remove every simulated device, as if the flex cable came loose.
    pub fn remove_devices(&mut self) {
        self.st7123_present = false;
        self.gt911_address = None;
    }

    /// Fail the next transaction with a non-NACK fault.
    pub fn inject_fault(&mut self) {
        self.pending_fault = true;
    }

    /// Total transactions attempted, including failed ones.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions
    }

    /// Values written to the ST7123 proximity control register.
    #[must_use]
    pub fn proximity_ctrl_writes(&self) -> &[u8] {
        &self.proximity_ctrl_writes
    }

    /// Values written to the GT911 command register.
    #[must_use]
    pub fn command_writes(&self) -> &[u8] {
        &self.command_writes
    }

    fn st7123_transaction(&mut self, operations: &mut [Operation<'_>]) -> Result<(), MockBusError> {
        let mut pointer: Option<u8> = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => match **bytes {
                    [reg] => pointer = Some(reg),
                    [st7123::REG_PROXIMITY_CTRL, value] => {
                        let _ = self.proximity_ctrl_writes.push(value);
                    }
                    // other register writes are acknowledged and dropped
                    _ => {}
                },
                Operation::Read(buf) => {
                    let reg = pointer.take().unwrap_or(st7123::REG_FW_VERSION);
                    self.st7123_fill(reg, buf);
                }
            }
        }
        Ok(())
    }

    fn st7123_fill(&self, reg: u8, buf: &mut [u8]) {
        match reg {
            st7123::REG_CHIP_ID => {
                for (dst, src) in buf.iter_mut().zip(st7123::CHIP_ID.to_le_bytes()) {
                    *dst = src;
                }
            }
            st7123::REG_PROXIMITY_STATUS => buf.fill(self.proximity_status),
            _ => buf.fill(0),
        }
    }

    fn gt911_transaction(&mut self, operations: &mut [Operation<'_>]) -> Result<(), MockBusError> {
        let mut pointer: Option<u16> = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => match **bytes {
                    [hi, lo] => pointer = Some(u16::from_be_bytes([hi, lo])),
                    [hi, lo, value] => {
                        if u16::from_be_bytes([hi, lo]) == gt911::REG_COMMAND {
                            let _ = self.command_writes.push(value);
                        }
                    }
                    _ => {}
                },
                Operation::Read(buf) => {
                    let reg = pointer.take().unwrap_or(gt911::REG_STATUS);
                    Self::gt911_fill(reg, buf);
                }
            }
        }
        Ok(())
    }

    fn gt911_fill(reg: u16, buf: &mut [u8]) {
        match reg {
            gt911::REG_PRODUCT_ID => {
                for (dst, src) in buf.iter_mut().zip(gt911::PRODUCT_ID) {
                    *dst = src;
                }
            }
            _ => buf.fill(0),
        }
    }
}

impl Default for MockTouchBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for MockTouchBus {
    type Error = MockBusError;
}

impl I2c for MockTouchBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transactions += 1;
        if self.pending_fault {
            self.pending_fault = false;
            return Err(MockBusError::Fault);
        }
        if self.st7123_present && address == st7123::ST7123_I2C_ADDR {
            return self.st7123_transaction(operations);
        }
        if self.gt911_address == Some(address) {
            return self.gt911_transaction(operations);
        }
        Err(MockBusError::Nack)
    }
}

/// Records the level transitions driven onto the reset line.
pub struct MockResetPin {
    transitions: heapless::Vec<bool, 8>,
}

impl MockResetPin {
    /// Pin with no transitions recorded yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transitions: heapless::Vec::new(),
        }
    }

    /// Recorded transitions, oldest first (`false` = low, `true` = high).
    #[must_use]
    pub fn transitions(&self) -> &[bool] {
        &self.transitions
    }
}

impl Default for MockResetPin {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_hal::digital::ErrorType for MockResetPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let _ = self.transitions.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let _ = self.transitions.push(true);
        Ok(())
    }
}

/// Delay source that only accounts for the time it was asked to wait.
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    /// Delay source with an empty account.
    #[must_use]
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    /// Total nanoseconds requested so far.
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns = self.total_ns.saturating_add(u64::from(ns));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_bus_nacks_every_address() {
        let mut bus = MockTouchBus::new();
        let mut buf = [0u8; 1];
        for addr in [st7123::ST7123_I2C_ADDR, gt911::GT911_I2C_ADDR_PRIMARY, 0x08] {
            assert_eq!(bus.read(addr, &mut buf), Err(MockBusError::Nack));
        }
    }

    #[test]
    fn simulated_st7123_answers_its_chip_id() {
        let mut bus = MockTouchBus::with_st7123();
        let mut id = [0u8; 2];
        bus.write_read(st7123::ST7123_I2C_ADDR, &[st7123::REG_CHIP_ID], &mut id)
            .unwrap();
        assert_eq!(u16::from_le_bytes(id), st7123::CHIP_ID);
    }

    #[test]
    fn simulated_gt911_answers_only_its_configured_address() {
        let mut bus = MockTouchBus::with_gt911(gt911::GT911_I2C_ADDR_SECONDARY);
        let reg = gt911::reg_bytes(gt911::REG_PRODUCT_ID);
        let mut id = [0u8; 4];
        assert_eq!(
            bus.write_read(gt911::GT911_I2C_ADDR_PRIMARY, &reg, &mut id),
            Err(MockBusError::Nack)
        );
        bus.write_read(gt911::GT911_I2C_ADDR_SECONDARY, &reg, &mut id)
            .unwrap();
        assert_eq!(id, gt911::PRODUCT_ID);
    }

    #[test]
    fn injected_fault_fires_exactly_once() {
        let mut bus = MockTouchBus::with_st7123();
        bus.inject_fault();
        let mut buf = [0u8; 1];
        assert_eq!(
            bus.write_read(st7123::ST7123_I2C_ADDR, &[st7123::REG_FW_VERSION], &mut buf),
            Err(MockBusError::Fault)
        );
        assert!(bus
            .write_read(st7123::ST7123_I2C_ADDR, &[st7123::REG_FW_VERSION], &mut buf)
            .is_ok());
    }

    #[test]
    fn transaction_counter_includes_failures() {
        let mut bus = MockTouchBus::new();
        let mut buf = [0u8; 1];
        let _ = bus.read(0x08, &mut buf);
        let _ = bus.read(0x09, &mut buf);
        assert_eq!(bus.transaction_count(), 2);
    }

    #[test]
    fn fault_kind_is_not_a_nack() {
        use embedded_hal::i2c::Error as _;
        assert!(matches!(
            MockBusError::Nack.kind(),
            ErrorKind::NoAcknowledge(_)
        ));
        assert!(matches!(MockBusError::Fault.kind(), ErrorKind::Other));
    }
}
