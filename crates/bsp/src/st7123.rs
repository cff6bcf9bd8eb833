//! ST7123 detection, initialization, and proximity primitives.
//!
//! No public datasheet exists for the Sitronix ST7123; the register map below
//! follows the vendor reference driver shipped with the board support code.
//!
//! The ST7123 answers on a single fixed 7-bit address and uses 8-bit register
//! addressing. Its proximity sensor must be armed once after reset, then a
//! single status register reports detection. Touch-point reporting is out of
//! scope for this crate.

/// Fixed 7-bit I2C address.
pub const ST7123_I2C_ADDR: u8 = 0x55;

/// Firmware version register.
pub const REG_FW_VERSION: u8 = 0x00;
/// Chip-ID register: two little-endian bytes reading [`CHIP_ID`].
pub const REG_CHIP_ID: u8 = 0x04;
/// Proximity-scan control register (write [`PROXIMITY_SCAN_ENABLE`] to arm).
pub const REG_PROXIMITY_CTRL: u8 = 0x2A;
/// Proximity status register (see [`PROXIMITY_NEAR_MASK`]).
pub const REG_PROXIMITY_STATUS: u8 = 0x2B;

/// Value reported by [`REG_CHIP_ID`].
pub const CHIP_ID: u16 = 0x7123;
/// Arms the proximity scan.
pub const PROXIMITY_SCAN_ENABLE: u8 = 0x01;
/// Status bit set while an object is near the panel.
pub const PROXIMITY_NEAR_MASK: u8 = 0x01;

/// Decode the proximity status register.
///
/// Upper status bits carry scan diagnostics and are ignored here.
#[inline]
#[must_use]
pub const fn proximity_detected(status: u8) -> bool {
    status & PROXIMITY_NEAR_MASK != 0
}

/// Read the 16-bit chip ID.
///
/// # Errors
/// Returns Err when the transaction fails, including the NACK produced when
/// no ST7123 is on the bus.
pub fn read_chip_id<I>(i2c: &mut I) -> Result<u16, I::Error>
where
    I: embedded_hal::i2c::I2c,
{
    let mut id = [0u8; 2];
    i2c.write_read(ST7123_I2C_ADDR, &[REG_CHIP_ID], &mut id)?;
    Ok(u16::from_le_bytes(id))
}

/// Arm the proximity scan.
///
/// # Errors
/// Returns Err if the I2C write fails.
pub fn enable_proximity_scan<I>(i2c: &mut I) -> Result<(), I::Error>
where
    I: embedded_hal::i2c::I2c,
{
    i2c.write(ST7123_I2C_ADDR, &[REG_PROXIMITY_CTRL, PROXIMITY_SCAN_ENABLE])
}

/// Read the raw proximity status byte.
///
/// # Errors
/// Returns Err if the I2C transaction fails.
pub fn read_proximity_status<I>(i2c: &mut I) -> Result<u8, I::Error>
where
    I: embedded_hal::i2c::I2c,
{
    let mut status = [0u8; 1];
    i2c.write_read(ST7123_I2C_ADDR, &[REG_PROXIMITY_STATUS], &mut status)?;
    Ok(status[0])
}
