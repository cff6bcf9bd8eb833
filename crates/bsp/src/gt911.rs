//! GT911 detection and initialization primitives.
//!
//! Reference: Goodix GT911 Programming Guide v1.0, register map section.
//!
//! The GT911 uses 16-bit big-endian register addresses and answers on one of
//! two 7-bit slave addresses, selected by the level of its INT line while
//! reset is released. The Tab5 straps the line for the primary address;
//! field-reworked boards have been seen on the secondary one, so detection
//! probes both. Only the detection/init surface lives here; touch-point
//! reporting is out of scope for this crate.

/// 7-bit I2C address when INT is low during reset release (0xBA/0xBB on the wire).
pub const GT911_I2C_ADDR_PRIMARY: u8 = 0x5D;
/// 7-bit I2C address when INT is high during reset release (0x28/0x29 on the wire).
pub const GT911_I2C_ADDR_SECONDARY: u8 = 0x14;

/// Command register (write 0x00 to select normal coordinate-read mode).
pub const REG_COMMAND: u16 = 0x8040;
/// Product-ID block: 4 ASCII bytes, "911" NUL-terminated on production parts.
pub const REG_PRODUCT_ID: u16 = 0x8140;
/// Coordinate status register (bit 7 = buffer ready, bits 3:0 = touch count).
pub const REG_STATUS: u16 = 0x814E;

/// Expected product-ID block.
pub const PRODUCT_ID: [u8; 4] = *b"911\0";

/// Command value selecting normal coordinate-read mode.
pub const COMMAND_READ_COORD: u8 = 0x00;

/// Split a 16-bit register address into the big-endian byte pair the GT911
/// expects on the wire.
#[inline]
#[must_use]
pub const fn reg_bytes(reg: u16) -> [u8; 2] {
    reg.to_be_bytes()
}

/// True when a product-ID block identifies a GT911.
///
/// Only the three ASCII digits are compared; the terminator byte is NUL on
/// production parts but has been observed nonzero on clone silicon.
#[inline]
#[must_use]
pub const fn is_gt911(id: &[u8; 4]) -> bool {
    id[0] == PRODUCT_ID[0] && id[1] == PRODUCT_ID[1] && id[2] == PRODUCT_ID[2]
}

/// Read the 4-byte product-ID block.
///
/// # Errors
/// Returns Err when the transaction fails, including the NACK produced when
/// nothing answers at `addr`.
pub fn read_product_id<I>(i2c: &mut I, addr: u8) -> Result<[u8; 4], I::Error>
where
    I: embedded_hal::i2c::I2c,
{
    let mut id = [0u8; 4];
    i2c.write_read(addr, &reg_bytes(REG_PRODUCT_ID), &mut id)?;
    Ok(id)
}

/// Select normal coordinate-read mode.
///
/// # Errors
/// Returns Err if the I2C write fails.
pub fn enter_normal_mode<I>(i2c: &mut I, addr: u8) -> Result<(), I::Error>
where
    I: embedded_hal::i2c::I2c,
{
    let [hi, lo] = reg_bytes(REG_COMMAND);
    i2c.write(addr, &[hi, lo, COMMAND_READ_COORD])
}
