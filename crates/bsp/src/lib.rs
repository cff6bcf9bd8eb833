//! Board support for the Tab5 touchscreen subsystem.
//!
//! The Tab5 ships in two hardware revisions carrying two different I2C touch
//! controllers: the Goodix GT911 (original revision) and the Sitronix ST7123
//! (current revision, which adds a proximity sensor). This crate detects
//! which controller the board carries and fronts it behind a single context
//! object with three operations: construction, capability discovery, and
//! proximity reading.
//!
//! # Architecture Layers
//!
//! ```text
//! Application / firmware task
//!         ↓
//! Touch facade (this crate - state machine, error taxonomy)
//!         ↓
//! Controller shims (GT911 / ST7123 detection + proximity primitives)
//!         ↓
//! Hardware Layer (embedded-hal I2C bus, reset line, delay)
//! ```
//!
//! Touch-point decoding, gesture recognition, and coordinate transformation
//! are not part of this crate.
//!
//! # Features
//!
//! - `std`: host-side support (the [`mocks`] module, `std::error::Error` impls)
//! - `defmt`: enable defmt logging and `defmt::Format` derives
//!
//! # Example
//!
//! ```no_run
//! use tab5_bsp::{NoReset, Touch, TouchConfig};
//!
//! fn bring_up<I: embedded_hal::i2c::I2c>(i2c: I) {
//!     let mut touch = Touch::new(i2c, NoReset);
//!     if touch.init(&TouchConfig::default()).is_ok() && touch.has_proximity() {
//!         let _near = touch.read_proximity();
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
// Pedantic lints suppressed for this board-support crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod gt911;
pub mod mocks;
pub mod reset;
pub mod st7123;
pub mod touch;

// Re-export the facade surface
pub use error::TouchError;
pub use reset::{GpioReset, NoReset, ResetDriver};
pub use touch::{ControllerVariant, Touch, TouchConfig};
