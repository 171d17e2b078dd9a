//! Hardware Abstraction Layer (HAL) for the HOPE badge
//!
//! This crate provides the trait seams between the board-support drivers and
//! whatever host HAL the firmware binary links, enabling development and
//! testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application (badge firmware, out of tree)
//!         ↓
//! Board support (bsp crate: PCF8574, vibramotor, board wiring)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Host HAL (embedded-hal implementations for the SoC)
//! ```
//!
//! # Seams
//!
//! - [`gpio`] - Host GPIO configuration, ISR service, interrupt hand-off
//! - [`peripheral`] - I2C addressing and bus configuration
//! - [`led`] - Addressable RGB LED strip
//! - [`power`] - Battery monitoring
//! - [`max17048`] - Fuel-gauge register map
//! - [`input`] - Button identifiers and active levels
//! - [`config`] - Board wiring constants
//!
//! # Features
//!
//! - `std`: Enable standard library support (`std::error::Error` impls)
//! - `defmt`: Enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod gpio;
pub mod input;
pub mod led;
pub mod max17048;
pub mod mocks;
pub mod peripheral;
pub mod power;

// Re-export GPIO types
pub use gpio::{
    HostGpio, InterruptMode, InterruptNotifier, IsrHandler, IsrService, PinConfig, PinDirection,
    PinGroup, PinState, Pull,
};

// Re-export peripheral types
pub use peripheral::{I2cAddress, I2cConfig, OutOfRangeError};

pub use input::{ActiveLevel, ButtonId};
pub use led::{LedModel, LedStrip, Rgb};
pub use max17048::Max17048;
pub use power::PowerMonitor;
