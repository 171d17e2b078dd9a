//! HOPE badge board support
//!
//! Drivers and board wiring for the HOPE conference badge.
//!
//! # Architecture
//!
//! ```text
//! Application (badge firmware)
//!         ↓
//! Board context (board::Bsp: init/deinit, buttons, LEDs, fuel gauge)
//!         ↓
//! Drivers (expander::Pcf8574, haptics::Vibramotor, platform::Max17048)
//!         ↓
//! Platform HAL seams (HostGpio, LedStrip, embedded_hal I2c / OutputPin)
//! ```
//!
//! The I2C drivers are blocking (`embedded_hal::i2c::I2c`). The only async
//! pieces are the vibration-motor sequencer and the expander interrupt
//! worker hand-off; both run on any executor.
//!
//! # Features
//!
//! - `std` - Enable standard library support (`std::error::Error` impls, host mocks)
//! - `defmt` - Enable defmt logging

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod board;
pub mod error;
pub mod expander;
pub mod haptics;

pub use board::{BoardConfig, Bsp};
pub use error::BspError;
pub use expander::{InterruptError, Pcf8574};
pub use haptics::{Pattern, Vibramotor, VibramotorControl};
