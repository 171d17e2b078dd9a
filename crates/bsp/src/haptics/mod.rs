//! Haptic feedback
//!
//! - `vibramotor` - GPIO-switched vibration motor with an async pulse sequencer
//! - `mock` - Recording motor pin for host tests (always available)
//!
//! # Task wiring
//!
//! ```text
//! static COMMANDS: CommandSignal = CommandSignal::new();
//!
//! motor task:   Vibramotor::new(pin)?.run(&COMMANDS).await
//! app code:     VibramotorControl::new(&COMMANDS).run(Pattern::new(200, 100, 3))
//! ```

pub mod mock;
pub mod vibramotor;

pub use mock::{MockMotorPin, MotorLog};
pub use vibramotor::{Command, CommandSignal, Pattern, Vibramotor, VibramotorControl};
