//! Vibration motor driver and pulse sequencer.
//!
//! The motor is switched by a single GPIO through a low-side transistor.
//! Pin high runs the motor, pin low stops it.

use core::convert::Infallible;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use embedded_hal::digital::OutputPin;

/// On/off pulse train
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    /// Motor on time per cycle
    pub on_ms: u32,
    /// Motor off time per cycle
    pub off_ms: u32,
    /// Number of on/off cycles. Zero does nothing.
    pub cycles: u32,
}

impl Pattern {
    /// Create a pattern
    pub const fn new(on_ms: u32, off_ms: u32, cycles: u32) -> Self {
        Self {
            on_ms,
            off_ms,
            cycles,
        }
    }

    /// Wall time of the whole pattern in milliseconds
    pub const fn duration_ms(&self) -> u64 {
        let per_cycle = (self.on_ms as u64).saturating_add(self.off_ms as u64);
        per_cycle.saturating_mul(self.cycles as u64)
    }
}

/// Command for the sequencer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Abort whatever is playing and start this pattern
    Run(Pattern),
    /// Abort whatever is playing and leave the motor off
    Stop,
}

/// Single-slot command mailbox. The latest command wins.
pub type CommandSignal = Signal<CriticalSectionRawMutex, Command>;

/// Handle for sending commands to a running [`Vibramotor::run`] task.
#[derive(Clone, Copy)]
pub struct VibramotorControl<'a> {
    commands: &'a CommandSignal,
}

impl<'a> VibramotorControl<'a> {
    /// Wrap the mailbox shared with the sequencer task
    pub const fn new(commands: &'a CommandSignal) -> Self {
        Self { commands }
    }

    /// Play `pattern`, cancelling any pattern in progress
    pub fn run(&self, pattern: Pattern) {
        self.commands.signal(Command::Run(pattern));
    }

    /// Stop the motor, cancelling any pattern in progress
    pub fn stop(&self) {
        self.commands.signal(Command::Stop);
    }
}

/// Vibration motor on a GPIO output
pub struct Vibramotor<P> {
    pin: P,
    running: bool,
}

impl<P: OutputPin> Vibramotor<P> {
    /// Take the motor pin and drive it low.
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;

        #[cfg(feature = "defmt")]
        defmt::info!("vibramotor initialized");

        Ok(Self {
            pin,
            running: false,
        })
    }

    /// Returns `true` while the motor pin is driven high
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Drive the pin low immediately.
    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()?;
        self.running = false;
        Ok(())
    }

    fn start(&mut self) -> Result<(), P::Error> {
        self.pin.set_high()?;
        self.running = true;
        Ok(())
    }

    /// Play `pattern` to completion. Leaves the motor off.
    pub async fn play(&mut self, pattern: Pattern) -> Result<(), P::Error> {
        for _ in 0..pattern.cycles {
            self.start()?;
            Timer::after_millis(u64::from(pattern.on_ms)).await;
            self.stop()?;
            Timer::after_millis(u64::from(pattern.off_ms)).await;
        }
        Ok(())
    }

    /// Sequencer task body. Never returns unless the pin fails.
    ///
    /// Waits for commands on `commands`. A command arriving mid-pattern
    /// stops the motor and takes over at once.
    pub async fn run(&mut self, commands: &CommandSignal) -> Result<Infallible, P::Error> {
        let mut next = commands.wait().await;
        loop {
            next = match next {
                Command::Stop => {
                    self.stop()?;
                    #[cfg(feature = "defmt")]
                    defmt::debug!("vibramotor stopped");
                    commands.wait().await
                }
                Command::Run(pattern) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("vibramotor pattern {}", pattern);
                    match self.play_until(pattern, commands).await? {
                        Some(preempted_by) => {
                            self.stop()?;
                            preempted_by
                        }
                        None => commands.wait().await,
                    }
                }
            };
        }
    }

    /// Play `pattern` unless a command arrives first. Returns that command.
    async fn play_until(
        &mut self,
        pattern: Pattern,
        commands: &CommandSignal,
    ) -> Result<Option<Command>, P::Error> {
        for _ in 0..pattern.cycles {
            self.start()?;
            let on = Timer::after_millis(u64::from(pattern.on_ms));
            if let Either::Second(cmd) = select(on, commands.wait()).await {
                return Ok(Some(cmd));
            }
            self.stop()?;
            let off = Timer::after_millis(u64::from(pattern.off_ms));
            if let Either::Second(cmd) = select(off, commands.wait()).await {
                return Ok(Some(cmd));
            }
        }
        Ok(None)
    }

    /// Give the pin back, driven low.
    pub fn release(mut self) -> Result<P, P::Error> {
        self.stop()?;
        Ok(self.pin)
    }
}
