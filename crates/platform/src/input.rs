//! Button abstraction
//!
//! The board only configures button pins and samples raw levels. Debouncing
//! and click/long-press detection belong to the application.

use crate::gpio::PinState;

/// Physical buttons, in board index order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button 1 (index 0)
    Button1,
    /// Button 2 (index 1)
    Button2,
    /// Button 3 (index 2), shares a USB data line
    Button3,
    /// Button 4 (index 3), shares a USB data line
    Button4,
}

impl ButtonId {
    /// All buttons in index order
    pub const ALL: [Self; 4] = [Self::Button1, Self::Button2, Self::Button3, Self::Button4];

    /// Board index of this button
    pub const fn index(self) -> usize {
        match self {
            Self::Button1 => 0,
            Self::Button2 => 1,
            Self::Button3 => 2,
            Self::Button4 => 3,
        }
    }

    /// Button at board index `index`, if any
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Button1),
            1 => Some(Self::Button2),
            2 => Some(Self::Button3),
            3 => Some(Self::Button4),
            _ => None,
        }
    }
}

/// Pin level that means "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed pulls the line low
    Low,
    /// Pressed drives the line high
    High,
}

impl ActiveLevel {
    /// Returns `true` if a pin sampled at `level` reads as pressed.
    pub const fn is_active(self, level: PinState) -> bool {
        matches!(
            (self, level),
            (Self::Low, PinState::Low) | (Self::High, PinState::High)
        )
    }
}
