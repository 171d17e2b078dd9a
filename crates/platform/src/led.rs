//! Addressable RGB LED abstraction
//!
//! The strip backend (RMT, SPI, bit-banged) lives in the host HAL. Board code
//! only needs to set pixels, push them out and clear the strip.

/// 24-bit colour, in logical RGB order regardless of the wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// All channels off
    pub const OFF: Self = Self::new(0, 0, 0);

    /// Create a colour
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Bytes in the order `model` expects them on the wire
    pub const fn to_wire(self, model: LedModel) -> [u8; 3] {
        match model {
            LedModel::Ws2812Grb => [self.g, self.r, self.b],
            LedModel::Sk6812Rgb => [self.r, self.g, self.b],
        }
    }
}

/// LED chip model and colour component order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedModel {
    /// WS2812, GRB order
    Ws2812Grb,
    /// SK6812, RGB order
    Sk6812Rgb,
}

/// Addressable LED strip
pub trait LedStrip {
    /// Error type
    type Error: core::fmt::Debug;

    /// Number of pixels on the strip
    fn len(&self) -> usize;

    /// Returns `true` if the strip has no pixels
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set one pixel in the frame buffer. Takes effect on [`refresh`](Self::refresh).
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error>;

    /// Push the frame buffer to the strip.
    fn refresh(&mut self) -> Result<(), Self::Error>;

    /// Turn every pixel off immediately.
    fn clear(&mut self) -> Result<(), Self::Error>;
}
