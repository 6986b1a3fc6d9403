//! 8-bit RGB color as carried by scene snapshots.

use serde::{Deserialize, Serialize};

/// The reserved sentinel color for core nebulae.
///
/// The shader boosts the intensity of any body whose base color matches
/// this value exactly. It is a compatibility sentinel inherited from the
/// live layer's palette, not a general material system - do not extend
/// the matching beyond exact equality.
pub const NEBULA_MAGENTA: Rgb8 = Rgb8 {
    r: 255,
    g: 0,
    b: 255,
};

/// An 8-bit RGB color (channel values 0-255).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Create a new color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// True when this color is exactly the reserved nebula sentinel.
    pub fn is_nebula_magenta(&self) -> bool {
        *self == NEBULA_MAGENTA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nebula_sentinel_is_exact() {
        assert!(NEBULA_MAGENTA.is_nebula_magenta());
        assert!(Rgb8::new(255, 0, 255).is_nebula_magenta());

        // Off-by-one in any channel is not a nebula
        assert!(!Rgb8::new(254, 0, 255).is_nebula_magenta());
        assert!(!Rgb8::new(255, 1, 255).is_nebula_magenta());
        assert!(!Rgb8::new(255, 0, 254).is_nebula_magenta());
    }
}
