//! # Geometry
//!
//! The 2-D displacement of the active card from its rest position.

use std::ops::{Add, Mul, Sub};

/// A displacement `(dx, dy)` in host units (terminal cells for the TUI).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length, used for spring rest detection.
    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn is_zero(self) -> bool {
        self == Offset::ZERO
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl Mul<f64> for Offset {
    type Output = Offset;

    fn mul(self, rhs: f64) -> Offset {
        Offset::new(self.dx * rhs, self.dy * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        let a = Offset::new(3.0, 4.0);
        let b = Offset::new(1.0, -1.0);
        assert_eq!(a + b, Offset::new(4.0, 3.0));
        assert_eq!(a - b, Offset::new(2.0, 5.0));
        assert_eq!(a * 2.0, Offset::new(6.0, 8.0));
        assert_eq!(a.length(), 5.0);
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Offset::default().is_zero());
        assert!(!Offset::new(0.0, 1.0).is_zero());
    }
}
