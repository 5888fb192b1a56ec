//! Planar geometry helpers for the sagittal-plane rider model.
//!
//! Coordinates are measured in millimetres with the bottom bracket at the
//! origin, `x` pointing towards the front wheel and `y` pointing up.

use nalgebra::Vector2;
use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

use crate::errors::FitError;

/// Cosines this close outside `[-1, 1]` are treated as rounding noise.
const COSINE_TOLERANCE: f64 = 1.0e-12;

/// Position in the sagittal plane measured in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Horizontal distance from the bottom bracket.
    pub x: f64,
    /// Vertical distance from the bottom bracket.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Straight-line distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Inclination in degrees of the line from `self` to `other`.
    ///
    /// The slope is taken through `atan` rather than `atan2`, so the result
    /// always lies in `[-90, 90]`.
    #[must_use]
    pub fn inclination_to(self, other: Self) -> f64 {
        to_degrees(((other.y - self.y) / (other.x - self.x)).atan())
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use bikefit::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Distance between two points.
#[must_use]
pub fn dist(a: Point, b: Point) -> f64 {
    a.distance_to(b)
}

/// Convert an angle in degrees to radians.
#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    Angle::new::<degree>(degrees).get::<radian>()
}

/// Convert an angle in radians to degrees.
#[must_use]
pub fn to_degrees(radians: f64) -> f64 {
    Angle::new::<radian>(radians).get::<degree>()
}

/// Length of the side opposite an included angle of `angle_deg` degrees
/// between sides `a` and `b`.
///
/// # Examples
/// ```
/// use bikefit::opposite_side;
///
/// let hypotenuse = opposite_side(3.0, 4.0, 90.0);
/// assert!((hypotenuse - 5.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn opposite_side(a: f64, b: f64, angle_deg: f64) -> f64 {
    (a * a + b * b - 2.0 * a * b * to_radians(angle_deg).cos()).sqrt()
}

/// Angle in degrees between sides `a` and `b` of a triangle whose third side
/// is `c`.
///
/// Cosines at most `1e-12` outside `[-1, 1]` are rounding noise and are clamped
/// to the range; anything further out is infeasible.
///
/// # Errors
///
/// Returns [`FitError::GeometricallyInfeasible`] when the three lengths do not
/// form a triangle, including degenerate zero-length sides.
///
/// # Examples
/// ```
/// use bikefit::angle_by_sides;
///
/// let right = angle_by_sides(3.0, 4.0, 5.0).expect("valid triangle");
/// assert!((right - 90.0).abs() < 1.0e-9);
/// assert!(angle_by_sides(1.0, 1.0, 3.0).is_err());
/// ```
pub fn angle_by_sides(a: f64, b: f64, c: f64) -> Result<f64, FitError> {
    let cosine = (a * a + b * b - c * c) / (2.0 * a * b);
    if !cosine.is_finite() || cosine.abs() > 1.0 + COSINE_TOLERANCE {
        return Err(FitError::GeometricallyInfeasible {
            sides: (a, b, c),
            cosine,
        });
    }
    Ok(to_degrees(cosine.clamp(-1.0, 1.0).acos()))
}
