//! Biomechanical fit solver.
//!
//! The rider is modelled as a stick figure in the sagittal plane with the
//! bottom bracket at the origin. The leg is fully extended at the bottom of
//! the pedal stroke, the elbows are slightly bent, and the torso closes the
//! triangle between the saddle and the hands.

use serde_json::Value;
use tracing::debug;

use crate::constants::FitConstants;
use crate::errors::FitError;
use crate::geometry::{angle_by_sides, dist, opposite_side, point, to_radians, Point};
use crate::records::{FitResult, FrameGeometry, RiderAnthropometry};

/// Intermediate stick-figure quantities of one solved position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Posture {
    /// Saddle height along the seat tube.
    pub seat_height: f64,
    /// Spacer stack under the stem.
    pub stem_height: f64,
    /// Saddle offset before the rail clamp was applied.
    pub unclamped_saddle_offset: f64,
    /// Saddle offset after the rail clamp.
    pub saddle_offset: f64,
    /// Saddle contact point.
    pub seat: Point,
    /// Grip point on the shifter hoods.
    pub hands: Point,
    /// Shoulder to grip distance with bent elbows.
    pub arms_len: f64,
    /// Torso length used to close the triangle.
    pub torso_len: f64,
    /// Torso inclination from horizontal, in degrees.
    pub torso_angle: f64,
    /// Emitted shifter angle, in degrees.
    pub shifter_angle: f64,
}

impl Posture {
    /// Whether the saddle offset was limited by the rail length.
    #[must_use]
    pub fn saddle_clamped(&self) -> bool {
        self.saddle_offset < self.unclamped_saddle_offset
    }

    /// Straight-line distance from saddle to grip.
    #[must_use]
    pub fn reach_to_hands(&self) -> f64 {
        dist(self.seat, self.hands)
    }
}

impl From<Posture> for FitResult {
    fn from(value: Posture) -> Self {
        Self {
            seat_height: value.seat_height,
            stem_height: value.stem_height,
            saddle_offset: value.saddle_offset,
            torso_angle: value.torso_angle,
            shifter_angle: value.shifter_angle,
        }
    }
}

/// Compute the default fit for a rider on a frame.
///
/// # Errors
///
/// Returns [`FitError::GeometricallyInfeasible`] when the torso cannot bridge
/// the saddle and the hands.
///
/// # Examples
/// ```
/// use bikefit::{basic_fit, FrameGeometry, RiderAnthropometry};
///
/// let geometry = FrameGeometry {
///     seat_angle: 73.0,
///     head_angle: 71.0,
///     crank_len: 170.0,
///     max_stem_height: 50.0,
///     reach: 390.0,
///     stem_len: 100.0,
///     bar_reach: 75.0,
///     shifter_reach: 75.0,
///     stack: 550.0,
///     stem_angle: 0.0,
///     saddle_rail_len: 50.0,
/// };
/// let rider = RiderAnthropometry {
///     hip: 420.0,
///     lower_leg: 430.0,
///     heel_to_ankle: 70.0,
///     upperarm: 300.0,
///     forearm: 250.0,
///     torso_mid: 500.0,
/// };
/// let fit = basic_fit(&geometry, &rider).expect("rider fits the frame");
/// assert_eq!(fit.seat_height, 750.0);
/// assert_eq!(fit.saddle_offset, 25.0);
/// ```
pub fn basic_fit(
    geometry: &FrameGeometry,
    anthropometry: &RiderAnthropometry,
) -> Result<FitResult, FitError> {
    basic_fit_with(geometry, anthropometry, &FitConstants::DEFAULT)
}

/// Compute the fit with a custom constants table.
///
/// # Errors
///
/// Returns [`FitError::InvalidInput`] for non-finite dimensions and
/// [`FitError::GeometricallyInfeasible`] when the torso cannot bridge the
/// saddle and the hands.
pub fn basic_fit_with(
    geometry: &FrameGeometry,
    anthropometry: &RiderAnthropometry,
    constants: &FitConstants,
) -> Result<FitResult, FitError> {
    solve_posture(geometry, anthropometry, constants).map(FitResult::from)
}

/// Compute the fit from loose key-value records.
///
/// Numeric strings are coerced; absent or non-numeric fields are reported by name.
///
/// # Errors
///
/// Returns [`FitError::MissingField`] or [`FitError::InvalidInput`] for
/// malformed records and [`FitError::GeometricallyInfeasible`] when no
/// position exists.
pub fn basic_fit_records(geometry: &Value, anthropometry: &Value) -> Result<FitResult, FitError> {
    let geometry = FrameGeometry::from_record(geometry)?;
    let anthropometry = RiderAnthropometry::from_record(anthropometry)?;
    basic_fit(&geometry, &anthropometry)
}

/// Solve the full stick figure for a rider on a frame.
///
/// # Errors
///
/// Returns [`FitError::InvalidInput`] when a dimension is `NaN` or infinite and
/// [`FitError::GeometricallyInfeasible`] when the torso cannot bridge the
/// saddle and the hands.
pub fn solve_posture(
    geometry: &FrameGeometry,
    anthropometry: &RiderAnthropometry,
    constants: &FitConstants,
) -> Result<Posture, FitError> {
    geometry.validate()?;
    anthropometry.validate()?;

    let seat_angle = to_radians(geometry.seat_angle);
    let head_angle = to_radians(geometry.head_angle);

    // Leg straight at six o'clock; the crank covers the pedal to bottom bracket span.
    let seat_height = anthropometry.hip + anthropometry.lower_leg + anthropometry.heel_to_ankle
        - geometry.crank_len;
    let stem_height = geometry.max_stem_height;

    let unclamped_saddle_offset = geometry.crank_len + seat_height * seat_angle.cos()
        - anthropometry.hip * to_radians(constants.hip_flexion).cos();
    let saddle_offset = unclamped_saddle_offset.min(geometry.saddle_rail_len / 2.0);

    let seat = point(
        -seat_height * seat_angle.cos() + saddle_offset,
        seat_height * seat_angle.sin(),
    );
    let hands = point(
        geometry.reach + geometry.stem_len + geometry.bar_reach + geometry.shifter_reach
            - stem_height * head_angle.cos(),
        geometry.stack
            + stem_height * head_angle.sin()
            + geometry.stem_len * to_radians(90.0 + geometry.stem_angle - geometry.head_angle).sin()
            + constants.grip_offset,
    );

    let arms_len = opposite_side(
        anthropometry.upperarm,
        anthropometry.forearm * constants.forearm_scale,
        constants.elbow_angle,
    );
    let torso_len = anthropometry.torso_mid;
    let seat_to_hands = dist(seat, hands);

    let hip_angle = angle_by_sides(seat_to_hands, torso_len, arms_len).map_err(|error| {
        debug!(seat_to_hands, torso_len, arms_len, "seat, torso and arms do not close");
        error
    })?;
    let torso_angle = hip_angle + seat.inclination_to(hands);

    let posture = Posture {
        seat_height,
        stem_height,
        unclamped_saddle_offset,
        saddle_offset,
        seat,
        hands,
        arms_len,
        torso_len,
        torso_angle,
        shifter_angle: constants.shifter_angle,
    };
    debug!(
        seat_height,
        saddle_offset,
        clamped = posture.saddle_clamped(),
        torso_angle,
        "solved posture"
    );
    Ok(posture)
}
