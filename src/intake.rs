//! Expansion of raw body measurements into a stored anthropometry profile.
//!
//! This runs once when a rider records new measurements, not on every fit.

use crate::constants::IntakeRatios;
use crate::records::{AnthropometryProfile, RawMeasurements};

/// Expand raw measurements with the default ratio table.
///
/// # Examples
/// ```
/// use bikefit::{expand, RawMeasurements};
///
/// let profile = expand(&RawMeasurements {
///     height: 1750.0,
///     foot_length: 270.0,
///     hip: 450.0,
///     lower_leg: 440.0,
///     torso_max: 550.0,
///     upperarm: 320.0,
///     forearm: 270.0,
/// });
/// assert!((profile.heel_to_ankle - 83.7).abs() < 1.0e-9);
/// assert!((profile.torso_mid - 539.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn expand(raw: &RawMeasurements) -> AnthropometryProfile {
    expand_with(raw, &IntakeRatios::DEFAULT)
}

/// Expand raw measurements with a custom ratio table.
#[must_use]
pub fn expand_with(raw: &RawMeasurements, ratios: &IntakeRatios) -> AnthropometryProfile {
    AnthropometryProfile {
        hip: raw.hip,
        hip_joint_offset: raw.height * ratios.hip_joint_offset,
        lower_leg: raw.lower_leg,
        heel_to_ankle: raw.foot_length * ratios.heel_to_ankle,
        ankle_to_metatarsal: raw.foot_length * ratios.ankle_to_metatarsal,
        heel_to_metatarsal: raw.foot_length * ratios.heel_to_metatarsal,
        toes: raw.foot_length * ratios.toes,
        sole_height: ratios.sole_height,
        torso_max: raw.torso_max,
        torso_mid: raw.torso_max * ratios.torso_mid,
        torso_min: raw.torso_max * ratios.torso_min,
        torso_mid_angle: ratios.torso_mid_angle,
        torso_min_angle: ratios.torso_min_angle,
        upperarm: raw.upperarm,
        forearm: raw.forearm,
        neck_len: raw.height * ratios.neck_len,
        head_r: raw.height * ratios.head_r,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;
    use crate::errors::FitError;

    fn raw() -> RawMeasurements {
        RawMeasurements {
            height: 1750.0,
            foot_length: 270.0,
            hip: 450.0,
            lower_leg: 440.0,
            torso_max: 550.0,
            upperarm: 320.0,
            forearm: 270.0,
        }
    }

    #[test]
    fn derived_fields_follow_ratio_table() {
        let profile = expand(&raw());

        assert_relative_eq!(profile.hip_joint_offset, 1750.0 * 0.38, epsilon = 1.0e-9);
        assert_relative_eq!(profile.neck_len, 1750.0 * 0.95, epsilon = 1.0e-9);
        assert_relative_eq!(profile.head_r, 1750.0 * 0.65, epsilon = 1.0e-9);
        assert_relative_eq!(profile.heel_to_ankle, 83.7, epsilon = 1.0e-9);
        assert_relative_eq!(profile.ankle_to_metatarsal, 159.3, epsilon = 1.0e-9);
        assert_relative_eq!(profile.heel_to_metatarsal, 180.9, epsilon = 1.0e-9);
        assert_relative_eq!(profile.toes, 67.5, epsilon = 1.0e-9);
        assert_relative_eq!(profile.torso_mid, 539.0, epsilon = 1.0e-9);
        assert_relative_eq!(profile.torso_min, 481.25, epsilon = 1.0e-9);
        assert_eq!(profile.torso_mid_angle, 45.0);
        assert_eq!(profile.torso_min_angle, 10.0);
        assert_eq!(profile.sole_height, 45.0);
    }

    #[test]
    fn segment_lengths_pass_through() {
        let profile = expand(&raw());
        assert_eq!(profile.hip, 450.0);
        assert_eq!(profile.lower_leg, 440.0);
        assert_eq!(profile.torso_max, 550.0);
        assert_eq!(profile.upperarm, 320.0);
        assert_eq!(profile.forearm, 270.0);

        let rider = profile.rider();
        assert_eq!(rider.hip, 450.0);
        assert_eq!(rider.torso_mid, profile.torso_mid);
        assert_eq!(rider.heel_to_ankle, profile.heel_to_ankle);
    }

    #[test]
    fn custom_ratios_are_applied() {
        let ratios = IntakeRatios {
            sole_height: 30.0,
            torso_mid: 1.0,
            ..IntakeRatios::DEFAULT
        };
        let profile = expand_with(&raw(), &ratios);
        assert_eq!(profile.sole_height, 30.0);
        assert_eq!(profile.torso_mid, 550.0);
    }

    #[test]
    fn missing_raw_input_is_reported() {
        let record = json!({
            "height": 1750, "hip": 450, "lowerLeg": 440,
            "torsoMax": 550, "upperarm": 320, "forearm": 270
        });
        assert_eq!(
            RawMeasurements::from_record(&record),
            Err(FitError::missing("footLength"))
        );
    }
}
