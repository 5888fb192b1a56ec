//! Fixed model constants for the fit solver and the anthropometry intake.
//!
//! The values are part of the model rather than fallbacks for missing data.
//! Both tables deserialize with `#[serde(default)]`, so a configuration file
//! only has to name the entries it overrides.

use serde::{Deserialize, Serialize};

// -- Solver --

/// Elbow angle in degrees assumed for a relaxed grip.
pub const ELBOW_ANGLE_DEG: f64 = 155.0;

/// Reference hip flexion angle in degrees at the bottom of the pedal stroke.
pub const HIP_FLEXION_DEG: f64 = 35.0;

/// Height of the grip above the bar centre in millimetres.
pub const GRIP_OFFSET_MM: f64 = 10.0;

/// Brake lever and shifter angle in degrees.
pub const SHIFTER_ANGLE_DEG: f64 = 30.0;

/// Multiplier applied to the forearm before the arm length is solved.
pub const FOREARM_SCALE: f64 = 1.0;

// -- Intake ratios --

/// Hip joint offset as a fraction of body height.
pub const HIP_JOINT_OFFSET_RATIO: f64 = 0.38;
/// Neck length as a fraction of body height.
pub const NECK_LEN_RATIO: f64 = 0.95;
/// Head radius as a fraction of body height.
pub const HEAD_R_RATIO: f64 = 0.65;
/// Heel to ankle as a fraction of foot length.
pub const HEEL_TO_ANKLE_RATIO: f64 = 0.31;
/// Ankle to metatarsal as a fraction of foot length.
pub const ANKLE_TO_METATARSAL_RATIO: f64 = 0.59;
/// Heel to metatarsal as a fraction of foot length.
pub const HEEL_TO_METATARSAL_RATIO: f64 = 0.67;
/// Toe length as a fraction of foot length.
pub const TOES_RATIO: f64 = 0.25;
/// Mid torso length as a fraction of the maximum torso length.
pub const TORSO_MID_RATIO: f64 = 0.98;
/// Minimum torso length as a fraction of the maximum torso length.
pub const TORSO_MIN_RATIO: f64 = 0.875;
/// Torso angle in degrees paired with the mid torso length.
pub const TORSO_MID_ANGLE_DEG: f64 = 45.0;
/// Torso angle in degrees paired with the minimum torso length.
pub const TORSO_MIN_ANGLE_DEG: f64 = 10.0;
/// Shoe sole height in millimetres.
pub const SOLE_HEIGHT_MM: f64 = 45.0;

/// Constants consumed by the fit solver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitConstants {
    /// Included elbow angle in degrees.
    pub elbow_angle: f64,
    /// Reference hip flexion angle in degrees.
    pub hip_flexion: f64,
    /// Grip height above the bar centre in millimetres.
    pub grip_offset: f64,
    /// Emitted shifter angle in degrees.
    pub shifter_angle: f64,
    /// Forearm length multiplier.
    pub forearm_scale: f64,
}

impl FitConstants {
    /// The table used when nothing else is configured.
    pub const DEFAULT: Self = Self {
        elbow_angle: ELBOW_ANGLE_DEG,
        hip_flexion: HIP_FLEXION_DEG,
        grip_offset: GRIP_OFFSET_MM,
        shifter_angle: SHIFTER_ANGLE_DEG,
        forearm_scale: FOREARM_SCALE,
    };
}

impl Default for FitConstants {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Ratios and constants consumed by the anthropometry intake transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntakeRatios {
    /// See [`HIP_JOINT_OFFSET_RATIO`].
    pub hip_joint_offset: f64,
    /// See [`NECK_LEN_RATIO`].
    pub neck_len: f64,
    /// See [`HEAD_R_RATIO`].
    pub head_r: f64,
    /// See [`HEEL_TO_ANKLE_RATIO`].
    pub heel_to_ankle: f64,
    /// See [`ANKLE_TO_METATARSAL_RATIO`].
    pub ankle_to_metatarsal: f64,
    /// See [`HEEL_TO_METATARSAL_RATIO`].
    pub heel_to_metatarsal: f64,
    /// See [`TOES_RATIO`].
    pub toes: f64,
    /// See [`TORSO_MID_RATIO`].
    pub torso_mid: f64,
    /// See [`TORSO_MIN_RATIO`].
    pub torso_min: f64,
    /// See [`TORSO_MID_ANGLE_DEG`].
    pub torso_mid_angle: f64,
    /// See [`TORSO_MIN_ANGLE_DEG`].
    pub torso_min_angle: f64,
    /// See [`SOLE_HEIGHT_MM`].
    pub sole_height: f64,
}

impl IntakeRatios {
    /// The table used when nothing else is configured.
    pub const DEFAULT: Self = Self {
        hip_joint_offset: HIP_JOINT_OFFSET_RATIO,
        neck_len: NECK_LEN_RATIO,
        head_r: HEAD_R_RATIO,
        heel_to_ankle: HEEL_TO_ANKLE_RATIO,
        ankle_to_metatarsal: ANKLE_TO_METATARSAL_RATIO,
        heel_to_metatarsal: HEEL_TO_METATARSAL_RATIO,
        toes: TOES_RATIO,
        torso_mid: TORSO_MID_RATIO,
        torso_min: TORSO_MIN_RATIO,
        torso_mid_angle: TORSO_MID_ANGLE_DEG,
        torso_min_angle: TORSO_MIN_ANGLE_DEG,
        sole_height: SOLE_HEIGHT_MM,
    };
}

impl Default for IntakeRatios {
    fn default() -> Self {
        Self::DEFAULT
    }
}
