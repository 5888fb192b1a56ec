//! Typed records exchanged with the solver and the stores.
//!
//! Field names on the wire keep the camelCase spelling used by the stores,
//! including the historical `Hight` suffix.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::FitError;

/// Read numeric fields out of a loose key-value record.
///
/// JSON numbers and strings holding a number are accepted. Anything else,
/// including `null`, counts as missing.
struct FieldReader<'a> {
    /// Record being decoded.
    fields: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    /// Wrap a record, rejecting values that are not JSON objects.
    fn new(record: &'a Value) -> Result<Self, FitError> {
        record
            .as_object()
            .map(|fields| Self { fields })
            .ok_or_else(|| FitError::missing("record"))
    }

    /// Fetch `field` as an `f64`.
    fn number(&self, field: &str) -> Result<f64, FitError> {
        match self.fields.get(field) {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| FitError::missing(field))
    }
}

/// Reject the first non-finite value among `(wire name, value)` pairs.
fn ensure_finite(fields: &[(&str, f64)]) -> Result<(), FitError> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, value)) => Err(FitError::InvalidInput {
            field: field.to_owned(),
            value,
        }),
        None => Ok(()),
    }
}

/// Structural dimensions of one bike size, in millimetres and degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameGeometry {
    /// Seat tube angle from horizontal.
    pub seat_angle: f64,
    /// Head tube angle from horizontal.
    pub head_angle: f64,
    /// Crank arm length.
    pub crank_len: f64,
    /// Maximum spacer stack under the stem.
    #[serde(rename = "maxStemHight")]
    pub max_stem_height: f64,
    /// Frame reach.
    pub reach: f64,
    /// Stem length.
    pub stem_len: f64,
    /// Handlebar reach.
    pub bar_reach: f64,
    /// Additional reach to the shifter hoods.
    pub shifter_reach: f64,
    /// Frame stack.
    pub stack: f64,
    /// Stem rise angle.
    pub stem_angle: f64,
    /// Adjustable length of the saddle rails.
    pub saddle_rail_len: f64,
}

impl FrameGeometry {
    /// Decode a geometry record, coercing numeric strings.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::MissingField`] naming the first absent or non-numeric
    /// field and [`FitError::InvalidInput`] for non-finite numbers.
    pub fn from_record(record: &Value) -> Result<Self, FitError> {
        let fields = FieldReader::new(record)?;
        let geometry = Self {
            seat_angle: fields.number("seatAngle")?,
            head_angle: fields.number("headAngle")?,
            crank_len: fields.number("crankLen")?,
            max_stem_height: fields.number("maxStemHight")?,
            reach: fields.number("reach")?,
            stem_len: fields.number("stemLen")?,
            bar_reach: fields.number("barReach")?,
            shifter_reach: fields.number("shifterReach")?,
            stack: fields.number("stack")?,
            stem_angle: fields.number("stemAngle")?,
            saddle_rail_len: fields.number("saddleRailLen")?,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Check that every dimension is a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidInput`] naming the first `NaN` or infinite field.
    pub fn validate(&self) -> Result<(), FitError> {
        ensure_finite(&[
            ("seatAngle", self.seat_angle),
            ("headAngle", self.head_angle),
            ("crankLen", self.crank_len),
            ("maxStemHight", self.max_stem_height),
            ("reach", self.reach),
            ("stemLen", self.stem_len),
            ("barReach", self.bar_reach),
            ("shifterReach", self.shifter_reach),
            ("stack", self.stack),
            ("stemAngle", self.stem_angle),
            ("saddleRailLen", self.saddle_rail_len),
        ])
    }
}

/// Body segment lengths consumed by the solver, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderAnthropometry {
    /// Thigh length.
    pub hip: f64,
    /// Shin length.
    pub lower_leg: f64,
    /// Heel to ankle joint height.
    pub heel_to_ankle: f64,
    /// Upper arm length.
    pub upperarm: f64,
    /// Forearm length.
    pub forearm: f64,
    /// Torso length used for the riding position.
    pub torso_mid: f64,
}

impl RiderAnthropometry {
    /// Decode an anthropometry record, coercing numeric strings.
    ///
    /// Extra fields, such as those of a full [`AnthropometryProfile`], are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::MissingField`] naming the first absent or non-numeric
    /// field and [`FitError::InvalidInput`] for non-finite numbers.
    ///
    /// # Examples
    /// ```
    /// use bikefit::{FitError, RiderAnthropometry};
    /// use serde_json::json;
    ///
    /// let record = json!({
    ///     "hip": "420", "lowerLeg": 430, "heelToAnkle": 70,
    ///     "upperarm": 300, "forearm": 250
    /// });
    /// let error = RiderAnthropometry::from_record(&record).expect_err("torso missing");
    /// assert_eq!(error, FitError::MissingField("torsoMid".into()));
    /// ```
    pub fn from_record(record: &Value) -> Result<Self, FitError> {
        let fields = FieldReader::new(record)?;
        let rider = Self {
            hip: fields.number("hip")?,
            lower_leg: fields.number("lowerLeg")?,
            heel_to_ankle: fields.number("heelToAnkle")?,
            upperarm: fields.number("upperarm")?,
            forearm: fields.number("forearm")?,
            torso_mid: fields.number("torsoMid")?,
        };
        rider.validate()?;
        Ok(rider)
    }

    /// Check that every segment length is a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidInput`] naming the first `NaN` or infinite field.
    pub fn validate(&self) -> Result<(), FitError> {
        ensure_finite(&[
            ("hip", self.hip),
            ("lowerLeg", self.lower_leg),
            ("heelToAnkle", self.heel_to_ankle),
            ("upperarm", self.upperarm),
            ("forearm", self.forearm),
            ("torsoMid", self.torso_mid),
        ])
    }
}

/// Raw body measurements entered by a rider, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurements {
    /// Standing height.
    pub height: f64,
    /// Foot length.
    pub foot_length: f64,
    /// Thigh length.
    pub hip: f64,
    /// Shin length.
    pub lower_leg: f64,
    /// Maximum torso length.
    pub torso_max: f64,
    /// Upper arm length.
    pub upperarm: f64,
    /// Forearm length.
    pub forearm: f64,
}

impl RawMeasurements {
    /// Decode a raw measurement record, coercing numeric strings.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::MissingField`] naming the first absent or non-numeric
    /// field and [`FitError::InvalidInput`] for non-finite numbers.
    pub fn from_record(record: &Value) -> Result<Self, FitError> {
        let fields = FieldReader::new(record)?;
        let raw = Self {
            height: fields.number("height")?,
            foot_length: fields.number("footLength")?,
            hip: fields.number("hip")?,
            lower_leg: fields.number("lowerLeg")?,
            torso_max: fields.number("torsoMax")?,
            upperarm: fields.number("upperarm")?,
            forearm: fields.number("forearm")?,
        };
        ensure_finite(&[
            ("height", raw.height),
            ("footLength", raw.foot_length),
            ("hip", raw.hip),
            ("lowerLeg", raw.lower_leg),
            ("torsoMax", raw.torso_max),
            ("upperarm", raw.upperarm),
            ("forearm", raw.forearm),
        ])?;
        Ok(raw)
    }
}

/// Full anthropometry record stored at intake time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnthropometryProfile {
    /// Thigh length.
    pub hip: f64,
    /// Hip joint offset.
    pub hip_joint_offset: f64,
    /// Shin length.
    pub lower_leg: f64,
    /// Heel to ankle joint height.
    pub heel_to_ankle: f64,
    /// Ankle to metatarsal length.
    pub ankle_to_metatarsal: f64,
    /// Heel to metatarsal length.
    pub heel_to_metatarsal: f64,
    /// Toe length.
    pub toes: f64,
    /// Shoe sole height.
    #[serde(rename = "soleHight")]
    pub sole_height: f64,
    /// Maximum torso length.
    pub torso_max: f64,
    /// Mid torso length.
    pub torso_mid: f64,
    /// Minimum torso length.
    pub torso_min: f64,
    /// Torso angle paired with `torso_mid`, in degrees.
    pub torso_mid_angle: f64,
    /// Torso angle paired with `torso_min`, in degrees.
    pub torso_min_angle: f64,
    /// Upper arm length.
    pub upperarm: f64,
    /// Forearm length.
    pub forearm: f64,
    /// Neck length.
    pub neck_len: f64,
    /// Head radius.
    pub head_r: f64,
}

impl AnthropometryProfile {
    /// Project the fields the solver consumes.
    #[must_use]
    pub const fn rider(&self) -> RiderAnthropometry {
        RiderAnthropometry {
            hip: self.hip,
            lower_leg: self.lower_leg,
            heel_to_ankle: self.heel_to_ankle,
            upperarm: self.upperarm,
            forearm: self.forearm,
            torso_mid: self.torso_mid,
        }
    }
}

/// Fit parameters recommended for one rider on one bike size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    /// Saddle height along the seat tube, in millimetres.
    #[serde(rename = "seatHight")]
    pub seat_height: f64,
    /// Spacer stack under the stem, in millimetres.
    #[serde(rename = "stemHight")]
    pub stem_height: f64,
    /// Saddle fore-aft offset, in millimetres.
    pub saddle_offset: f64,
    /// Torso inclination from horizontal, in degrees.
    pub torso_angle: f64,
    /// Brake lever and shifter angle, in degrees.
    pub shifter_angle: f64,
}

/// A [`FitResult`] saved under a name for one user and bike size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedFit {
    /// Owner of the fit.
    pub user_id: u64,
    /// Bike size the fit was computed for.
    pub size_id: u64,
    /// User-chosen name, trimmed.
    pub name: String,
    /// Saved parameters.
    #[serde(flatten)]
    pub fit: FitResult,
}
