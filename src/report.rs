//! Rendering of fit outcomes for people and for API clients.

use std::fmt::Write;

use serde::Serialize;

use crate::errors::{FitError, ServiceError};
use crate::records::FitResult;
use crate::solver::Posture;

/// Render a textual summary of a solved posture.
#[must_use]
pub fn render_summary(posture: &Posture) -> String {
    let mut output = String::new();

    writeln!(&mut output, "Basic fit").expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Saddle height: {:.1} mm (along the seat tube)",
        posture.seat_height
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "Stem spacers: {:.1} mm", posture.stem_height)
        .expect("writing to string cannot fail");

    if posture.saddle_clamped() {
        writeln!(
            &mut output,
            "Saddle offset: {:.1} mm (limited by rails, wanted {:.1} mm)",
            posture.saddle_offset, posture.unclamped_saddle_offset
        )
        .expect("writing to string cannot fail");
    } else {
        writeln!(&mut output, "Saddle offset: {:.1} mm", posture.saddle_offset)
            .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "Torso angle: {:.1} deg, shifter angle: {:.1} deg",
        posture.torso_angle, posture.shifter_angle
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Seat ({:.1}, {:.1}) mm, hands ({:.1}, {:.1}) mm, arm span {:.1} mm",
        posture.seat.x, posture.seat.y, posture.hands.x, posture.hands.y, posture.arms_len
    )
    .expect("writing to string cannot fail");

    output
}

/// Error body carried by a failed [`Envelope`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Machine readable error tag.
    pub kind: &'static str,
    /// Human readable message.
    pub message: String,
}

/// Success or error wrapper returned to API clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// The request succeeded.
    Success {
        /// Always `true`.
        success: bool,
        /// Response payload.
        data: T,
    },
    /// The request failed.
    Failure {
        /// Always `false`.
        success: bool,
        /// Failure description.
        error: ErrorBody,
    },
}

impl<T> Envelope<T> {
    /// Wrap a successful payload.
    pub const fn success(data: T) -> Self {
        Self::Success {
            success: true,
            data,
        }
    }

    /// Wrap a failure.
    pub fn failure(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: ErrorBody {
                kind,
                message: message.into(),
            },
        }
    }
}

impl From<Result<FitResult, FitError>> for Envelope<FitResult> {
    fn from(value: Result<FitResult, FitError>) -> Self {
        match value {
            Ok(fit) => Self::success(fit),
            Err(error) => Self::failure(error.kind(), error.to_string()),
        }
    }
}

impl<T> From<Result<T, ServiceError>> for Envelope<T> {
    fn from(value: Result<T, ServiceError>) -> Self {
        match value {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error.kind(), error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::geometry::point;

    fn posture(clamped: bool) -> Posture {
        Posture {
            seat_height: 750.0,
            stem_height: 50.0,
            unclamped_saddle_offset: if clamped { 45.2 } else { 20.0 },
            saddle_offset: if clamped { 25.0 } else { 20.0 },
            seat: point(-194.3, 717.2),
            hands: point(623.7, 639.8),
            arms_len: 537.1,
            torso_len: 500.0,
            torso_angle: 33.8,
            shifter_angle: 30.0,
        }
    }

    #[test]
    fn formats_human_readable_report() {
        let report = render_summary(&posture(true));
        assert!(report.contains("Saddle height: 750.0 mm"));
        assert!(report.contains("limited by rails, wanted 45.2 mm"));
        assert!(report.contains("Torso angle: 33.8 deg"));

        let report = render_summary(&posture(false));
        assert!(report.contains("Saddle offset: 20.0 mm\n"));
    }

    #[test]
    fn envelopes_serialize_with_success_flag() {
        let fit = FitResult::from(posture(true));
        let value = serde_json::to_value(Envelope::from(Ok::<_, FitError>(fit)))
            .expect("serializable");
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["seatHight"], json!(750.0));

        let failure: Envelope<FitResult> =
            Err::<FitResult, _>(FitError::missing("torsoMid")).into();
        let value = serde_json::to_value(failure).expect("serializable");
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["kind"], json!("missing_field"));
        assert!(value["error"]["message"]
            .as_str()
            .is_some_and(|message| message.contains("torsoMid")));
    }
}
