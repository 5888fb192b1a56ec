//! Error types produced while decoding records, solving fits and using stores.

use thiserror::Error;

/// Error returned when a fit cannot be computed.
///
/// Every variant is non-retryable: the caller has to change the supplied
/// geometry or anthropometry before trying again.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FitError {
    /// Returned when a required field is absent or not numeric.
    #[error("required field `{0}` is missing or not numeric")]
    MissingField(String),
    /// Returned when a field holds a number that cannot take part in the model.
    #[error("field `{field}` has an unusable value ({value})")]
    InvalidInput {
        /// Name of the offending field as it appears on the wire.
        field: String,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the rider and frame cannot close the seat, hands and
    /// shoulder triangle.
    #[error("no fit solution for this combination of frame and rider (cosine {cosine})")]
    GeometricallyInfeasible {
        /// Side lengths `(a, b, c)` handed to the law of cosines, in millimetres.
        sides: (f64, f64, f64),
        /// Cosine of the requested angle; lies outside `[-1, 1]` or is not finite.
        cosine: f64,
    },
}

impl FitError {
    /// Build a [`FitError::MissingField`] from a field name.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::MissingField(field.to_owned())
    }

    /// Short machine readable tag used in response envelopes.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::InvalidInput { .. } => "invalid_input",
            Self::GeometricallyInfeasible { .. } => "geometrically_infeasible",
        }
    }
}

/// Error returned by the record stores.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Returned when no frame geometry is stored for a bike size.
    #[error("bike size {0} does not exist")]
    UnknownBikeSize(u64),
    /// Returned when a user has never recorded anthropometry.
    #[error("user {0} has no anthropometry on record")]
    NoAnthropometry(u64),
    /// Returned when a fit is saved under a blank name.
    #[error("fit name must not be empty")]
    EmptyFitName,
    /// Returned when a named fit cannot be found for a user and bike size.
    #[error("no fit named `{name}` for user {user_id} on bike size {size_id}")]
    UnknownFit {
        /// Owner of the fit.
        user_id: u64,
        /// Bike size the fit belongs to.
        size_id: u64,
        /// Requested fit name.
        name: String,
    },
}

/// Error returned by [`FitService`](crate::FitService) operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ServiceError {
    /// A store lookup or write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The solver rejected the resolved records.
    #[error(transparent)]
    Fit(#[from] FitError),
}

impl ServiceError {
    /// Short machine readable tag used in response envelopes.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Store(StoreError::UnknownBikeSize(_)) => "unknown_bike_size",
            Self::Store(StoreError::NoAnthropometry(_)) => "no_anthropometry",
            Self::Store(StoreError::EmptyFitName) => "empty_fit_name",
            Self::Store(StoreError::UnknownFit { .. }) => "unknown_fit",
            Self::Fit(error) => error.kind(),
        }
    }
}

/// Error returned when a constants table cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The constants file could not be read.
    #[error("failed to read constants file `{path}`")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The constants file is not a valid constants table.
    #[error("constants file `{path}` is not valid JSON")]
    Parse {
        /// Path that was requested.
        path: String,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_message_is_user_facing() {
        let error = FitError::GeometricallyInfeasible {
            sides: (1.0, 10.0, 1.0),
            cosine: 1.5,
        };
        assert!(error
            .to_string()
            .starts_with("no fit solution for this combination"));
        assert_eq!(error.kind(), "geometrically_infeasible");
    }

    #[test]
    fn service_error_kinds_follow_source() {
        let error = ServiceError::from(StoreError::NoAnthropometry(7));
        assert_eq!(error.kind(), "no_anthropometry");
        assert_eq!(error.to_string(), "user 7 has no anthropometry on record");

        let error = ServiceError::from(FitError::missing("torsoMid"));
        assert_eq!(error.kind(), "missing_field");
    }
}
