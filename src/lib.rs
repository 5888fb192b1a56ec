#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod constants;
pub mod errors;
pub mod geometry;
pub mod intake;
pub mod records;
pub mod report;
pub mod service;
pub mod solver;
pub mod store;

pub use crate::constants::{FitConstants, IntakeRatios};
pub use crate::errors::{ConfigError, FitError, ServiceError, StoreError};
pub use crate::geometry::{angle_by_sides, dist, opposite_side, point, Point};
pub use crate::intake::{expand, expand_with};
pub use crate::records::{
    AnthropometryProfile, FitResult, FrameGeometry, NamedFit, RawMeasurements,
    RiderAnthropometry,
};
pub use crate::report::{render_summary, Envelope};
pub use crate::service::FitService;
pub use crate::solver::{basic_fit, basic_fit_records, basic_fit_with, solve_posture, Posture};
pub use crate::store::{
    AnthropometryStore, FitSettingsStore, GeometryStore, MemoryAnthropometryStore,
    MemoryFitSettingsStore, MemoryGeometryStore,
};
