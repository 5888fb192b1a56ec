//! Fit service tying the stores to the solver.
//!
//! This is the shape an HTTP handler calls into: identifiers in, plain
//! records out.

use tracing::info;

use crate::constants::{FitConstants, IntakeRatios};
use crate::errors::{ServiceError, StoreError};
use crate::intake::expand_with;
use crate::records::{AnthropometryProfile, FitResult, NamedFit, RawMeasurements};
use crate::solver::basic_fit_with;
use crate::store::{AnthropometryStore, FitSettingsStore, GeometryStore};

/// Resolves bikes and riders through stores and computes fits for them.
#[derive(Debug)]
pub struct FitService<G, A, S> {
    /// Frame geometry by bike size.
    geometry: G,
    /// Rider anthropometry by user.
    anthropometry: A,
    /// Saved fits.
    settings: S,
    /// Solver constants.
    constants: FitConstants,
    /// Intake ratios.
    ratios: IntakeRatios,
}

impl<G, A, S> FitService<G, A, S>
where
    G: GeometryStore,
    A: AnthropometryStore,
    S: FitSettingsStore,
{
    /// Create a service using the default constants tables.
    pub fn new(geometry: G, anthropometry: A, settings: S) -> Self {
        Self {
            geometry,
            anthropometry,
            settings,
            constants: FitConstants::DEFAULT,
            ratios: IntakeRatios::DEFAULT,
        }
    }

    /// Replace the solver constants.
    #[must_use]
    pub fn with_constants(mut self, constants: FitConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Replace the intake ratios.
    #[must_use]
    pub fn with_ratios(mut self, ratios: IntakeRatios) -> Self {
        self.ratios = ratios;
        self
    }

    /// Access the geometry store.
    pub fn geometry_store(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Expand raw measurements and record them as the user's latest profile.
    pub fn add_anthropometry(&mut self, user_id: u64, raw: &RawMeasurements) -> AnthropometryProfile {
        let profile = expand_with(raw, &self.ratios);
        self.anthropometry.add_anthropometry(user_id, profile);
        info!(user_id, "recorded anthropometry");
        profile
    }

    /// Latest anthropometry of a user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoAnthropometry`] when nothing was recorded.
    pub fn anthropometry(&self, user_id: u64) -> Result<AnthropometryProfile, ServiceError> {
        self.anthropometry
            .latest_anthropometry(user_id)
            .ok_or(ServiceError::Store(StoreError::NoAnthropometry(user_id)))
    }

    /// Compute the default fit of a user on a bike size.
    ///
    /// # Errors
    ///
    /// Returns a store error when either record is unknown and a fit error
    /// when the solver rejects the combination.
    pub fn basic_fit(&self, size_id: u64, user_id: u64) -> Result<FitResult, ServiceError> {
        let geometry = self
            .geometry
            .bike_geometry(size_id)
            .ok_or(StoreError::UnknownBikeSize(size_id))?;
        let profile = self.anthropometry(user_id)?;
        let fit = basic_fit_with(&geometry, &profile.rider(), &self.constants)?;
        info!(size_id, user_id, "computed basic fit");
        Ok(fit)
    }

    /// Save a fit under a name for a user and bike size.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyFitName`] for blank names.
    pub fn save_fit(
        &mut self,
        user_id: u64,
        size_id: u64,
        name: &str,
        fit: FitResult,
    ) -> Result<NamedFit, ServiceError> {
        let named = self.settings.save_fit(user_id, size_id, name, fit)?;
        info!(user_id, size_id, name = %named.name, "saved fit");
        Ok(named)
    }

    /// Look up a saved fit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownFit`] when no such fit exists.
    pub fn fit_by_name(
        &self,
        user_id: u64,
        size_id: u64,
        name: &str,
    ) -> Result<NamedFit, ServiceError> {
        self.settings
            .fit_by_name(user_id, size_id, name)
            .ok_or_else(|| {
                ServiceError::Store(StoreError::UnknownFit {
                    user_id,
                    size_id,
                    name: name.trim().to_owned(),
                })
            })
    }

    /// Names of the fits saved for a user and bike size.
    pub fn fit_names(&self, user_id: u64, size_id: u64) -> Vec<String> {
        self.settings.fit_names(user_id, size_id)
    }

    /// Delete a saved fit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownFit`] when no such fit exists.
    pub fn delete_fit(&mut self, user_id: u64, size_id: u64, name: &str) -> Result<(), ServiceError> {
        self.settings.delete_fit(user_id, size_id, name)?;
        info!(user_id, size_id, name, "deleted fit");
        Ok(())
    }
}
