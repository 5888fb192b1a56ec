//! Contracts for the record stores that feed the solver, with in-memory
//! implementations.
//!
//! Persistence schema is owned by the embedding application. The traits here
//! only describe what the fit service needs from it.

use std::collections::HashMap;

use crate::errors::StoreError;
use crate::records::{AnthropometryProfile, FitResult, FrameGeometry, NamedFit};

/// Source of frame geometry by bike size identifier.
pub trait GeometryStore {
    /// Return the geometry of a bike size, if it exists.
    fn bike_geometry(&self, size_id: u64) -> Option<FrameGeometry>;
}

/// Source of rider anthropometry by user identifier.
pub trait AnthropometryStore {
    /// Append a new profile for a user.
    fn add_anthropometry(&mut self, user_id: u64, profile: AnthropometryProfile);

    /// Return the most recently recorded profile of a user.
    fn latest_anthropometry(&self, user_id: u64) -> Option<AnthropometryProfile>;
}

/// Named fit results scoped to a user and bike size.
pub trait FitSettingsStore {
    /// Save a fit under `name`, replacing an existing fit with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyFitName`] when `name` is blank.
    fn save_fit(
        &mut self,
        user_id: u64,
        size_id: u64,
        name: &str,
        fit: FitResult,
    ) -> Result<NamedFit, StoreError>;

    /// Look up a fit by name.
    fn fit_by_name(&self, user_id: u64, size_id: u64, name: &str) -> Option<NamedFit>;

    /// Names of the fits saved for a user and bike size, in save order.
    fn fit_names(&self, user_id: u64, size_id: u64) -> Vec<String>;

    /// Delete a fit by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownFit`] when no such fit exists.
    fn delete_fit(&mut self, user_id: u64, size_id: u64, name: &str) -> Result<(), StoreError>;
}

/// In-memory geometry table keyed by bike size.
#[derive(Clone, Debug, Default)]
pub struct MemoryGeometryStore {
    /// Stored geometry.
    sizes: HashMap<u64, FrameGeometry>,
    /// Next identifier handed out by [`MemoryGeometryStore::add_bike_size`].
    next_id: u64,
}

impl MemoryGeometryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store geometry under a fresh identifier and return it.
    pub fn add_bike_size(&mut self, geometry: FrameGeometry) -> u64 {
        self.next_id += 1;
        self.sizes.insert(self.next_id, geometry);
        self.next_id
    }

    /// Number of stored bike sizes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether no bike size is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl GeometryStore for MemoryGeometryStore {
    fn bike_geometry(&self, size_id: u64) -> Option<FrameGeometry> {
        self.sizes.get(&size_id).copied()
    }
}

/// In-memory anthropometry history keyed by user.
#[derive(Clone, Debug, Default)]
pub struct MemoryAnthropometryStore {
    /// Profiles per user, oldest first.
    history: HashMap<u64, Vec<AnthropometryProfile>>,
}

impl MemoryAnthropometryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnthropometryStore for MemoryAnthropometryStore {
    fn add_anthropometry(&mut self, user_id: u64, profile: AnthropometryProfile) {
        self.history.entry(user_id).or_default().push(profile);
    }

    fn latest_anthropometry(&self, user_id: u64) -> Option<AnthropometryProfile> {
        self.history
            .get(&user_id)
            .and_then(|profiles| profiles.last())
            .copied()
    }
}

/// In-memory fit settings, kept in save order.
#[derive(Clone, Debug, Default)]
pub struct MemoryFitSettingsStore {
    /// Saved fits.
    fits: Vec<NamedFit>,
}

impl MemoryFitSettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of a fit in the table.
    fn position(&self, user_id: u64, size_id: u64, name: &str) -> Option<usize> {
        self.fits
            .iter()
            .position(|fit| fit.user_id == user_id && fit.size_id == size_id && fit.name == name)
    }
}

impl FitSettingsStore for MemoryFitSettingsStore {
    fn save_fit(
        &mut self,
        user_id: u64,
        size_id: u64,
        name: &str,
        fit: FitResult,
    ) -> Result<NamedFit, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyFitName);
        }
        let named = NamedFit {
            user_id,
            size_id,
            name: name.to_owned(),
            fit,
        };
        match self.position(user_id, size_id, name) {
            Some(index) => self.fits[index] = named.clone(),
            None => self.fits.push(named.clone()),
        }
        Ok(named)
    }

    fn fit_by_name(&self, user_id: u64, size_id: u64, name: &str) -> Option<NamedFit> {
        self.position(user_id, size_id, name.trim())
            .map(|index| self.fits[index].clone())
    }

    fn fit_names(&self, user_id: u64, size_id: u64) -> Vec<String> {
        self.fits
            .iter()
            .filter(|fit| fit.user_id == user_id && fit.size_id == size_id)
            .map(|fit| fit.name.clone())
            .collect()
    }

    fn delete_fit(&mut self, user_id: u64, size_id: u64, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        let index = self
            .position(user_id, size_id, name)
            .ok_or_else(|| StoreError::UnknownFit {
                user_id,
                size_id,
                name: name.to_owned(),
            })?;
        self.fits.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::expand;
    use crate::records::RawMeasurements;

    fn fit(seat_height: f64) -> FitResult {
        FitResult {
            seat_height,
            stem_height: 50.0,
            saddle_offset: 25.0,
            torso_angle: 34.0,
            shifter_angle: 30.0,
        }
    }

    fn profile(hip: f64) -> AnthropometryProfile {
        expand(&RawMeasurements {
            height: 1750.0,
            foot_length: 270.0,
            hip,
            lower_leg: 440.0,
            torso_max: 550.0,
            upperarm: 320.0,
            forearm: 270.0,
        })
    }

    #[test]
    fn latest_anthropometry_wins() {
        let mut store = MemoryAnthropometryStore::new();
        assert!(store.latest_anthropometry(1).is_none());
        store.add_anthropometry(1, profile(440.0));
        store.add_anthropometry(1, profile(450.0));
        store.add_anthropometry(2, profile(400.0));
        assert_eq!(store.latest_anthropometry(1).map(|p| p.hip), Some(450.0));
        assert_eq!(store.latest_anthropometry(2).map(|p| p.hip), Some(400.0));
    }

    #[test]
    fn fits_are_scoped_to_user_and_size() {
        let mut store = MemoryFitSettingsStore::new();
        store.save_fit(1, 10, "road", fit(750.0)).expect("saved");
        store.save_fit(1, 11, "road", fit(740.0)).expect("saved");
        store.save_fit(2, 10, "road", fit(700.0)).expect("saved");

        assert_eq!(store.fit_names(1, 10), vec!["road".to_owned()]);
        assert_eq!(
            store.fit_by_name(1, 11, "road").map(|f| f.fit.seat_height),
            Some(740.0)
        );
        assert_eq!(
            store.fit_by_name(2, 10, "road").map(|f| f.fit.seat_height),
            Some(700.0)
        );
    }

    #[test]
    fn saving_same_name_replaces_fit() {
        let mut store = MemoryFitSettingsStore::new();
        store.save_fit(1, 10, " climb ", fit(750.0)).expect("saved");
        let named = store.save_fit(1, 10, "climb", fit(755.0)).expect("saved");
        assert_eq!(named.name, "climb");
        assert_eq!(store.fit_names(1, 10).len(), 1);
        assert_eq!(
            store.fit_by_name(1, 10, "climb").map(|f| f.fit.seat_height),
            Some(755.0)
        );
    }

    #[test]
    fn blank_names_and_unknown_fits_are_rejected() {
        let mut store = MemoryFitSettingsStore::new();
        assert_eq!(
            store.save_fit(1, 10, "   ", fit(750.0)),
            Err(StoreError::EmptyFitName)
        );
        assert_eq!(
            store.delete_fit(1, 10, "missing"),
            Err(StoreError::UnknownFit {
                user_id: 1,
                size_id: 10,
                name: "missing".to_owned(),
            })
        );
    }

    #[test]
    fn geometry_ids_are_sequential() {
        let mut store = MemoryGeometryStore::new();
        assert!(store.is_empty());
        let geometry = FrameGeometry {
            seat_angle: 73.0,
            head_angle: 71.0,
            crank_len: 170.0,
            max_stem_height: 50.0,
            reach: 390.0,
            stem_len: 100.0,
            bar_reach: 75.0,
            shifter_reach: 75.0,
            stack: 550.0,
            stem_angle: 0.0,
            saddle_rail_len: 50.0,
        };
        let first = store.add_bike_size(geometry);
        let second = store.add_bike_size(geometry);
        assert_eq!((first, second), (1, 2));
        assert_eq!(store.len(), 2);
        assert_eq!(store.bike_geometry(first), Some(geometry));
        assert!(store.bike_geometry(3).is_none());
    }
}
