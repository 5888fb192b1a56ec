//! Loading of constants tables from JSON files.
//!
//! A file may hold a bare solver table or an object with `solver` and
//! `intake` sections. Omitted keys keep their default values.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::constants::{FitConstants, IntakeRatios};
use crate::errors::ConfigError;

/// Environment variable naming a constants file.
pub const CONSTANTS_ENV: &str = "BIKEFIT_CONSTANTS";

/// Both constants tables.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelConfig {
    /// Solver constants.
    pub solver: FitConstants,
    /// Intake ratios.
    pub intake: IntakeRatios,
}

/// Sectioned layout of a constants file.
#[derive(Deserialize)]
struct Sections {
    /// Solver section.
    #[serde(default)]
    solver: Option<FitConstants>,
    /// Intake section.
    #[serde(default)]
    intake: Option<IntakeRatios>,
}

/// Parse a constants table from JSON text.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when the text is not a JSON object of numbers.
pub fn parse_config(text: &str) -> Result<ModelConfig, serde_json::Error> {
    let sections: Sections = serde_json::from_str(text)?;
    if sections.solver.is_none() && sections.intake.is_none() {
        // No section keys, so the object is a bare solver table.
        return Ok(ModelConfig {
            solver: serde_json::from_str(text)?,
            intake: IntakeRatios::DEFAULT,
        });
    }
    Ok(ModelConfig {
        solver: sections.solver.unwrap_or_default(),
        intake: sections.intake.unwrap_or_default(),
    })
}

/// Load a constants table from a file.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or decoded.
pub fn load_config(path: &Path) -> Result<ModelConfig, ConfigError> {
    let shown = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: shown.clone(),
        source,
    })?;
    let config = parse_config(&text).map_err(|source| ConfigError::Parse {
        path: shown.clone(),
        source,
    })?;
    debug!(path = %shown, "loaded constants");
    Ok(config)
}

/// Resolve the constants table from an explicit path, then [`CONSTANTS_ENV`],
/// then the defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] when a named file cannot be read or decoded.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ModelConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match env::var_os(CONSTANTS_ENV) {
        Some(path) if !path.is_empty() => load_config(Path::new(&path)),
        _ => Ok(ModelConfig::default()),
    }
}
