use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SimulationError;
use crate::feedstock::FeedstockCategory;

/// Untyped request as handed over by a form or API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSimulationInput {
    pub feedstock: String,
    pub temperature_c: f64,
    pub initial_mass_kg: f64,
}

/// Checked request: known feedstock, finite numbers.
/// Only obtainable through [`SimulationInput::new`] or the guard, including
/// when deserialized.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationInput")]
pub struct SimulationInput {
    feedstock: FeedstockCategory,
    temperature_c: f64,
    initial_mass_kg: f64,
}

impl SimulationInput {
    pub fn new(
        feedstock: FeedstockCategory,
        temperature_c: f64,
        initial_mass_kg: f64,
    ) -> Result<Self, SimulationError> {
        InputGuard::require_finite("temperature_c", temperature_c)?;
        InputGuard::require_finite("initial_mass_kg", initial_mass_kg)?;
        if initial_mass_kg <= 0.0 {
            // Accepted: mass sign is the caller's contract.
            warn!(initial_mass_kg, "non-positive feedstock mass");
        }
        Ok(SimulationInput {
            feedstock,
            temperature_c,
            initial_mass_kg,
        })
    }

    pub fn feedstock(&self) -> FeedstockCategory {
        self.feedstock
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn initial_mass_kg(&self) -> f64 {
        self.initial_mass_kg
    }
}

impl TryFrom<RawSimulationInput> for SimulationInput {
    type Error = SimulationError;

    fn try_from(raw: RawSimulationInput) -> Result<Self, Self::Error> {
        InputGuard::validate(&raw)
    }
}

/// Boundary checks between the presentation layer and the engine.
pub struct InputGuard;

impl InputGuard {
    pub fn validate(raw: &RawSimulationInput) -> Result<SimulationInput, SimulationError> {
        let feedstock: FeedstockCategory = raw.feedstock.parse()?;
        SimulationInput::new(feedstock, raw.temperature_c, raw.initial_mass_kg)
    }

    pub fn require_finite(field: &'static str, value: f64) -> Result<(), SimulationError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(SimulationError::NonFiniteInput { field, value })
        }
    }
}
