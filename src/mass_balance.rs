use serde::{Deserialize, Serialize};

use crate::error::EconomicsError;
use crate::yield_model::YieldDistribution;

/// Unit prices and offsets applied to a mass balance.
/// Defaults are illustrative figures, not fitted market data.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EconomicsSection", into = "EconomicsSection")]
pub struct EconomicParameters {
    oil_price_usd_per_kg: f64,
    char_price_usd_per_kg: f64,
    processing_cost_usd_per_kg: f64,
    co2_offset_kg_per_kg: f64,
}

impl EconomicParameters {
    /// Rejects NaN and infinite coefficients; signs are not constrained.
    pub fn new(
        oil_price_usd_per_kg: f64,
        char_price_usd_per_kg: f64,
        processing_cost_usd_per_kg: f64,
        co2_offset_kg_per_kg: f64,
    ) -> Result<Self, EconomicsError> {
        for (field, value) in [
            ("oil_price_usd_per_kg", oil_price_usd_per_kg),
            ("char_price_usd_per_kg", char_price_usd_per_kg),
            ("processing_cost_usd_per_kg", processing_cost_usd_per_kg),
            ("co2_offset_kg_per_kg", co2_offset_kg_per_kg),
        ] {
            if !value.is_finite() {
                return Err(EconomicsError::NonFiniteCoefficient { field, value });
            }
        }
        Ok(EconomicParameters {
            oil_price_usd_per_kg,
            char_price_usd_per_kg,
            processing_cost_usd_per_kg,
            co2_offset_kg_per_kg,
        })
    }

    pub fn oil_price_usd_per_kg(&self) -> f64 {
        self.oil_price_usd_per_kg
    }

    pub fn char_price_usd_per_kg(&self) -> f64 {
        self.char_price_usd_per_kg
    }

    /// Charged per kg of feedstock, not per kg of product.
    pub fn processing_cost_usd_per_kg(&self) -> f64 {
        self.processing_cost_usd_per_kg
    }

    /// kg CO2 avoided per kg of feedstock diverted from disposal.
    pub fn co2_offset_kg_per_kg(&self) -> f64 {
        self.co2_offset_kg_per_kg
    }
}

impl Default for EconomicParameters {
    fn default() -> Self {
        EconomicParameters {
            oil_price_usd_per_kg: 0.5,
            char_price_usd_per_kg: 0.3,
            processing_cost_usd_per_kg: 0.1,
            co2_offset_kg_per_kg: 1.5,
        }
    }
}

/// On-disk shape of the economics section; omitted keys keep their defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EconomicsSection {
    oil_price_usd_per_kg: f64,
    char_price_usd_per_kg: f64,
    processing_cost_usd_per_kg: f64,
    co2_offset_kg_per_kg: f64,
}

impl Default for EconomicsSection {
    fn default() -> Self {
        EconomicParameters::default().into()
    }
}

impl TryFrom<EconomicsSection> for EconomicParameters {
    type Error = EconomicsError;

    fn try_from(s: EconomicsSection) -> Result<Self, Self::Error> {
        EconomicParameters::new(
            s.oil_price_usd_per_kg,
            s.char_price_usd_per_kg,
            s.processing_cost_usd_per_kg,
            s.co2_offset_kg_per_kg,
        )
    }
}

impl From<EconomicParameters> for EconomicsSection {
    fn from(p: EconomicParameters) -> Self {
        EconomicsSection {
            oil_price_usd_per_kg: p.oil_price_usd_per_kg,
            char_price_usd_per_kg: p.char_price_usd_per_kg,
            processing_cost_usd_per_kg: p.processing_cost_usd_per_kg,
            co2_offset_kg_per_kg: p.co2_offset_kg_per_kg,
        }
    }
}

/// Absolute outputs of one simulation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub oil_mass_kg: f64,
    pub char_mass_kg: f64,
    pub gas_mass_kg: f64,
    pub co2_avoided_kg: f64,
    /// May be negative.
    pub net_profit_usd: f64,
}

impl SimulationResult {
    pub fn total_product_mass_kg(&self) -> f64 {
        self.oil_mass_kg + self.char_mass_kg + self.gas_mass_kg
    }

    /// Gross revenue before processing cost, at the given prices.
    pub fn revenue_usd(&self, params: &EconomicParameters) -> f64 {
        self.oil_mass_kg * params.oil_price_usd_per_kg
            + self.char_mass_kg * params.char_price_usd_per_kg
    }
}

/// Linear mass balance: M_x = f_x * M_in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassBalanceCalculator {
    params: EconomicParameters,
}

impl MassBalanceCalculator {
    pub fn new(params: EconomicParameters) -> Self {
        MassBalanceCalculator { params }
    }

    pub fn params(&self) -> &EconomicParameters {
        &self.params
    }

    /// The mass is not re-checked here; a non-positive mass yields
    /// non-positive product masses rather than an error.
    pub fn compute(
        &self,
        distribution: &YieldDistribution,
        initial_mass_kg: f64,
    ) -> SimulationResult {
        let p = &self.params;
        let oil_mass_kg = initial_mass_kg * distribution.oil;
        let char_mass_kg = initial_mass_kg * distribution.char;
        let gas_mass_kg = initial_mass_kg * distribution.gas;

        // No revenue term for gas.
        let net_profit_usd = oil_mass_kg * p.oil_price_usd_per_kg
            + char_mass_kg * p.char_price_usd_per_kg
            - initial_mass_kg * p.processing_cost_usd_per_kg;

        SimulationResult {
            oil_mass_kg,
            char_mass_kg,
            gas_mass_kg,
            co2_avoided_kg: initial_mass_kg * p.co2_offset_kg_per_kg,
            net_profit_usd,
        }
    }
}

/// Mass balance with the default economic parameters.
pub fn compute(distribution: &YieldDistribution, initial_mass_kg: f64) -> SimulationResult {
    MassBalanceCalculator::default().compute(distribution, initial_mass_kg)
}
