use tracing::debug;

use crate::error::SimulationError;
use crate::mass_balance::{EconomicParameters, MassBalanceCalculator};
use crate::report::SimulationReport;
use crate::validation::{InputGuard, RawSimulationInput, SimulationInput};
use crate::yield_model::{YieldClassifier, YieldModel, YieldTables};

/// Shared engine composing the yield classifier with the mass balance.
/// Every front end goes through this one type.
#[derive(Debug, Clone)]
pub struct PyrolysisEngine<C = YieldModel> {
    classifier: C,
    calculator: MassBalanceCalculator,
}

impl PyrolysisEngine<YieldModel> {
    /// Engine over the built-in tables and default prices.
    pub fn new() -> Self {
        PyrolysisEngine::from_parts(YieldModel::default(), MassBalanceCalculator::default())
    }

    pub fn with_tables(tables: YieldTables, params: EconomicParameters) -> Self {
        PyrolysisEngine::from_parts(YieldModel::new(tables), MassBalanceCalculator::new(params))
    }
}

impl Default for PyrolysisEngine<YieldModel> {
    fn default() -> Self {
        PyrolysisEngine::new()
    }
}

impl<C: YieldClassifier> PyrolysisEngine<C> {
    pub fn from_parts(classifier: C, calculator: MassBalanceCalculator) -> Self {
        PyrolysisEngine {
            classifier,
            calculator,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn calculator(&self) -> &MassBalanceCalculator {
        &self.calculator
    }

    /// Classify, then balance. Infallible once the input is checked.
    pub fn simulate(&self, input: &SimulationInput) -> SimulationReport {
        let rule = self.classifier.regime(input.feedstock(), input.temperature_c());
        let result = self.calculator.compute(&rule.distribution, input.initial_mass_kg());

        debug!(
            feedstock = %input.feedstock(),
            temperature_c = input.temperature_c(),
            initial_mass_kg = input.initial_mass_kg(),
            regime = %rule.name,
            net_profit_usd = result.net_profit_usd,
            "simulation evaluated"
        );

        SimulationReport {
            input: *input,
            regime: rule.name,
            distribution: rule.distribution,
            result,
        }
    }

    /// Validate a raw request and simulate it.
    pub fn run(&self, raw: &RawSimulationInput) -> Result<SimulationReport, SimulationError> {
        let input = InputGuard::validate(raw)?;
        Ok(self.simulate(&input))
    }
}
