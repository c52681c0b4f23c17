use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mass_balance::SimulationResult;
use crate::validation::SimulationInput;
use crate::yield_model::YieldDistribution;

/// Everything a front end needs to render one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub input: SimulationInput,
    /// Name of the temperature regime that supplied the yields.
    pub regime: String,
    pub distribution: YieldDistribution,
    pub result: SimulationResult,
}

impl SimulationReport {
    /// Oil, char and gas shares in percent.
    pub fn yield_percentages(&self) -> [f64; 3] {
        let d = &self.distribution;
        [d.oil * 100.0, d.char * 100.0, d.gas * 100.0]
    }

    pub fn csv_header() -> &'static str {
        concat!(
            "feedstock,temperature_c,initial_mass_kg,regime,",
            "oil_mass_kg,char_mass_kg,gas_mass_kg,co2_avoided_kg,net_profit_usd"
        )
    }

    pub fn to_csv_row(&self) -> String {
        let r = &self.result;
        format!(
            "{},{},{},{},{:.3},{:.3},{:.3},{:.3},{:.2}",
            self.input.feedstock().id(),
            self.input.temperature_c(),
            self.input.initial_mass_kg(),
            self.regime,
            r.oil_mass_kg,
            r.char_mass_kg,
            r.gas_mass_kg,
            r.co2_avoided_kg,
            r.net_profit_usd
        )
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        let [oil_pct, char_pct, gas_pct] = self.yield_percentages();
        writeln!(
            f,
            "{} at {:.1} °C, {:.1} kg feed (regime: {})",
            self.input.feedstock(),
            self.input.temperature_c(),
            self.input.initial_mass_kg(),
            self.regime
        )?;
        writeln!(f, "  Bio-Oil yield   {:>10.1} kg  ({:.0}%)", r.oil_mass_kg, oil_pct)?;
        writeln!(f, "  Bio-Char yield  {:>10.1} kg  ({:.0}%)", r.char_mass_kg, char_pct)?;
        writeln!(f, "  Syngas yield    {:>10.1} kg  ({:.0}%)", r.gas_mass_kg, gas_pct)?;
        writeln!(f, "  CO2 avoided     {:>10.1} kg", r.co2_avoided_kg)?;
        write!(f, "  Net profit      {:>10.2} USD", r.net_profit_usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedstock::FeedstockCategory;
    use crate::mass_balance::compute;

    fn mid_plastic_report() -> SimulationReport {
        let distribution = YieldDistribution::new(0.80, 0.10, 0.10);
        SimulationReport {
            input: SimulationInput::new(FeedstockCategory::PlasticWaste, 500.0, 100.0).unwrap(),
            regime: "mid".into(),
            distribution,
            result: compute(&distribution, 100.0),
        }
    }

    #[test]
    fn test_percentages() {
        let [oil, char, gas] = mid_plastic_report().yield_percentages();
        assert!((oil - 80.0).abs() < 1e-9);
        assert!((char - 10.0).abs() < 1e-9);
        assert!((gas - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_csv_row_matches_header() {
        let report = mid_plastic_report();
        let row = report.to_csv_row();
        assert_eq!(
            row.split(',').count(),
            SimulationReport::csv_header().split(',').count()
        );
        assert_eq!(row, "plastic_waste,500,100,mid,80.000,10.000,10.000,150.000,33.00");
    }

    #[test]
    fn test_text_summary_mentions_key_figures() {
        let text = mid_plastic_report().to_string();
        assert!(text.starts_with("Plastic Waste at 500.0 °C"));
        assert!(text.contains("(80%)"));
        assert!(text.contains("33.00 USD"));
        assert!(text.contains("150.0 kg"));
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(mid_plastic_report()).unwrap();
        assert_eq!(value["input"]["feedstock"], "plastic_waste");
        assert_eq!(value["regime"], "mid");
        assert_eq!(value["distribution"]["char"], 0.1);
    }

    #[test]
    fn test_report_json_reloads_through_input_guard() {
        let report = mid_plastic_report();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(serde_json::from_str::<SimulationReport>(&json).unwrap(), report);

        let tampered = json.replace("plastic_waste", "glass");
        assert!(serde_json::from_str::<SimulationReport>(&tampered).is_err());
    }
}
