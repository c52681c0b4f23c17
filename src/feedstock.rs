use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Waste material fed into the reactor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedstockCategory {
    PlasticWaste,
    Biomass,
}

impl FeedstockCategory {
    pub const ALL: [FeedstockCategory; 2] =
        [FeedstockCategory::PlasticWaste, FeedstockCategory::Biomass];

    /// Machine identifier, matching the serde name.
    pub fn id(&self) -> &'static str {
        match self {
            FeedstockCategory::PlasticWaste => "plastic_waste",
            FeedstockCategory::Biomass => "biomass",
        }
    }

    /// Label used by operator-facing forms.
    pub fn label(&self) -> &'static str {
        match self {
            FeedstockCategory::PlasticWaste => "Plastic Waste",
            FeedstockCategory::Biomass => "Biomass / Wood",
        }
    }
}

impl fmt::Display for FeedstockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeedstockCategory {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Collapse separators so "Plastic Waste", "plastic-waste" and
        // "plastic_waste" all meet the same key.
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(*c, ' ' | '_' | '-' | '/'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "plasticwaste" | "plastic" => Ok(FeedstockCategory::PlasticWaste),
            "biomass" | "biomasswood" | "wood" => Ok(FeedstockCategory::Biomass),
            _ => Err(SimulationError::InvalidCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_form_labels_and_identifiers() {
        for s in ["Plastic Waste", "plastic_waste", "plastic-waste", "PLASTIC"] {
            assert_eq!(s.parse::<FeedstockCategory>(), Ok(FeedstockCategory::PlasticWaste));
        }
        for s in ["Biomass / Wood", "biomass", "wood", "  Biomass  "] {
            assert_eq!(s.parse::<FeedstockCategory>(), Ok(FeedstockCategory::Biomass));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for f in FeedstockCategory::ALL {
            assert_eq!(f.to_string().parse::<FeedstockCategory>(), Ok(f));
            assert_eq!(f.id().parse::<FeedstockCategory>(), Ok(f));
        }
    }

    #[test]
    fn test_unknown_label_is_rejected_not_defaulted() {
        let err = "tyres".parse::<FeedstockCategory>().unwrap_err();
        assert_eq!(err, SimulationError::InvalidCategory("tyres".into()));
        assert!("".parse::<FeedstockCategory>().is_err());
    }
}
