use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TableError;
use crate::feedstock::FeedstockCategory;

/// Allowed drift between a triple's binary sum and 1.0.
/// Decimal literals such as 0.6 + 0.3 + 0.1 land one ulp short.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Oil / char / gas split of the input mass.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldDistribution {
    pub oil: f64,
    pub char: f64,
    pub gas: f64,
}

impl YieldDistribution {
    pub const fn new(oil: f64, char: f64, gas: f64) -> Self {
        YieldDistribution { oil, char, gas }
    }

    pub fn total(&self) -> f64 {
        self.oil + self.char + self.gas
    }

    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= NORMALIZATION_TOLERANCE
    }

    fn components_valid(&self) -> bool {
        [self.oil, self.char, self.gas]
            .iter()
            .all(|f| f.is_finite() && *f >= 0.0)
    }
}

/// Upper edge of a temperature regime, in °C.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperBound {
    /// Admits `t < x`.
    Below(f64),
    /// Admits `t <= x`.
    AtMost(f64),
    /// Admits every temperature; closes the table.
    Unbounded,
}

impl UpperBound {
    pub fn admits(&self, temperature_c: f64) -> bool {
        match *self {
            UpperBound::Below(x) => temperature_c < x,
            UpperBound::AtMost(x) => temperature_c <= x,
            UpperBound::Unbounded => true,
        }
    }

    /// Position on the temperature axis; `Below(x)` sits just before `AtMost(x)`.
    fn edge(&self) -> Option<(f64, u8)> {
        match *self {
            UpperBound::Below(x) => Some((x, 0)),
            UpperBound::AtMost(x) => Some((x, 1)),
            UpperBound::Unbounded => None,
        }
    }
}

/// One regime: everything under `upper` not claimed by an earlier rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeRule {
    pub name: String,
    pub upper: UpperBound,
    #[serde(rename = "yields")]
    pub distribution: YieldDistribution,
}

impl RegimeRule {
    pub fn new(
        name: impl Into<String>,
        upper: UpperBound,
        distribution: YieldDistribution,
    ) -> Self {
        RegimeRule {
            name: name.into(),
            upper,
            distribution,
        }
    }
}

/// Ordered rules partitioning the whole temperature axis for one feedstock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RegimeRule>", into = "Vec<RegimeRule>")]
pub struct RegimeTable {
    rules: Vec<RegimeRule>,
}

impl RegimeTable {
    /// Validates that the rules form a gap-free, non-overlapping partition
    /// with normalized yields.
    pub fn new(rules: Vec<RegimeRule>) -> Result<Self, TableError> {
        if rules.is_empty() {
            return Err(TableError::Empty);
        }

        let last = rules.len() - 1;
        let mut prev: Option<(f64, u8)> = None;
        for (index, rule) in rules.iter().enumerate() {
            if !rule.distribution.components_valid() {
                return Err(TableError::InvalidFraction { index });
            }
            if !rule.distribution.is_normalized() {
                return Err(TableError::NotNormalized {
                    index,
                    total: rule.distribution.total(),
                });
            }

            match rule.upper.edge() {
                None if index != last => return Err(TableError::UnboundedNotLast { index }),
                None => {}
                Some(_) if index == last => return Err(TableError::MissingUnboundedTail),
                Some((x, _)) if !x.is_finite() => return Err(TableError::NonFiniteBound { index }),
                Some(edge) => {
                    if let Some(p) = prev {
                        let increases = edge.0 > p.0 || (edge.0 == p.0 && edge.1 > p.1);
                        if !increases {
                            return Err(TableError::Unordered { index });
                        }
                    }
                    prev = Some(edge);
                }
            }
        }

        Ok(RegimeTable { rules })
    }

    pub fn rules(&self) -> &[RegimeRule] {
        &self.rules
    }

    /// Rule whose regime contains `temperature_c`.
    pub fn lookup(&self, temperature_c: f64) -> &RegimeRule {
        // Admission is monotone along the table, so the first admitting rule
        // is a partition point. The unbounded tail always admits.
        let idx = self
            .rules
            .partition_point(|r| !r.upper.admits(temperature_c))
            .min(self.rules.len() - 1);
        &self.rules[idx]
    }

    fn plastic_waste_default() -> Self {
        RegimeTable {
            rules: vec![
                RegimeRule::new(
                    "low",
                    UpperBound::Below(450.0),
                    YieldDistribution::new(0.60, 0.30, 0.10),
                ),
                RegimeRule::new(
                    "mid",
                    UpperBound::AtMost(600.0),
                    YieldDistribution::new(0.80, 0.10, 0.10),
                ),
                RegimeRule::new(
                    "high",
                    UpperBound::Unbounded,
                    YieldDistribution::new(0.40, 0.05, 0.55),
                ),
            ],
        }
    }

    fn biomass_default() -> Self {
        RegimeTable {
            rules: vec![
                RegimeRule::new(
                    "low",
                    UpperBound::Below(400.0),
                    YieldDistribution::new(0.30, 0.50, 0.20),
                ),
                RegimeRule::new(
                    "high",
                    UpperBound::Unbounded,
                    YieldDistribution::new(0.60, 0.20, 0.20),
                ),
            ],
        }
    }
}

impl TryFrom<Vec<RegimeRule>> for RegimeTable {
    type Error = TableError;

    fn try_from(rules: Vec<RegimeRule>) -> Result<Self, Self::Error> {
        RegimeTable::new(rules)
    }
}

impl From<RegimeTable> for Vec<RegimeRule> {
    fn from(table: RegimeTable) -> Self {
        table.rules
    }
}

/// One regime table per feedstock category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldTables {
    pub plastic_waste: RegimeTable,
    pub biomass: RegimeTable,
}

impl YieldTables {
    pub fn table(&self, feedstock: FeedstockCategory) -> &RegimeTable {
        match feedstock {
            FeedstockCategory::PlasticWaste => &self.plastic_waste,
            FeedstockCategory::Biomass => &self.biomass,
        }
    }
}

impl Default for YieldTables {
    fn default() -> Self {
        YieldTables {
            plastic_waste: RegimeTable::plastic_waste_default(),
            biomass: RegimeTable::biomass_default(),
        }
    }
}

/// Maps (feedstock, temperature) onto a yield regime.
pub trait YieldClassifier {
    /// Matched regime, including its name.
    fn regime(&self, feedstock: FeedstockCategory, temperature_c: f64) -> RegimeRule;

    fn classify(&self, feedstock: FeedstockCategory, temperature_c: f64) -> YieldDistribution {
        self.regime(feedstock, temperature_c).distribution
    }
}

/// Table-driven step-function yield model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YieldModel {
    tables: YieldTables,
}

impl YieldModel {
    pub fn new(tables: YieldTables) -> Self {
        YieldModel { tables }
    }

    pub fn tables(&self) -> &YieldTables {
        &self.tables
    }

    pub fn rule(&self, feedstock: FeedstockCategory, temperature_c: f64) -> &RegimeRule {
        let rule = self.tables.table(feedstock).lookup(temperature_c);
        trace!(%feedstock, temperature_c, regime = %rule.name, "regime resolved");
        rule
    }
}

impl YieldClassifier for YieldModel {
    fn regime(&self, feedstock: FeedstockCategory, temperature_c: f64) -> RegimeRule {
        self.rule(feedstock, temperature_c).clone()
    }

    fn classify(&self, feedstock: FeedstockCategory, temperature_c: f64) -> YieldDistribution {
        self.rule(feedstock, temperature_c).distribution
    }
}

pub(crate) fn default_model() -> &'static YieldModel {
    static MODEL: OnceLock<YieldModel> = OnceLock::new();
    MODEL.get_or_init(YieldModel::default)
}

/// Classify against the built-in tables.
pub fn classify(feedstock: FeedstockCategory, temperature_c: f64) -> YieldDistribution {
    default_model().classify(feedstock, temperature_c)
}
