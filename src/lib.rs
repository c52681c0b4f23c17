#![forbid(unsafe_code)]

//! Pyrolysis yield classification and mass balance.
//!
//! A feedstock and reactor temperature select a yield regime from an ordered
//! rule table; the regime's oil/char/gas split is then scaled by the input
//! mass to give product masses, CO2 avoided and net profit.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod feedstock;
pub mod mass_balance;
pub mod report;
pub mod validation;
pub mod yield_model;

pub use cache::MemoizedYieldModel;
pub use config::{ConfigError, EngineConfig};
pub use engine::PyrolysisEngine;
pub use error::{EconomicsError, SimulationError, TableError};
pub use feedstock::FeedstockCategory;
pub use mass_balance::{compute, EconomicParameters, MassBalanceCalculator, SimulationResult};
pub use report::SimulationReport;
pub use validation::{InputGuard, RawSimulationInput, SimulationInput};
pub use yield_model::{
    classify, RegimeRule, RegimeTable, UpperBound, YieldClassifier, YieldDistribution, YieldModel,
    YieldTables,
};
