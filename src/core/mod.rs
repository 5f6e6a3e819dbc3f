mod advice;
mod badge;
mod engine;
mod error;
mod format;
mod scenarios;
mod types;

pub use advice::{
    ALL_CLEAR_MESSAGE, EMERGENCY_FUND_TARGET_MONTHS, MAX_CRYPTO_ALLOCATION_PERCENT,
    RESILIENCE_TIPS, Recommendation, SIMULATION_ASSUMPTIONS, crypto_allocation_percent, recommend,
};
pub use badge::{BadgeTier, classify};
pub use engine::{
    LIQUIDATION_RATES, LiquidationRates, MAX_TIMELINE_MONTHS, asset_changes, composition,
    depletion_timeline, liquidation_breakdown, run_stress_test, simulate, validate_snapshot,
};
pub use error::SimulationError;
pub use format::format_dollars;
pub use scenarios::{Scenario, scenario_by_name, scenario_table};
pub use types::{
    AllocationSlice, AssetChange, AssetClass, DepletionPoint, DepletionTimeline,
    LiquidationBreakdown, PortfolioSnapshot, ScenarioDefinition, SimulationResult, StressReport,
};
