use serde::Serialize;

use super::advice::Recommendation;
use super::badge::BadgeTier;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stocks,
    Crypto,
    Bonds,
    Cash,
}

impl AssetClass {
    pub fn label(self) -> &'static str {
        match self {
            AssetClass::Stocks => "Stocks",
            AssetClass::Crypto => "Crypto",
            AssetClass::Bonds => "Bonds",
            AssetClass::Cash => "Cash",
        }
    }
}

/// Holdings and spending captured for a single stress-test request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioSnapshot {
    pub stocks: f64,
    pub crypto: f64,
    pub bonds: f64,
    pub cash: f64,
    pub monthly_expenses: f64,
}

impl PortfolioSnapshot {
    pub fn investment_total(&self) -> f64 {
        self.stocks + self.crypto + self.bonds
    }

    pub fn total(&self) -> f64 {
        self.investment_total() + self.cash
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDefinition {
    pub name: &'static str,
    pub stocks_pct: f64,
    pub crypto_pct: f64,
    pub bonds_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub months_survivable: f64,
    pub liquid_assets: f64,
    pub stocks_after: f64,
    pub crypto_after: f64,
    pub bonds_after: f64,
    pub total_before: f64,
    pub total_after: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidationBreakdown {
    pub stocks: f64,
    pub crypto: f64,
    pub bonds: f64,
    pub cash: f64,
}

impl LiquidationBreakdown {
    pub fn total(&self) -> f64 {
        self.stocks + self.crypto + self.bonds + self.cash
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetChange {
    pub asset: AssetClass,
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub asset: AssetClass,
    pub value: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionPoint {
    pub month: u32,
    pub remaining: f64,
}

/// Month-by-month runway. `truncated` is set when funds outlast the
/// longest horizon that is charted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionTimeline {
    pub points: Vec<DepletionPoint>,
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct StressReport {
    pub scenario: &'static ScenarioDefinition,
    pub snapshot: PortfolioSnapshot,
    pub result: SimulationResult,
    pub badge: BadgeTier,
    pub recommendations: Vec<Recommendation>,
    pub breakdown: LiquidationBreakdown,
    pub asset_changes: Vec<AssetChange>,
    pub composition_before: Vec<AllocationSlice>,
    pub composition_after: Vec<AllocationSlice>,
    pub depletion_timeline: DepletionTimeline,
}
