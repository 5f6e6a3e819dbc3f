use super::advice::recommend;
use super::badge::classify;
use super::error::SimulationError;
use super::types::{
    AllocationSlice, AssetChange, AssetClass, DepletionPoint, DepletionTimeline,
    LiquidationBreakdown, PortfolioSnapshot, ScenarioDefinition, SimulationResult, StressReport,
};
use super::Scenario;

/// Share of post-crash value recovered when forced to sell during a crisis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidationRates {
    pub stocks: f64,
    pub crypto: f64,
    pub bonds: f64,
    pub cash: f64,
}

/// Longest runway charted by [`depletion_timeline`], 50 years.
pub const MAX_TIMELINE_MONTHS: u32 = 600;

pub const LIQUIDATION_RATES: LiquidationRates = LiquidationRates {
    stocks: 0.8,
    crypto: 0.7,
    bonds: 0.9,
    cash: 1.0,
};

pub fn validate_snapshot(snapshot: &PortfolioSnapshot) -> Result<(), SimulationError> {
    let fields = [
        ("stocks", snapshot.stocks),
        ("crypto", snapshot.crypto),
        ("bonds", snapshot.bonds),
        ("cash", snapshot.cash),
        ("monthly expenses", snapshot.monthly_expenses),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(SimulationError::NonFiniteInput { field });
        }
    }

    if snapshot.monthly_expenses <= 0.0 {
        return Err(SimulationError::NonPositiveExpenses(
            snapshot.monthly_expenses,
        ));
    }

    for &(asset, value) in &fields[..4] {
        if value < 0.0 {
            return Err(SimulationError::NegativeHolding { asset, value });
        }
    }

    Ok(())
}

fn shocked(value: f64, pct: f64) -> f64 {
    value * (1.0 + pct / 100.0)
}

pub fn simulate(
    snapshot: &PortfolioSnapshot,
    scenario: &ScenarioDefinition,
) -> Result<SimulationResult, SimulationError> {
    validate_snapshot(snapshot)?;

    let stocks_after = shocked(snapshot.stocks, scenario.stocks_pct);
    let crypto_after = shocked(snapshot.crypto, scenario.crypto_pct);
    let bonds_after = shocked(snapshot.bonds, scenario.bonds_pct);

    let liquid_assets = stocks_after * LIQUIDATION_RATES.stocks
        + crypto_after * LIQUIDATION_RATES.crypto
        + bonds_after * LIQUIDATION_RATES.bonds
        + snapshot.cash * LIQUIDATION_RATES.cash;

    if !liquid_assets.is_finite() {
        return Err(SimulationError::NonFiniteInput {
            field: "liquid assets",
        });
    }
    let months_survivable = liquid_assets / snapshot.monthly_expenses;
    if !months_survivable.is_finite() {
        return Err(SimulationError::NonFiniteInput {
            field: "months survivable",
        });
    }

    Ok(SimulationResult {
        months_survivable,
        liquid_assets,
        stocks_after,
        crypto_after,
        bonds_after,
        total_before: snapshot.total(),
        total_after: stocks_after + crypto_after + bonds_after + snapshot.cash,
    })
}

pub fn liquidation_breakdown(
    snapshot: &PortfolioSnapshot,
    result: &SimulationResult,
) -> LiquidationBreakdown {
    LiquidationBreakdown {
        stocks: result.stocks_after * LIQUIDATION_RATES.stocks,
        crypto: result.crypto_after * LIQUIDATION_RATES.crypto,
        bonds: result.bonds_after * LIQUIDATION_RATES.bonds,
        cash: snapshot.cash * LIQUIDATION_RATES.cash,
    }
}

/// Before/after values of the shocked asset classes. Cash is never shocked
/// and is left out.
pub fn asset_changes(snapshot: &PortfolioSnapshot, result: &SimulationResult) -> Vec<AssetChange> {
    vec![
        AssetChange {
            asset: AssetClass::Stocks,
            before: snapshot.stocks,
            after: result.stocks_after,
        },
        AssetChange {
            asset: AssetClass::Crypto,
            before: snapshot.crypto,
            after: result.crypto_after,
        },
        AssetChange {
            asset: AssetClass::Bonds,
            before: snapshot.bonds,
            after: result.bonds_after,
        },
    ]
}

/// Percentage split of `[stocks, crypto, bonds, cash]`. All shares are 0 when
/// the holdings sum to 0.
pub fn composition(values: [f64; 4]) -> Vec<AllocationSlice> {
    let total: f64 = values.iter().sum();
    let assets = [
        AssetClass::Stocks,
        AssetClass::Crypto,
        AssetClass::Bonds,
        AssetClass::Cash,
    ];

    assets
        .into_iter()
        .zip(values)
        .map(|(asset, value)| AllocationSlice {
            asset,
            value,
            percent: if total > 0.0 {
                value / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Remaining liquid funds at the start of each whole month until they run
/// out, assuming no income and constant expenses. Stops after
/// [`MAX_TIMELINE_MONTHS`] and marks the timeline truncated.
pub fn depletion_timeline(result: &SimulationResult, monthly_expenses: f64) -> DepletionTimeline {
    let runway = result.months_survivable.max(0.0).floor();
    let truncated = runway > f64::from(MAX_TIMELINE_MONTHS);
    let last_month = if truncated {
        MAX_TIMELINE_MONTHS
    } else {
        runway as u32
    };

    let points = (0..=last_month)
        .map(|month| DepletionPoint {
            month,
            remaining: (result.liquid_assets - f64::from(month) * monthly_expenses).max(0.0),
        })
        .collect();

    DepletionTimeline { points, truncated }
}

pub fn run_stress_test(
    snapshot: &PortfolioSnapshot,
    scenario: Scenario,
) -> Result<StressReport, SimulationError> {
    let definition = scenario.definition();
    let result = simulate(snapshot, definition)?;

    Ok(StressReport {
        scenario: definition,
        snapshot: *snapshot,
        result,
        badge: classify(result.months_survivable),
        recommendations: recommend(snapshot, &result),
        breakdown: liquidation_breakdown(snapshot, &result),
        asset_changes: asset_changes(snapshot, &result),
        composition_before: composition([
            snapshot.stocks,
            snapshot.crypto,
            snapshot.bonds,
            snapshot.cash,
        ]),
        composition_after: composition([
            result.stocks_after,
            result.crypto_after,
            result.bonds_after,
            snapshot.cash,
        ]),
        depletion_timeline: depletion_timeline(&result, snapshot.monthly_expenses),
    })
}
