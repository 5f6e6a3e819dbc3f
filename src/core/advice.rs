use std::fmt;

use super::error::SimulationError;
use super::format::format_dollars;
use super::types::{PortfolioSnapshot, SimulationResult};

pub const EMERGENCY_FUND_TARGET_MONTHS: f64 = 6.0;
pub const MAX_CRYPTO_ALLOCATION_PERCENT: f64 = 30.0;

/// Shown by callers when [`recommend`] returns nothing.
pub const ALL_CLEAR_MESSAGE: &str =
    "Your financial position looks strong! Maintain these good habits.";

/// Premises every simulation rests on.
pub const SIMULATION_ASSUMPTIONS: [&str; 4] = [
    "Stocks liquidate at 80% value, Crypto at 70%, Bonds at 90% during crisis",
    "No additional income during simulation period",
    "Monthly expenses remain constant",
    "Does not account for inflation or taxes",
];

/// General resilience guidance, independent of the simulated portfolio.
pub const RESILIENCE_TIPS: [&str; 4] = [
    "3-6-1 Rule: Maintain 3 months expenses in cash, 6 months in liquid assets, 1 year in investments",
    "Ladder CDs: Consider certificate of deposits for better interest on emergency funds",
    "Automatic Savings: Set up automatic transfers to build reserves effortlessly",
    "Expense Audit: Review subscriptions/services monthly to eliminate unnecessary costs",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation {
    EmergencyFundBoost {
        target: f64,
        shortfall: f64,
        current_months: f64,
    },
    Diversify {
        crypto_percent: f64,
    },
    ExpenseWarning,
}

impl Recommendation {
    pub fn kind(&self) -> &'static str {
        match self {
            Recommendation::EmergencyFundBoost { .. } => "emergency-fund-boost",
            Recommendation::Diversify { .. } => "diversify",
            Recommendation::ExpenseWarning => "expense-warning",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Recommendation::EmergencyFundBoost { .. } => "Emergency Fund Boost",
            Recommendation::Diversify { .. } => "Diversify Investments",
            Recommendation::ExpenseWarning => "Expense Warning",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.title())?;
        match self {
            Recommendation::EmergencyFundBoost {
                target,
                current_months,
                ..
            } => write!(
                f,
                "Aim to save {} ({EMERGENCY_FUND_TARGET_MONTHS:.0} months of expenses). \
                 Currently at {current_months:.1} months coverage.",
                format_dollars(*target)
            ),
            Recommendation::Diversify { crypto_percent } => write!(
                f,
                "Your crypto allocation is {crypto_percent:.0}% of investments. \
                 Consider rebalancing to reduce volatility risk."
            ),
            Recommendation::ExpenseWarning => f.write_str(
                "Your monthly expenses exceed your cash savings. \
                 Identify areas to reduce spending.",
            ),
        }
    }
}

/// Crypto as a percentage of stocks + crypto + bonds. Cash is not part of the
/// denominator.
pub fn crypto_allocation_percent(snapshot: &PortfolioSnapshot) -> Result<f64, SimulationError> {
    let invested = snapshot.investment_total();
    if invested <= 0.0 {
        return Err(SimulationError::DegenerateRatio);
    }
    Ok(snapshot.crypto / invested * 100.0)
}

/// Rule-based advice, ordered: emergency fund, diversification, expenses.
///
/// The diversification rule is skipped when nothing is invested, since the
/// crypto share has no meaning there.
pub fn recommend(snapshot: &PortfolioSnapshot, result: &SimulationResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if result.months_survivable < EMERGENCY_FUND_TARGET_MONTHS {
        let target = EMERGENCY_FUND_TARGET_MONTHS * snapshot.monthly_expenses;
        recommendations.push(Recommendation::EmergencyFundBoost {
            target,
            shortfall: (target - result.liquid_assets).max(0.0),
            current_months: result.months_survivable,
        });
    }

    if let Ok(crypto_percent) = crypto_allocation_percent(snapshot) {
        if crypto_percent > MAX_CRYPTO_ALLOCATION_PERCENT {
            recommendations.push(Recommendation::Diversify { crypto_percent });
        }
    }

    if snapshot.monthly_expenses > snapshot.cash {
        recommendations.push(Recommendation::ExpenseWarning);
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Scenario, simulate};

    fn snapshot(stocks: f64, crypto: f64, bonds: f64, cash: f64, expenses: f64) -> PortfolioSnapshot {
        PortfolioSnapshot {
            stocks,
            crypto,
            bonds,
            cash,
            monthly_expenses: expenses,
        }
    }

    fn advise(snapshot: &PortfolioSnapshot, scenario: Scenario) -> Vec<Recommendation> {
        let result = simulate(snapshot, scenario.definition()).expect("valid snapshot");
        recommend(snapshot, &result)
    }

    #[test]
    fn default_profile_needs_no_advice() {
        let snap = snapshot(10_000.0, 5_000.0, 7_000.0, 3_000.0, 2_000.0);
        assert!(advise(&snap, Scenario::FinancialCrisis2008).is_empty());
    }

    #[test]
    fn all_rules_fire_in_fixed_order() {
        let snap = snapshot(1_000.0, 4_000.0, 0.0, 500.0, 1_500.0);
        let recs = advise(&snap, Scenario::CryptoWinter);
        let kinds: Vec<&str> = recs.iter().map(Recommendation::kind).collect();
        assert_eq!(
            kinds,
            vec!["emergency-fund-boost", "diversify", "expense-warning"]
        );
    }

    #[test]
    fn emergency_fund_message_quotes_six_month_target() {
        let snap = snapshot(0.0, 0.0, 0.0, 4_000.0, 2_000.0);
        let recs = advise(&snap, Scenario::Covid19Crash);
        assert_eq!(recs.len(), 1);
        match recs[0] {
            Recommendation::EmergencyFundBoost {
                target,
                shortfall,
                current_months,
            } => {
                assert_eq!(target, 12_000.0);
                assert_eq!(shortfall, 8_000.0);
                assert_eq!(current_months, 2.0);
            }
            other => panic!("unexpected recommendation {other:?}"),
        }
        assert_eq!(
            recs[0].to_string(),
            "Emergency Fund Boost: Aim to save $12,000 (6 months of expenses). \
             Currently at 2.0 months coverage."
        );
    }

    #[test]
    fn diversification_uses_investments_only() {
        // 3k crypto of 9k invested is 33%; counting cash would drop it below 30%.
        let snap = snapshot(6_000.0, 3_000.0, 0.0, 50_000.0, 1_000.0);
        let recs = advise(&snap, Scenario::FinancialCrisis2008);
        assert_eq!(recs.len(), 1);
        assert_eq!(
            recs[0].to_string(),
            "Diversify Investments: Your crypto allocation is 33% of investments. \
             Consider rebalancing to reduce volatility risk."
        );
    }

    #[test]
    fn exactly_thirty_percent_crypto_is_not_flagged() {
        let snap = snapshot(7_000.0, 3_000.0, 0.0, 50_000.0, 1_000.0);
        assert!(advise(&snap, Scenario::FinancialCrisis2008).is_empty());
    }

    #[test]
    fn zero_investments_skip_diversification_rule() {
        let snap = snapshot(0.0, 0.0, 0.0, 100_000.0, 1_000.0);
        assert_eq!(
            crypto_allocation_percent(&snap),
            Err(SimulationError::DegenerateRatio)
        );
        assert!(advise(&snap, Scenario::GreatDepression).is_empty());
    }

    #[test]
    fn expenses_above_cash_warn() {
        let snap = snapshot(100_000.0, 0.0, 0.0, 999.0, 1_000.0);
        let recs = advise(&snap, Scenario::DotComBubble);
        assert_eq!(recs, vec![Recommendation::ExpenseWarning]);
    }

    #[test]
    fn stated_liquidation_assumption_matches_rates() {
        let rates = crate::core::LIQUIDATION_RATES;
        let expected = format!(
            "Stocks liquidate at {:.0}% value, Crypto at {:.0}%, Bonds at {:.0}% during crisis",
            rates.stocks * 100.0,
            rates.crypto * 100.0,
            rates.bonds * 100.0
        );
        assert_eq!(SIMULATION_ASSUMPTIONS[0], expected);
    }

    #[test]
    fn expenses_equal_to_cash_do_not_warn() {
        let snap = snapshot(100_000.0, 0.0, 0.0, 1_000.0, 1_000.0);
        assert!(advise(&snap, Scenario::DotComBubble).is_empty());
    }
}
