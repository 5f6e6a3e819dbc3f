use std::fmt;

use crate::core::{
    ALL_CLEAR_MESSAGE, AllocationSlice, LIQUIDATION_RATES, MAX_TIMELINE_MONTHS, RESILIENCE_TIPS,
    SIMULATION_ASSUMPTIONS, StressReport, format_dollars,
};

/// Plain-text rendering of a [`StressReport`] for terminal output.
pub struct TextReport<'a>(pub &'a StressReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let result = &report.result;
        let snapshot = &report.snapshot;

        writeln!(f, "Crisis Impact: {}", report.scenario.name)?;
        writeln!(f)?;

        writeln!(f, "How your survival time is calculated")?;
        writeln!(
            f,
            "  Liquid assets = (Stocks x {:.0}%) + (Crypto x {:.0}%) + (Bonds x {:.0}%) + Cash",
            LIQUIDATION_RATES.stocks * 100.0,
            LIQUIDATION_RATES.crypto * 100.0,
            LIQUIDATION_RATES.bonds * 100.0,
        )?;
        writeln!(
            f,
            "                = ({} x {}) + ({} x {}) + ({} x {}) + {}",
            format_dollars(result.stocks_after),
            LIQUIDATION_RATES.stocks,
            format_dollars(result.crypto_after),
            LIQUIDATION_RATES.crypto,
            format_dollars(result.bonds_after),
            LIQUIDATION_RATES.bonds,
            format_dollars(snapshot.cash),
        )?;
        writeln!(f, "                = {}", format_dollars(result.liquid_assets))?;
        writeln!(
            f,
            "  Monthly expenses = {}",
            format_dollars(snapshot.monthly_expenses)
        )?;
        writeln!(
            f,
            "  Survival time = {} / {} = {:.1} months",
            format_dollars(result.liquid_assets),
            format_dollars(snapshot.monthly_expenses),
            result.months_survivable,
        )?;
        writeln!(f)?;

        writeln!(f, "Financial Resilience Rating: {}", report.badge.label())?;
        writeln!(f, "  {}", report.badge.description())?;
        writeln!(f)?;

        writeln!(f, "Asset Value Changes")?;
        for change in &report.asset_changes {
            writeln!(
                f,
                "  {:<7} {:>12} -> {:>12}",
                change.asset.label(),
                format_dollars(change.before),
                format_dollars(change.after),
            )?;
        }
        writeln!(
            f,
            "  {:<7} {:>12} -> {:>12}",
            "Total",
            format_dollars(result.total_before),
            format_dollars(result.total_after),
        )?;
        writeln!(f)?;

        writeln!(f, "Portfolio Composition (before -> after)")?;
        for (before, after) in report
            .composition_before
            .iter()
            .zip(&report.composition_after)
        {
            write_allocation_row(f, before, after)?;
        }
        writeln!(f)?;

        writeln!(f, "Funds Depletion Timeline")?;
        for point in &report.depletion_timeline.points {
            writeln!(
                f,
                "  month {:>3}: {:>12}",
                point.month,
                format_dollars(point.remaining)
            )?;
        }
        if report.depletion_timeline.truncated {
            writeln!(f, "  ... funds outlast {MAX_TIMELINE_MONTHS} months")?;
        }
        writeln!(f)?;

        writeln!(f, "Action Plan & Recommendations")?;
        if report.recommendations.is_empty() {
            writeln!(f, "  {ALL_CLEAR_MESSAGE}")?;
        }
        for rec in &report.recommendations {
            writeln!(f, "  - {rec}")?;
        }
        writeln!(f)?;

        writeln!(f, "Financial Resilience Tips")?;
        for tip in RESILIENCE_TIPS {
            writeln!(f, "  - {tip}")?;
        }
        writeln!(f)?;

        writeln!(f, "Simulation Assumptions")?;
        for assumption in SIMULATION_ASSUMPTIONS {
            writeln!(f, "  - {assumption}")?;
        }
        Ok(())
    }
}

fn write_allocation_row(
    f: &mut fmt::Formatter<'_>,
    before: &AllocationSlice,
    after: &AllocationSlice,
) -> fmt::Result {
    writeln!(
        f,
        "  {:<7} {:>5.1}% -> {:>5.1}%",
        before.asset.label(),
        before.percent,
        after.percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PortfolioSnapshot, Scenario, run_stress_test};

    fn render(snapshot: PortfolioSnapshot, scenario: Scenario) -> String {
        let report = run_stress_test(&snapshot, scenario).expect("valid snapshot");
        TextReport(&report).to_string()
    }

    #[test]
    fn renders_worked_example() {
        let text = render(
            PortfolioSnapshot {
                stocks: 10_000.0,
                crypto: 5_000.0,
                bonds: 7_000.0,
                cash: 3_000.0,
                monthly_expenses: 2_000.0,
            },
            Scenario::FinancialCrisis2008,
        );

        assert!(text.starts_with("Crisis Impact: 2008 Financial Crisis\n"));
        assert!(text.contains("(Stocks x 80%) + (Crypto x 70%) + (Bonds x 90%) + Cash"));
        assert!(text.contains("($5,000 x 0.8) + ($5,000 x 0.7) + ($7,350 x 0.9) + $3,000"));
        assert!(text.contains("$17,115 / $2,000 = 8.6 months"));
        assert!(text.contains("Financial Resilience Rating: Silver (6-11 months)"));
        assert!(text.contains("month   8:"));
        assert!(!text.contains("month   9:"));
        assert!(!text.contains("funds outlast"));
        assert!(text.contains(ALL_CLEAR_MESSAGE));
    }

    #[test]
    fn renders_tips_and_assumptions_last() {
        let text = render(
            PortfolioSnapshot {
                stocks: 10_000.0,
                crypto: 5_000.0,
                bonds: 7_000.0,
                cash: 3_000.0,
                monthly_expenses: 2_000.0,
            },
            Scenario::DotComBubble,
        );

        let tips_at = text.find("Financial Resilience Tips").expect("tips section");
        let assumptions_at = text
            .find("Simulation Assumptions")
            .expect("assumptions section");
        assert!(text.find("Action Plan & Recommendations").expect("plan section") < tips_at);
        assert!(tips_at < assumptions_at);
        assert!(text.contains("  - 3-6-1 Rule:"));
        assert!(text.contains("  - Expense Audit:"));
        assert!(text.contains("  - Stocks liquidate at 80% value, Crypto at 70%, Bonds at 90%"));
        assert!(text.ends_with("  - Does not account for inflation or taxes\n"));
    }

    #[test]
    fn long_runway_timeline_is_cut_short() {
        let text = render(
            PortfolioSnapshot {
                stocks: 0.0,
                crypto: 0.0,
                bonds: 0.0,
                cash: 1_000_000.0,
                monthly_expenses: 0.0001,
            },
            Scenario::GreatDepression,
        );

        assert!(text.contains("month 600:"));
        assert!(!text.contains("month 601:"));
        assert!(text.contains("  ... funds outlast 600 months"));
    }

    #[test]
    fn renders_recommendations_instead_of_all_clear() {
        let text = render(
            PortfolioSnapshot {
                stocks: 0.0,
                crypto: 10_000.0,
                bonds: 0.0,
                cash: 100.0,
                monthly_expenses: 3_000.0,
            },
            Scenario::CryptoWinter,
        );

        assert!(text.contains("Needs Improvement (<3 months)"));
        assert!(text.contains("  - Emergency Fund Boost: Aim to save $18,000"));
        assert!(text.contains("  - Diversify Investments: Your crypto allocation is 100%"));
        assert!(text.contains("  - Expense Warning:"));
        assert!(!text.contains(ALL_CLEAR_MESSAGE));
    }
}
