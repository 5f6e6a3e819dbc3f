use super::error::SimulationError;
use super::types::ScenarioDefinition;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Scenario {
    FinancialCrisis2008,
    Covid19Crash,
    DotComBubble,
    GreatDepression,
    CryptoWinter,
}

static SCENARIO_TABLE: [ScenarioDefinition; 5] = [
    ScenarioDefinition {
        name: "2008 Financial Crisis",
        stocks_pct: -50.0,
        crypto_pct: 0.0,
        bonds_pct: 5.0,
    },
    ScenarioDefinition {
        name: "COVID-19 Crash",
        stocks_pct: -30.0,
        crypto_pct: -40.0,
        bonds_pct: 10.0,
    },
    ScenarioDefinition {
        name: "Dot-com Bubble",
        stocks_pct: -40.0,
        crypto_pct: 0.0,
        bonds_pct: 7.0,
    },
    ScenarioDefinition {
        name: "Great Depression",
        stocks_pct: -90.0,
        crypto_pct: 0.0,
        bonds_pct: -10.0,
    },
    ScenarioDefinition {
        name: "Crypto Winter",
        stocks_pct: 0.0,
        crypto_pct: -80.0,
        bonds_pct: 0.0,
    },
];

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::FinancialCrisis2008,
        Scenario::Covid19Crash,
        Scenario::DotComBubble,
        Scenario::GreatDepression,
        Scenario::CryptoWinter,
    ];

    pub fn definition(self) -> &'static ScenarioDefinition {
        let index = match self {
            Scenario::FinancialCrisis2008 => 0,
            Scenario::Covid19Crash => 1,
            Scenario::DotComBubble => 2,
            Scenario::GreatDepression => 3,
            Scenario::CryptoWinter => 4,
        };
        &SCENARIO_TABLE[index]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }
}

/// Resolves a scenario by its display name, e.g. `"Crypto Winter"`.
pub fn scenario_by_name(name: &str) -> Result<Scenario, SimulationError> {
    Scenario::ALL
        .into_iter()
        .find(|scenario| scenario.name() == name)
        .ok_or_else(|| SimulationError::UnknownScenario(name.to_string()))
}

pub fn scenario_table() -> &'static [ScenarioDefinition] {
    &SCENARIO_TABLE
}
