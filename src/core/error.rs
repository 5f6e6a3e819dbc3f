use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("monthly expenses must be greater than 0, got {0}")]
    NonPositiveExpenses(f64),
    #[error("{asset} cannot be negative, got {value}")]
    NegativeHolding { asset: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteInput { field: &'static str },
    #[error("investment allocation is undefined when stocks, crypto and bonds total 0")]
    DegenerateRatio,
    #[error("unknown crash scenario: {0}")]
    UnknownScenario(String),
}
