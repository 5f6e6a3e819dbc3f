mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    ALL_CLEAR_MESSAGE, AllocationSlice, AssetChange, BadgeTier, DepletionTimeline,
    LiquidationBreakdown, PortfolioSnapshot, RESILIENCE_TIPS, Recommendation,
    SIMULATION_ASSUMPTIONS, Scenario, ScenarioDefinition, SimulationError, SimulationResult,
    StressReport, run_stress_test, scenario_by_name, scenario_table, validate_snapshot,
};

pub use report::TextReport;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliScenario {
    #[value(name = "financial-crisis-2008", alias = "2008")]
    FinancialCrisis2008,
    #[value(name = "covid-19", alias = "covid")]
    Covid19Crash,
    #[value(name = "dot-com")]
    DotComBubble,
    GreatDepression,
    CryptoWinter,
}

impl From<CliScenario> for Scenario {
    fn from(value: CliScenario) -> Self {
        match value {
            CliScenario::FinancialCrisis2008 => Scenario::FinancialCrisis2008,
            CliScenario::Covid19Crash => Scenario::Covid19Crash,
            CliScenario::DotComBubble => Scenario::DotComBubble,
            CliScenario::GreatDepression => Scenario::GreatDepression,
            CliScenario::CryptoWinter => Scenario::CryptoWinter,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiScenario {
    #[serde(
        rename = "financial-crisis-2008",
        alias = "financialCrisis2008",
        alias = "financial_crisis_2008",
        alias = "2008"
    )]
    FinancialCrisis2008,
    #[serde(
        rename = "covid-19",
        alias = "covid19",
        alias = "covid_19",
        alias = "covid"
    )]
    Covid19Crash,
    #[serde(rename = "dot-com", alias = "dotCom", alias = "dot_com")]
    DotComBubble,
    #[serde(alias = "greatDepression", alias = "great_depression")]
    GreatDepression,
    #[serde(alias = "cryptoWinter", alias = "crypto_winter")]
    CryptoWinter,
}

impl From<ApiScenario> for CliScenario {
    fn from(value: ApiScenario) -> Self {
        match value {
            ApiScenario::FinancialCrisis2008 => CliScenario::FinancialCrisis2008,
            ApiScenario::Covid19Crash => CliScenario::Covid19Crash,
            ApiScenario::DotComBubble => CliScenario::DotComBubble,
            ApiScenario::GreatDepression => CliScenario::GreatDepression,
            ApiScenario::CryptoWinter => CliScenario::CryptoWinter,
        }
    }
}

impl From<Scenario> for CliScenario {
    fn from(value: Scenario) -> Self {
        match value {
            Scenario::FinancialCrisis2008 => CliScenario::FinancialCrisis2008,
            Scenario::Covid19Crash => CliScenario::Covid19Crash,
            Scenario::DotComBubble => CliScenario::DotComBubble,
            Scenario::GreatDepression => CliScenario::GreatDepression,
            Scenario::CryptoWinter => CliScenario::CryptoWinter,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    stocks: Option<f64>,
    crypto: Option<f64>,
    bonds: Option<f64>,
    cash: Option<f64>,
    monthly_expenses: Option<f64>,
    scenario: Option<ApiScenario>,
    /// Display name as listed by `/api/scenarios`, e.g. "Crypto Winter".
    scenario_name: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "meltdown",
    about = "Market crash stress test: how many months would your savings last?"
)]
struct Cli {
    #[arg(long, default_value_t = 10000.0, help = "Stocks holdings in dollars")]
    stocks: f64,
    #[arg(long, default_value_t = 5000.0, help = "Crypto holdings in dollars")]
    crypto: f64,
    #[arg(long, default_value_t = 7000.0, help = "Bond holdings in dollars")]
    bonds: f64,
    #[arg(long, default_value_t = 3000.0, help = "Cash savings in dollars")]
    cash: f64,
    #[arg(
        long,
        default_value_t = 2000.0,
        help = "Monthly expenses in dollars, must be > 0"
    )]
    monthly_expenses: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliScenario::FinancialCrisis2008,
        help = "Historical crash to replay"
    )]
    scenario: CliScenario,
    #[arg(long, help = "Print the report as JSON instead of text")]
    json: bool,
}

#[derive(Debug)]
struct StressRequest {
    snapshot: PortfolioSnapshot,
    scenario: Scenario,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeResponse {
    tier: BadgeTier,
    label: &'static str,
    description: &'static str,
    min_months: f64,
}

impl From<BadgeTier> for BadgeResponse {
    fn from(tier: BadgeTier) -> Self {
        BadgeResponse {
            tier,
            label: tier.label(),
            description: tier.description(),
            min_months: tier.min_months(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationResponse {
    kind: &'static str,
    title: &'static str,
    message: String,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(rec: &Recommendation) -> Self {
        RecommendationResponse {
            kind: rec.kind(),
            title: rec.title(),
            message: rec.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    scenario: &'static ScenarioDefinition,
    result: SimulationResult,
    badge: BadgeResponse,
    recommendations: Vec<RecommendationResponse>,
    all_clear_message: Option<&'static str>,
    liquidation_breakdown: LiquidationBreakdown,
    asset_changes: Vec<AssetChange>,
    composition_before: Vec<AllocationSlice>,
    composition_after: Vec<AllocationSlice>,
    depletion_timeline: DepletionTimeline,
    tips: &'static [&'static str],
    assumptions: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

const CLI_FIELDS: [&str; 5] = [
    "--stocks",
    "--crypto",
    "--bonds",
    "--cash",
    "--monthly-expenses",
];
const API_FIELDS: [&str; 5] = ["stocks", "crypto", "bonds", "cash", "monthlyExpenses"];

/// Rewrites a core validation error so it names the offending input the way
/// the caller supplied it: CLI flags or payload keys.
fn describe_input_error(err: &SimulationError, fields: [&str; 5]) -> String {
    let input_name = |core_name: &str| match core_name {
        "stocks" => fields[0].to_string(),
        "crypto" => fields[1].to_string(),
        "bonds" => fields[2].to_string(),
        "cash" => fields[3].to_string(),
        "monthly expenses" => fields[4].to_string(),
        other => other.to_string(),
    };

    match err {
        SimulationError::NonPositiveExpenses(_) => {
            format!("{} must be greater than 0", fields[4])
        }
        SimulationError::NegativeHolding { asset, .. } => {
            format!("{} cannot be negative", input_name(*asset))
        }
        SimulationError::NonFiniteInput { field } => {
            format!("{} must be a finite number", input_name(*field))
        }
        other => other.to_string(),
    }
}

fn build_request(cli: &Cli, fields: [&str; 5]) -> Result<StressRequest, String> {
    let snapshot = PortfolioSnapshot {
        stocks: cli.stocks,
        crypto: cli.crypto,
        bonds: cli.bonds,
        cash: cli.cash,
        monthly_expenses: cli.monthly_expenses,
    };
    validate_snapshot(&snapshot).map_err(|e| describe_input_error(&e, fields))?;

    Ok(StressRequest {
        snapshot,
        scenario: cli.scenario.into(),
    })
}

/// Parses process arguments and prints a single stress-test report to stdout.
pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let request = build_request(&cli, CLI_FIELDS)?;
    let report = run_stress_test(&request.snapshot, request.scenario)
        .map_err(|e| describe_input_error(&e, CLI_FIELDS))?;
    debug!(
        scenario = report.scenario.name,
        months = report.result.months_survivable,
        badge = ?report.badge,
        "stress test complete"
    );

    if cli.json {
        let json = serde_json::to_string_pretty(&build_simulate_response(&report))
            .map_err(|e| format!("failed to serialize report: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", TextReport(&report));
    }
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route("/api/scenarios", get(scenarios_handler))
        .route("/api/badges", get(badges_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("meltdown HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/scenarios");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn scenarios_handler() -> Response {
    json_response(StatusCode::OK, scenario_table())
}

async fn badges_handler() -> Response {
    let badges: Vec<BadgeResponse> = BadgeTier::ALL.into_iter().map(Into::into).collect();
    json_response(StatusCode::OK, badges)
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            warn!(error = %msg, "rejected simulate request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let report = match run_stress_test(&request.snapshot, request.scenario) {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, "simulation refused input");
            let msg = describe_input_error(&e, API_FIELDS);
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };
    debug!(
        scenario = report.scenario.name,
        months = report.result.months_survivable,
        badge = ?report.badge,
        recommendations = report.recommendations.len(),
        "simulate request served"
    );

    json_response(StatusCode::OK, build_simulate_response(&report))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<StressRequest, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: SimulatePayload) -> Result<StressRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.stocks {
        cli.stocks = v;
    }
    if let Some(v) = payload.crypto {
        cli.crypto = v;
    }
    if let Some(v) = payload.bonds {
        cli.bonds = v;
    }
    if let Some(v) = payload.cash {
        cli.cash = v;
    }
    if let Some(v) = payload.monthly_expenses {
        cli.monthly_expenses = v;
    }
    if let Some(v) = payload.scenario {
        cli.scenario = v.into();
    }
    if let Some(name) = payload.scenario_name {
        if payload.scenario.is_some() {
            return Err("set either scenario or scenarioName, not both".to_string());
        }
        cli.scenario = scenario_by_name(&name).map_err(|e| e.to_string())?.into();
    }

    build_request(&cli, API_FIELDS)
}

fn default_cli_for_api() -> Cli {
    Cli {
        stocks: 10_000.0,
        crypto: 5_000.0,
        bonds: 7_000.0,
        cash: 3_000.0,
        monthly_expenses: 2_000.0,
        scenario: CliScenario::FinancialCrisis2008,
        json: false,
    }
}

fn build_simulate_response(report: &StressReport) -> SimulateResponse {
    SimulateResponse {
        scenario: report.scenario,
        result: report.result,
        badge: report.badge.into(),
        recommendations: report.recommendations.iter().map(Into::into).collect(),
        all_clear_message: report
            .recommendations
            .is_empty()
            .then_some(ALL_CLEAR_MESSAGE),
        liquidation_breakdown: report.breakdown,
        asset_changes: report.asset_changes.clone(),
        composition_before: report.composition_before.clone(),
        composition_after: report.composition_after.clone(),
        depletion_timeline: report.depletion_timeline.clone(),
        tips: &RESILIENCE_TIPS,
        assumptions: &SIMULATION_ASSUMPTIONS,
    }
}
