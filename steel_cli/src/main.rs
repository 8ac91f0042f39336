//! # steel_cli
//!
//! Command-line driver for `steel_core`. Every subcommand reads a JSON
//! request file and prints a pretty JSON result on stdout. Errors are
//! printed as JSON on stderr with a non-zero exit code.
//!
//! ```text
//! steel_cli beam request.json
//! steel_cli --settings steel.json column column.json
//! RUST_LOG=steel_core=debug steel_cli check check.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use steel_core::calculations::{check_beam, BeamCheckInput};
use steel_core::loads::{derive_code_combinations, required_inertia_for_deflection, LoadCase};
use steel_core::selection::{
    design_beam,
    search_optimal_column,
    search_optimal_tension_member,
    BeamDesignRequest,
    ColumnSearchInput,
    TensionSearchInput,
};
use steel_core::{classify, CalcError, CalcResult, EngineSettings, SteelGrade};

#[derive(Parser)]
#[command(name = "steel_cli")]
#[command(about = "CSA S16-19 steel member classification, checks and section search", long_about = None)]
struct Cli {
    /// Engine settings file (JSON)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Debug-level logging for steel_core (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a catalog section
    Classify {
        /// Request file: {"designation": "W310x39", "grade": "350W"}
        request: PathBuf,
    },
    /// Check one catalog section for bending and shear
    Check {
        /// Request file with designation, actions and optional deflection data
        request: PathBuf,
    },
    /// Design a beam from direct actions, a uniform load or NBC load cases
    Beam {
        /// Beam design request file
        request: PathBuf,
    },
    /// Search for the lightest adequate column
    Column {
        /// Column search request file
        request: PathBuf,
    },
    /// Search for the lightest adequate tension member
    Tension {
        /// Tension search request file
        request: PathBuf,
    },
    /// Evaluate NBC load combinations for a load case
    CodeCombos {
        /// Load case file: {"label": "Roof", "loads": {"D": 5.0, "S": 8.0}} (codes or names such as "Dead")
        request: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    designation: String,
    #[serde(default)]
    grade: SteelGrade,
}

/// Single-section beam check. The deflection check runs when both a span
/// and a service load are given.
#[derive(Debug, Deserialize)]
struct CheckRequest {
    designation: String,
    #[serde(flatten)]
    actions: BeamCheckInput,
    span_mm: Option<f64>,
    service_load_kn_per_m: Option<f64>,
    #[serde(default = "default_deflection_limit")]
    deflection_limit: f64,
}

fn default_deflection_limit() -> f64 {
    steel_core::selection::beam::DEFAULT_DEFLECTION_LIMIT
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), "{}", e);
            match serde_json::to_string_pretty(&e) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("steel_core={0},steel_cli={0}", default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> CalcResult<String> {
    let settings = match &cli.settings {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };
    let catalog = settings.catalog()?;
    tracing::debug!(sections = catalog.len(), "catalog ready");

    let grade = ("grade", serde_json::to_value(settings.default_grade)?);
    let deflection_limit = ("deflection_limit", Value::from(settings.default_deflection_limit));

    match &cli.command {
        Commands::Classify { request } => {
            let request: ClassifyRequest = read_request(request, [grade])?;
            let section = catalog.lookup(&request.designation)?;
            to_json(&classify(section, request.grade.fy_mpa())?)
        }
        Commands::Check { request } => {
            let request: CheckRequest = read_request(request, [grade, deflection_limit])?;
            let section = catalog.lookup(&request.designation)?;
            let deflection = match (request.span_mm, request.service_load_kn_per_m) {
                (Some(span_mm), Some(service)) => {
                    Some(required_inertia_for_deflection(service, span_mm, request.deflection_limit)?)
                }
                (Some(_), None) => return Err(CalcError::missing_field("service_load_kn_per_m")),
                (None, Some(_)) => return Err(CalcError::missing_field("span_mm")),
                (None, None) => None,
            };
            let result = check_beam(section, &request.actions, deflection.as_ref())?;
            tracing::info!(
                section = %result.designation,
                passes = result.passes(),
                governs = result.governing_condition(),
                unity = result.governing_unity(),
                "beam check"
            );
            to_json(&result)
        }
        Commands::Beam { request } => {
            let families = ("families", serde_json::to_value(&settings.beam_families)?);
            let request: BeamDesignRequest = read_request(request, [grade, families, deflection_limit])?;
            let mut outcome = design_beam(&catalog, &request)?;
            settings.truncate(&mut outcome.candidates);
            to_json(&outcome)
        }
        Commands::Column { request } => {
            let families = ("families", serde_json::to_value(&settings.column_families)?);
            let request: ColumnSearchInput = read_request(request, [grade, families])?;
            let mut results = search_optimal_column(&catalog, &request)?;
            settings.truncate(&mut results);
            to_json(&results)
        }
        Commands::Tension { request } => {
            let families = ("families", serde_json::to_value(&settings.tension_families)?);
            let request: TensionSearchInput = read_request(request, [grade, families])?;
            let mut results = search_optimal_tension_member(&catalog, &request)?;
            settings.truncate(&mut results);
            to_json(&results)
        }
        Commands::CodeCombos { request } => {
            let request: LoadCase = read_request(request, [])?;
            to_json(&derive_code_combinations(&request)?)
        }
    }
}

/// Read a JSON request, filling top-level fields it leaves out from the
/// settings defaults.
fn read_request<T: DeserializeOwned, const N: usize>(path: &Path, defaults: [(&str, Value); N]) -> CalcResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let invalid = |e: serde_json::Error| CalcError::serialization(format!("Invalid request in {}: {}", path.display(), e));

    let mut value: Value = serde_json::from_str(&text).map_err(invalid)?;
    if let Value::Object(fields) = &mut value {
        for (key, default) in defaults {
            fields.entry(key).or_insert(default);
        }
    }
    serde_json::from_value(value).map_err(invalid)
}

fn to_json<T: Serialize>(value: &T) -> CalcResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
