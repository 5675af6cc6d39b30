//! bess-sim entry point: CLI wiring and config-driven engine construction.

use std::process;

use tracing::error;

use bess_sim::cli::{CliOptions, parse_args, print_usage};
use bess_sim::config::ScenarioConfig;
use bess_sim::io::export::export_csv;
use bess_sim::io::import::read_curve_csv;
use bess_sim::reporting::{print_report, render_json};
use bess_sim::runner::run_scenario;
use bess_sim::telemetry::init_tracing;

/// Loads the scenario: --scenario takes priority, then --preset, then baseline.
fn load_scenario(cli: &CliOptions) -> Result<ScenarioConfig, String> {
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = cli.seed {
        scenario.simulation.seed = seed;
    }
    if let Some(policy) = cli.policy {
        scenario.simulation.policy = policy;
    }
    if cli.absorb_generation {
        scenario.simulation.absorb_generation = true;
    }
    if let Some(start) = cli.start_hour {
        scenario.discharge.start_hour = start;
    }
    if let Some(end) = cli.end_hour {
        scenario.discharge.end_hour = end;
    }

    Ok(scenario)
}

fn fail(message: impl std::fmt::Display) -> ! {
    error!("{message}");
    eprintln!("error: {message}");
    process::exit(1);
}

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        print_usage();
        return;
    }

    init_tracing(cli.verbose);

    let scenario = load_scenario(&cli).unwrap_or_else(|e| fail(e));

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build curve and run
    let curve = match cli.curve {
        Some(ref path) => read_curve_csv(path).unwrap_or_else(|e| fail(e)),
        None => scenario.build_curve().unwrap_or_else(|e| fail(e)),
    };
    let run = run_scenario(&scenario, curve).unwrap_or_else(|e| fail(e));

    if cli.json {
        match render_json(&run) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(format!("failed to serialize report: {e}")),
        }
    } else {
        print_report(&run);
    }

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&run.records, path) {
            fail(format!("failed to write CSV: {e}"));
        }
        eprintln!("Telemetry written to {}", path.display());
    }
}
