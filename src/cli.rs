//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::sim::policy::ComplementPolicy;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub curve: Option<PathBuf>,
    pub start_hour: Option<usize>,
    pub end_hour: Option<usize>,
    pub policy: Option<ComplementPolicy>,
    pub seed: Option<u64>,
    pub absorb_generation: bool,
    pub telemetry_out: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
    pub help: bool,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

/// Parses an argument list (without the program name).
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--curve" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --curve (expected a CSV path)")?;
                opts.curve = Some(PathBuf::from(path));
            }
            "--start" => {
                i += 1;
                opts.start_hour = Some(parse_value(args, i, "--start", "an hour 1-24")?);
            }
            "--end" => {
                i += 1;
                opts.end_hour = Some(parse_value(args, i, "--end", "an hour 1-24")?);
            }
            "--policy" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --policy")?;
                opts.policy = Some(raw.parse()?);
            }
            "--seed" => {
                i += 1;
                opts.seed = Some(parse_value(args, i, "--seed", "a u64")?);
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --telemetry-out (expected a file path)",
                )?;
                if opts.telemetry_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--telemetry-out provided more than once".to_string());
                }
            }
            "--absorb-generation" => opts.absorb_generation = true,
            "--json" => opts.json = true,
            "--verbose" | "-v" => opts.verbose = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(opts)
}

fn parse_value<T: std::str::FromStr>(
    args: &[String],
    index: usize,
    flag: &str,
    expected: &str,
) -> Result<T, String> {
    let raw = args.next_or_err(index, &format!("missing value for {flag} (expected {expected})"))?;
    raw.parse()
        .map_err(|_| format!("{flag} value \"{raw}\" is not {expected}"))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("bess-sim: single-day battery storage and discharge simulator");
    eprintln!();
    eprintln!("Usage: bess-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, high_solar, overnight)");
    eprintln!("  --curve <path>           Read the raw curve from CSV instead of the profile");
    eprintln!("  --start <hour>           Override the first discharge hour (1-24)");
    eprintln!("  --end <hour>             Override the last discharge hour (1-24)");
    eprintln!("  --policy <name>          Complement policy (attenuate, collapse, untouched)");
    eprintln!("  --seed <u64>             Override the profile random seed");
    eprintln!("  --absorb-generation      Report generation hours as zero after discharge");
    eprintln!("  --telemetry-out <path>   Export per-hour records to CSV");
    eprintln!("  --json                   Print the report as JSON");
    eprintln!("  -v, --verbose            Log engine decisions to stderr");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn supports_scenario_cli() {
        let opts = parse_args_from(&args(&["--scenario", "scenario.toml"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.scenario.as_deref().and_then(|p| p.to_str()),
            Some("scenario.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn supports_window_and_policy_overrides() {
        let opts = parse_args_from(&args(&[
            "--preset", "overnight", "--start", "23", "--end", "2", "--policy", "collapse",
            "--json",
        ]))
        .expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("overnight"));
        assert_eq!(opts.start_hour, Some(23));
        assert_eq!(opts.end_hour, Some(2));
        assert_eq!(opts.policy, Some(ComplementPolicy::Collapse));
        assert!(opts.json);
    }

    #[test]
    fn rejects_scenario_and_preset_together() {
        let err = parse_args_from(&args(&["--scenario", "a.toml", "--preset", "baseline"]));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_bad_numbers_and_unknown_flags() {
        assert!(parse_args_from(&args(&["--start", "noon"])).is_err());
        assert!(parse_args_from(&args(&["--seed"])).is_err());
        assert!(parse_args_from(&args(&["--policy", "spread"])).is_err());
        assert!(parse_args_from(&args(&["--frobnicate"])).is_err());
    }
}
