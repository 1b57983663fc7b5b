use forecast_grid::{save_sheet, ForecastSheet, SheetKind};
use anyhow::{Context, Result};
use log::info;
use std::env;

struct Config {
    kind: SheetKind,
    months: usize,
    seed: u64,
    output_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: SheetKind::OtherRevenue,
            months: 12,
            seed: 42,
            output_file: None,
        }
    }
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-kind" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-kind requires an argument");
                }
                config.kind = SheetKind::from_arg(&args[i])
                    .with_context(|| format!("unknown sheet kind '{}' (expected revenue, expenses, rates or stats)", args[i]))?;
            }
            "-months" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-months requires an argument");
                }
                config.months = args[i]
                    .parse()
                    .with_context(|| format!("invalid month count '{}'", args[i]))?;
                if config.months == 0 {
                    anyhow::bail!("-months must be at least 1");
                }
            }
            "-seed" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-seed requires an argument");
                }
                config.seed = args[i]
                    .parse()
                    .with_context(|| format!("invalid seed '{}'", args[i]))?;
            }
            "-out" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-out requires a file path argument");
                }
                config.output_file = Some(args[i].clone());
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Warning: Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Forecast Sheet Generator");
    println!("Usage: forecast-gen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -kind <KIND>        Sheet kind: revenue, expenses, rates, stats (default: revenue)");
    println!("  -months <N>         Number of monthly periods (default: 12)");
    println!("  -seed <N>           Random seed (default: 42)");
    println!("  -out <FILE>         Output file path (default: forecast.json)");
    println!("  -h, -help, --help   Show this help message");
}

fn main() -> Result<()> {
    env_logger::init();
    let config = parse_args()?;

    let output_path = config
        .output_file
        .clone()
        .unwrap_or_else(|| "forecast.json".to_string());

    let sheet = ForecastSheet::sample(config.kind, config.months, config.seed);
    info!(
        "generated {} with {} periods, seed {}",
        sheet.title,
        sheet.row_count(),
        config.seed
    );
    save_sheet(&output_path, &sheet)?;

    println!("Sheet written to: {}", output_path);
    Ok(())
}
