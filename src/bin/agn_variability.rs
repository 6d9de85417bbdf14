use std::fs;
use std::path::{Path, PathBuf};

use agn_variability::{run_population, VariabilityConfig, VariabilityError};

struct Args {
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(error) = try_main() {
        eprintln!("agn-variability failed: {error}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), VariabilityError> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = load_config(args.config_path.as_deref())?;
    config.validate()?;

    log::info!(
        "Sampling {} sources x {} draws (l_avg={}, l_cut={}, alpha={}, seed={})",
        config.n_sources,
        config.draws_per_source,
        config.l_avg,
        config.hickox.l_cut,
        config.hickox.alpha,
        config.seed
    );

    let run = run_population(&config)?;
    let summary = &run.summary;

    println!("Draws:             {}", summary.n_draws);
    println!("Mean L/L_avg:      {:.6e}", summary.mean_ratio);
    println!("Median L/L_avg:    {:.6e}", summary.median_ratio);
    println!("Min L/L_avg:       {:.6e}", summary.min_ratio);
    println!("Max L/L_avg:       {:.6e}", summary.max_ratio);
    println!("Brighter than avg: {:.4}", summary.brighter_fraction);

    if let Some(path) = args.output_path {
        let mut writer = csv::Writer::from_path(&path)?;
        for record in &run.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        log::info!("Wrote {} records to {}", run.records.len(), path.display());
        println!("CSV output written to: {}", path.display());
    }

    Ok(())
}

fn parse_args<I>(args: I) -> Result<Args, VariabilityError>
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    let mut parsed = Args {
        config_path: None,
        output_path: None,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or_else(|| {
                    VariabilityError::InvalidConfig("missing value for --config".to_string())
                })?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--output" => {
                let path = iter.next().ok_or_else(|| {
                    VariabilityError::InvalidConfig("missing value for --output".to_string())
                })?;
                parsed.output_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(VariabilityError::InvalidConfig(format!(
                    "unknown argument: {other}"
                )));
            }
        }
    }

    Ok(parsed)
}

fn load_config(path: Option<&Path>) -> Result<VariabilityConfig, VariabilityError> {
    if let Some(path) = path {
        return load_config_file(path);
    }

    let cwd_config = PathBuf::from("config.json");
    if cwd_config.exists() {
        return load_config_file(&cwd_config);
    }

    Ok(VariabilityConfig::default())
}

fn load_config_file(path: &Path) -> Result<VariabilityConfig, VariabilityError> {
    log::debug!("Loading config from {}", path.display());
    let raw = fs::read_to_string(path)?;
    VariabilityConfig::from_json_str(&raw)
}

fn print_help() {
    println!("Usage: agn_variability [--config path/to/config.json] [--output draws.csv]");
    println!("If config.json exists in the current directory, it is loaded automatically.");
    println!("Otherwise 16 sources x 64 draws with the default Hickox (2014) shape are used.");
}
