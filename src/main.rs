use pokemon_battle_advisor::config::AdvisorConfig;
use pokemon_battle_advisor::{run, CliOptions, InputSource};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: pokemon-battle-advisor [--data DIR] [--scenario scenario.json | --batch scenarios.json] \
[--max-sweeps N] [--json]\n\
Without --scenario or --batch the advisor asks for the battle state interactively."
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut config = AdvisorConfig::from_env();
    let mut input = InputSource::Interactive;
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                config.data_dir = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--data requires a directory (e.g. --data data)")
                })?;
            }
            "--scenario" => {
                let path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--scenario requires a path (e.g. --scenario battle.json)")
                })?;
                input = InputSource::Scenario(path);
            }
            "--batch" => {
                let path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--batch requires a path (e.g. --batch battles.json)")
                })?;
                input = InputSource::Batch(path);
            }
            "--max-sweeps" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--max-sweeps requires a number"))?;
                config.max_sweeps = val.parse()?;
            }
            "--json" => json = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        config,
        input,
        json,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = parse_args()?;
    run(opts)
}
