mod cli;

use std::process::ExitCode;
use std::sync::{Arc, OnceLock};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plistconv_core::{
    load_config, validate_config, Config, ConversionJob, Format, JobScheduler, NativeEngine,
    PlistError,
};

use cli::{derive_output, Cli};

/// Exit status for configuration and usage problems.
const SETUP_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("plistconv: {:#}", e);
            ExitCode::from(SETUP_FAILURE)
        }
    }
}

fn init_tracing(cli: &Cli) {
    let json = cli.json_logs;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list_formats {
        for format in Format::all() {
            println!("{}", format.describe());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };
    validate_config(&config).context("Configuration validation failed")?;

    let Some(input) = cli.input.clone() else {
        bail!("no input file given");
    };
    let format = cli.resolve_format(&config.defaults);
    let options = cli.options(&config.defaults);
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_output(&input, format));
    if output == input {
        bail!("output would overwrite the input file {:?}", input);
    }

    info!(
        "Converting {:?} -> {:?} as {} ({:?})",
        input, output, format, options
    );

    let (scheduler, mut control) = JobScheduler::new(config.scheduler.clone(), NativeEngine::new())
        .context("Failed to start scheduler")?;

    let outcome = Arc::new(OnceLock::new());
    let slot = Arc::clone(&outcome);
    scheduler.submit(
        ConversionJob::new(input, output, format, options),
        move |job| {
            let result = job.result();
            if result.is_success() {
                println!("{}", result.description());
            } else {
                eprintln!("plistconv: {}", result.description());
            }
            let _ = slot.set(result);
        },
    );
    drop(scheduler);
    control.run().await;

    let result = outcome.get().copied().unwrap_or(PlistError::Unknown);
    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
