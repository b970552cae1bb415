mod cli;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use binder_core::config::{PipelineConfig, constants};
use binder_core::error::Result;
use binder_core::pipeline::{PipelineEngine, StepRegistry};
use binder_core_full::{ClientConfig, StepServices};

fn main() {
    let args = Cli::parse();

    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(constants::LOG_DIR));
    let log_file = match logging::create_log_file(&log_dir) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to create log file in {}: {}", log_dir.display(), e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .with(
            fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(EnvFilter::new("debug")),
        )
        .init();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{}{}", e, e.source_chain());
            std::process::exit(1);
        }
    }
}

/// `Ok(false)` when the pipeline itself failed; its errors are already logged
fn run(args: Cli) -> Result<bool> {
    let registry = build_registry()?;
    match args.cmd {
        Commands::Run {
            config,
            target,
            source,
            save_final_output,
        } => {
            let mut pipeline = PipelineConfig::load(&config)?;
            if let Some(target) = target {
                pipeline.target_file = Some(target);
            }
            if let Some(source) = source {
                pipeline.source_file = Some(source);
            }
            pipeline.save_final_output |= save_final_output;

            info!("Loaded pipeline {}", config.display());
            let engine = PipelineEngine::new(Arc::new(registry));
            Ok(engine.execute(&pipeline))
        }
        Commands::Steps => {
            for name in registry.list() {
                println!("{}", name);
            }
            Ok(true)
        }
    }
}

/// Every step this binary knows, backed by the live APIs
fn build_registry() -> Result<StepRegistry> {
    let services = StepServices::from_configs(ClientConfig::pokeapi(), ClientConfig::tcgdex())?;

    let mut registry = StepRegistry::new();
    binder_core_full::register_steps(&mut registry, &services);
    binder_asset::register_steps(&mut registry, Arc::clone(&services.images));
    Ok(registry)
}
