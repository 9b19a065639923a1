use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use tiernet::config_loader;
use tiernet::orchestrator;
use tiernet::utils::check_plan;

/// Planning utility for segmented three-tier virtual network topologies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the planner configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Output directory for the plan files
    #[arg(short, long, default_value = "plan_output")]
    output: PathBuf,

    /// Validate configuration and plan without writing output files
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting tiernet network planner");
    info!("Configuration file: {:?}", args.config);
    info!("Output directory: {:?}", args.output);

    // Load and validate configuration
    let config = config_loader::load_config(&args.config)?;

    // Apply configured log level, if any
    if let Some(level) = &config.general.log_level {
        log::set_max_level(level.parse().unwrap_or(log::LevelFilter::Info));
    }

    // Load the opaque NAT bootstrap payload
    let payload = config_loader::load_bootstrap_payload(&config, &args.config)?;

    // Run the planning pipeline
    let plan = orchestrator::plan_network(&config, payload)?;

    // Re-verify structural invariants before handing anything off
    check_plan(&plan)?;
    info!(
        "Planned {} subnets across {} route tables in {}",
        plan.subnets.len(),
        plan.route_tables.len(),
        plan.vpc.cidr
    );

    if args.check {
        info!("Check mode: plan is valid, no output written");
        return Ok(());
    }

    // Write plan files for the provisioning engine
    orchestrator::write_plan(&config.general.environment, &plan, &args.output)?;

    info!("Planning completed successfully");
    Ok(())
}
