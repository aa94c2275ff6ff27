use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use planpilot::cli::{Cli, Commands};
use planpilot::config::{PatternConfig, ProjectConfig};
use planpilot::error::Result;
use planpilot::planner::Planner;
use planpilot::registry::{ComponentRegistry, DomainCategory};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("planpilot=debug")
    } else {
        EnvFilter::new("planpilot=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            prd_file,
            config,
            registry,
            pretty,
            sequential,
        } => cmd_analyze(&prd_file, config.as_deref(), registry.as_deref(), pretty, sequential).await,
        Commands::Categories { registry } => cmd_categories(registry.as_deref()).await,
    }
}

async fn cmd_analyze(
    prd_file: &Path,
    config_path: Option<&Path>,
    registry_path: Option<&Path>,
    pretty: bool,
    sequential: bool,
) -> Result<()> {
    let document = tokio::fs::read_to_string(prd_file).await?;

    let config = match config_path {
        Some(path) => ProjectConfig::load(path).await?,
        None => ProjectConfig::default(),
    };
    let registry = ComponentRegistry::load(registry_path).await?;
    let planner = Planner::new(config, PatternConfig::default(), registry)?;

    let plan = if sequential {
        planner.plan(&document)?
    } else {
        planner.plan_concurrent(&document).await?
    };

    let json = if pretty {
        serde_json::to_string_pretty(&plan)?
    } else {
        serde_json::to_string(&plan)?
    };
    println!("{}", json);
    Ok(())
}

async fn cmd_categories(registry_path: Option<&Path>) -> Result<()> {
    let registry = ComponentRegistry::load(registry_path).await?;

    for category in DomainCategory::TIE_BREAK_ORDER {
        println!("{}:", category);
        for comp in registry.in_category(category) {
            println!(
                "  {} (complexity {}, reliability {})",
                comp.id, comp.complexity_score, comp.reliability_score
            );
        }
    }
    Ok(())
}
