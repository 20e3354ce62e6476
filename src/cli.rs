//! The command line interface for the transition planner.
use crate::community::Preset;
use crate::input::load_scenario;
use crate::log;
use crate::optimisation::optimise_diesel_to_renewable;
use crate::output::{create_output_directory, get_output_dir, write_plan};
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// The command line interface for the transition planner.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Commands,
}

/// Options for the run command
#[derive(Args)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Plan a transition for the given scenario file.
    Run {
        /// Path to the scenario TOML file.
        scenario_file: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Validate a scenario file without planning.
    Validate {
        /// Path to the scenario TOML file.
        scenario_file: PathBuf,
    },
    /// List the built-in preset scenarios.
    Presets,
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run {
                scenario_file,
                opts,
            } => handle_run_command(&scenario_file, &opts, None),
            Self::Validate { scenario_file } => handle_validate_command(&scenario_file, None),
            Self::Presets => handle_presets_command(),
        }
    }
}

/// Parse CLI arguments and start the planner
pub fn run_cli() -> Result<()> {
    Cli::parse().command.execute()
}

/// Handle the `run` command.
pub fn handle_run_command(
    scenario_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(scenario_path)?;
        &pathbuf
    };

    create_output_directory(output_path).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    // Initialise program logger
    log::init(settings.log_level.as_deref(), Some(output_path))
        .context("Failed to initialise logging.")?;

    // Load the scenario to plan
    let scenario = load_scenario(scenario_path).context("Failed to load scenario.")?;
    info!("Loaded scenario from {}", scenario_path.display());
    info!("Output folder: {}", output_path.display());

    // Plan the transition
    let plan = optimise_diesel_to_renewable(
        &scenario.community,
        &scenario.constraints,
        &scenario.technologies,
        &scenario.catalog,
    );
    for warning in &plan.warnings {
        warn!("{warning}");
    }
    info!(
        "{}: {:.1}% diesel reduction for ${:.0} (payback {:.1} years, reliability {})",
        scenario.community.community_name,
        plan.diesel_reduction_percent,
        plan.total_cost_cad,
        plan.payback_period_years,
        plan.reliability_score
    );

    write_plan(&plan, output_path).context("Failed to write plan.")?;
    info!("Transition plan written!");

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(scenario_path: &Path, settings: Option<Settings>) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Initialise program logger (we won't save log files when running the validate command)
    log::init(settings.log_level.as_deref(), None).context("Failed to initialise logging.")?;

    // Load/validate the scenario
    load_scenario(scenario_path).context("Failed to validate scenario.")?;
    info!("Scenario validation successful!");

    Ok(())
}

/// Handle the `presets` command.
pub fn handle_presets_command() -> Result<()> {
    for preset in Preset::iter() {
        let constraints = preset.constraints();
        println!(
            "{} ({}): {}% reduction, ${} budget, {} year horizon",
            preset.label(),
            preset.name(),
            constraints.diesel_reduction_target_percent,
            constraints.budget_cad,
            constraints.max_implementation_years
        );
    }
    Ok(())
}
