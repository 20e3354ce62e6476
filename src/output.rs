//! The module responsible for writing transition plans to disk.
use crate::optimisation::TransitionPlan;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which scenario-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "arcticmix_results";

/// The output file name for the full transition plan
const PLAN_FILE_NAME: &str = "plan.toml";

/// The output file name for the recommended technology mix
const RECOMMENDED_MIX_FILE_NAME: &str = "recommended_mix.csv";

/// The output file name for the implementation timeline
const TIMELINE_FILE_NAME: &str = "timeline.csv";

/// Get the output directory for the scenario at the specified path
pub fn get_output_dir(scenario_path: &Path) -> Result<PathBuf> {
    let scenario_name = scenario_path
        .file_stem()
        .context("Scenario path has no file name")?
        .to_str()
        .context("Invalid chars in scenario file name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, scenario_name].iter().collect())
}

/// Create the output directory, with parents, if it does not already exist
pub fn create_output_directory(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        // already exists
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    Ok(())
}

/// Write a transition plan to the output directory.
///
/// Produces the full plan as TOML plus CSV tables for the mix and timeline, so the
/// results can be picked up by spreadsheets without parsing the full plan.
pub fn write_plan(plan: &TransitionPlan, output_dir: &Path) -> Result<()> {
    let plan_toml = toml::to_string(plan).context("Could not serialise plan")?;
    fs::write(output_dir.join(PLAN_FILE_NAME), plan_toml)
        .context("Could not write plan file")?;

    write_csv(&output_dir.join(RECOMMENDED_MIX_FILE_NAME), &plan.recommended_mix)?;
    write_csv(&output_dir.join(TIMELINE_FILE_NAME), &plan.timeline)?;

    Ok(())
}

/// Write a slice of serialisable rows to a CSV file
fn write_csv<T: serde::Serialize>(file_path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(file_path)
        .with_context(|| format!("Could not create {}", file_path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::Preset;
    use crate::fixture::{catalog, profile};
    use crate::optimisation::optimise_diesel_to_renewable;
    use crate::technology::DEFAULT_MENU;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_get_output_dir() {
        let dir = get_output_dir(Path::new("scenarios/old_crow.toml")).unwrap();
        assert_eq!(dir, Path::new("arcticmix_results/old_crow"));
    }

    #[rstest]
    fn test_write_plan(
        profile: crate::community::CommunityEnergyProfile,
        catalog: crate::technology::TechnologyCatalog,
    ) {
        let plan = optimise_diesel_to_renewable(
            &profile,
            &Preset::ModerateTransition.constraints(),
            &DEFAULT_MENU,
            &catalog,
        );

        let dir = tempdir().unwrap();
        write_plan(&plan, dir.path()).unwrap();

        let plan_contents = fs::read_to_string(dir.path().join(PLAN_FILE_NAME)).unwrap();
        assert!(plan_contents.contains("total_cost_cad"));

        let mix_contents = fs::read_to_string(dir.path().join(RECOMMENDED_MIX_FILE_NAME)).unwrap();
        let header = mix_contents.lines().next().unwrap();
        assert_eq!(
            header,
            "technology,capacity_kw,cost_cad,annual_generation_kwh"
        );

        let timeline_contents = fs::read_to_string(dir.path().join(TIMELINE_FILE_NAME)).unwrap();
        assert_eq!(timeline_contents.lines().next().unwrap(), "year,action,cost_cad");
    }
}
