//! Common routines for loading scenario and catalog files.
use crate::community::{CommunityEnergyProfile, Constraints, Preset};
use crate::technology::{
    DEFAULT_MENU, RenewableOption, TechnologyCatalog, TechnologyType, default_catalog,
};
use crate::units::{Dimensionless, MoneyPerCapacity};
use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse a TOML file into the given type
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = fs::read_to_string(file_path)
        .with_context(|| format!("Could not read file {}", file_path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Could not parse TOML file {}", file_path.display()))
}

/// Read a series of type Ts from a CSV file into a Vec<T>
pub fn read_vec_from_csv<T: DeserializeOwned>(csv_file_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(csv_file_path)
        .with_context(|| format!("Could not open {}", csv_file_path.display()))?;
    let vec: Vec<T> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Could not parse {}", csv_file_path.display()))?;
    ensure!(
        !vec.is_empty(),
        "CSV file {} cannot be empty",
        csv_file_path.display()
    );
    Ok(vec)
}

/// Read an f64, checking that it is a valid capacity factor (greater than 0, at most 1)
pub fn deserialise_capacity_factor<'de, D>(deserialiser: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = Deserialize::deserialize(deserialiser)?;
    if !(value > 0.0 && value <= 1.0) {
        Err(serde::de::Error::custom(
            "Capacity factor must be greater than 0 and at most 1",
        ))?;
    }
    Ok(value)
}

/// A fully resolved planning scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// The community to plan for
    pub community: CommunityEnergyProfile,
    /// The constraint bundle, either explicit or from a preset
    pub constraints: Constraints,
    /// The technology menu the allocator may draw from
    pub technologies: Vec<TechnologyType>,
    /// The technology catalog (built-in unless a custom file was given)
    pub catalog: TechnologyCatalog,
}

/// The raw shape of a scenario TOML file
#[derive(Debug, Deserialize)]
struct ScenarioRaw {
    community: CommunityEnergyProfile,
    preset: Option<Preset>,
    constraints: Option<Constraints>,
    technologies: Option<Vec<TechnologyType>>,
    /// Path to a custom catalog CSV, relative to the scenario file
    catalog_file: Option<PathBuf>,
}

/// Loads a scenario file, resolving presets and any custom catalog it references.
pub fn load_scenario(file_path: &Path) -> Result<Scenario> {
    let raw: ScenarioRaw = read_toml(file_path)?;

    let constraints = match (raw.preset, raw.constraints) {
        (Some(preset), None) => preset.constraints(),
        (None, Some(constraints)) => constraints,
        (Some(_), Some(_)) => {
            bail!("Scenario must specify either a preset or a [constraints] table, not both")
        }
        (None, None) => bail!("Scenario must specify a preset or a [constraints] table"),
    };

    let technologies = raw
        .technologies
        .unwrap_or_else(|| DEFAULT_MENU.to_vec());

    let catalog = match raw.catalog_file {
        Some(catalog_file) => {
            let catalog_path = match file_path.parent() {
                Some(parent) => parent.join(catalog_file),
                None => catalog_file,
            };
            read_catalog(&catalog_path)?
        }
        None => default_catalog(),
    };

    Ok(Scenario {
        community: raw.community,
        constraints,
        technologies,
        catalog,
    })
}

/// One row of a custom catalog CSV.
///
/// Costs in a custom catalog are taken as given; no northern multiplier is applied,
/// since the file is expected to hold installed prices already.
#[derive(Debug, Deserialize)]
struct RenewableOptionRaw {
    technology: TechnologyType,
    capital_cost_per_kw: f64,
    annual_om_cost_per_kw: f64,
    #[serde(deserialize_with = "deserialise_capacity_factor")]
    capacity_factor: f64,
    lifespan_years: u32,
}

/// Reads a custom technology catalog from a CSV file.
pub fn read_catalog(csv_file_path: &Path) -> Result<TechnologyCatalog> {
    let rows: Vec<RenewableOptionRaw> = read_vec_from_csv(csv_file_path)?;

    let mut catalog = TechnologyCatalog::new();
    for row in rows {
        ensure!(
            row.capital_cost_per_kw > 0.0,
            "Capital cost for {} must be positive",
            row.technology
        );
        ensure!(
            row.annual_om_cost_per_kw >= 0.0,
            "O&M cost for {} cannot be negative",
            row.technology
        );
        ensure!(
            row.lifespan_years > 0,
            "Lifespan for {} must be positive",
            row.technology
        );

        let option = RenewableOption {
            technology: row.technology,
            capital_cost_per_kw: MoneyPerCapacity(row.capital_cost_per_kw),
            annual_om_cost_per_kw: MoneyPerCapacity(row.annual_om_cost_per_kw),
            capacity_factor: Dimensionless(row.capacity_factor),
            lifespan_years: row.lifespan_years,
        };
        ensure!(
            catalog.insert(row.technology, option).is_none(),
            "Duplicate catalog entry for {}",
            row.technology
        );
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const SCENARIO_FILE_NAME: &str = "scenario.toml";
    const CATALOG_FILE_NAME: &str = "technologies.csv";

    /// Create a scenario file with the given contents in dir_path
    fn create_scenario_file(dir_path: &Path, contents: &str) -> PathBuf {
        let file_path = dir_path.join(SCENARIO_FILE_NAME);
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{contents}").unwrap();
        file_path
    }

    fn create_catalog_file(dir_path: &Path, contents: &str) -> PathBuf {
        let file_path = dir_path.join(CATALOG_FILE_NAME);
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "{contents}").unwrap();
        file_path
    }

    const COMMUNITY_TOML: &str = "[community]
community_name = \"Old Crow\"
diesel_consumption_litres_annual = 1000000.0
diesel_price_per_litre = 1.5
population = 250";

    #[test]
    fn test_load_scenario_with_preset() {
        let dir = tempdir().unwrap();
        let file_path = create_scenario_file(
            dir.path(),
            &format!(
                "preset = \"moderate_transition\"
technologies = [\"solar\", \"battery_storage\"]

{COMMUNITY_TOML}"
            ),
        );

        let scenario = load_scenario(&file_path).unwrap();
        assert_eq!(
            scenario.constraints,
            Preset::ModerateTransition.constraints()
        );
        assert_eq!(
            scenario.technologies,
            vec![TechnologyType::Solar, TechnologyType::BatteryStorage]
        );
        assert_eq!(scenario.catalog, default_catalog());
        assert_eq!(scenario.community.community_name, "Old Crow");
        assert!(!scenario.community.grid_connected);
    }

    #[test]
    fn test_load_scenario_with_explicit_constraints() {
        let dir = tempdir().unwrap();
        let file_path = create_scenario_file(
            dir.path(),
            &format!(
                "{COMMUNITY_TOML}

[constraints]
budget_cad = 750000.0
diesel_reduction_target_percent = 20.0
min_reliability_hours = 48
max_implementation_years = 4"
            ),
        );

        let scenario = load_scenario(&file_path).unwrap();
        assert_eq!(scenario.constraints.budget_cad, 750_000.0);
        assert_eq!(scenario.constraints.diesel_reduction_target_percent, 20.0);
        // No menu given, so the default applies
        assert_eq!(scenario.technologies, DEFAULT_MENU.to_vec());
    }

    #[test]
    fn test_load_scenario_missing_constraints() {
        let dir = tempdir().unwrap();
        let file_path = create_scenario_file(dir.path(), COMMUNITY_TOML);
        assert_error!(
            load_scenario(&file_path),
            "Scenario must specify a preset or a [constraints] table"
        );
    }

    #[test]
    fn test_load_scenario_with_custom_catalog() {
        let dir = tempdir().unwrap();
        create_catalog_file(
            dir.path(),
            "technology,capital_cost_per_kw,annual_om_cost_per_kw,capacity_factor,lifespan_years
solar,2500.0,25.0,0.15,25
wind,4000.0,90.0,0.4,20",
        );
        let file_path = create_scenario_file(
            dir.path(),
            &format!(
                "preset = \"conservative_transition\"
catalog_file = \"{CATALOG_FILE_NAME}\"

{COMMUNITY_TOML}"
            ),
        );

        let scenario = load_scenario(&file_path).unwrap();
        assert_eq!(scenario.catalog.len(), 2);
        let solar = &scenario.catalog[&TechnologyType::Solar];
        assert_eq!(solar.capital_cost_per_kw, MoneyPerCapacity(2500.0));
        assert_eq!(solar.capacity_factor, Dimensionless(0.15));
    }

    #[test]
    fn test_read_catalog_rejects_bad_capacity_factor() {
        let dir = tempdir().unwrap();
        let file_path = create_catalog_file(
            dir.path(),
            "technology,capital_cost_per_kw,annual_om_cost_per_kw,capacity_factor,lifespan_years
solar,2500.0,25.0,1.2,25",
        );
        assert!(read_catalog(&file_path).is_err());
    }

    #[test]
    fn test_read_catalog_rejects_duplicates() {
        let dir = tempdir().unwrap();
        let file_path = create_catalog_file(
            dir.path(),
            "technology,capital_cost_per_kw,annual_om_cost_per_kw,capacity_factor,lifespan_years
solar,2500.0,25.0,0.15,25
solar,2600.0,25.0,0.15,25",
        );
        assert_error!(read_catalog(&file_path), "Duplicate catalog entry for solar");
    }

    #[test]
    fn test_read_vec_from_csv_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = create_catalog_file(
            dir.path(),
            "technology,capital_cost_per_kw,annual_om_cost_per_kw,capacity_factor,lifespan_years",
        );
        assert!(read_catalog(&file_path).is_err());
    }
}
