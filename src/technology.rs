//! The renewable technology catalog used by the optimiser.
//!
//! Costs reflect typical installed prices for northern Canada, which run well above
//! southern benchmarks due to transportation and remote-installation premiums.
use crate::units::{Dimensionless, EnergyPerCapacity, EnergyPerMoney, MoneyPerCapacity};
use indexmap::IndexMap;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use strum::EnumIter;

/// Hours in a (non-leap) year, used to convert capacity factors to annual generation
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Cost premium applied to all technologies for remote northern installations
pub const NORTHERN_COST_MULTIPLIER: Dimensionless = Dimensionless(1.5);

/// A renewable generation or storage technology
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum TechnologyType {
    #[string = "solar"]
    Solar,
    #[string = "wind"]
    Wind,
    #[string = "hydro"]
    Hydro,
    #[string = "battery_storage"]
    BatteryStorage,
    #[string = "biomass"]
    Biomass,
}

impl TechnologyType {
    /// The label used in files and user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Wind => "wind",
            Self::Hydro => "hydro",
            Self::BatteryStorage => "battery_storage",
            Self::Biomass => "biomass",
        }
    }
}

/// Cost and performance parameters for one technology
#[derive(Debug, Clone, PartialEq)]
pub struct RenewableOption {
    /// The technology these parameters describe
    pub technology: TechnologyType,
    /// Installed capital cost per kW, including the northern premium
    pub capital_cost_per_kw: MoneyPerCapacity,
    /// Annual operation and maintenance cost per kW
    pub annual_om_cost_per_kw: MoneyPerCapacity,
    /// Annual average capacity factor, in (0, 1]
    pub capacity_factor: Dimensionless,
    /// Expected operating lifetime
    pub lifespan_years: u32,
}

impl RenewableOption {
    /// Annual energy delivered per kW of installed capacity
    pub fn annual_yield(&self) -> EnergyPerCapacity {
        self.capacity_factor * EnergyPerCapacity(HOURS_PER_YEAR)
    }

    /// Annual kWh delivered per capital dollar, the greedy ranking key
    pub fn cost_effectiveness(&self) -> EnergyPerMoney {
        self.annual_yield() / self.capital_cost_per_kw
    }
}

/// A catalog of technology options, keyed by technology type
pub type TechnologyCatalog = IndexMap<TechnologyType, RenewableOption>;

/// The technology menu assumed when the caller does not select one
pub const DEFAULT_MENU: [TechnologyType; 3] = [
    TechnologyType::Solar,
    TechnologyType::Wind,
    TechnologyType::BatteryStorage,
];

/// Builds the built-in catalog of northern Canadian technology costs.
///
/// Base (southern) capital costs are scaled by [`NORTHERN_COST_MULTIPLIER`]. Capacity
/// factors are annual averages; the Arctic solar figure is low because of short winter
/// days, while wind resources in the North are comparatively strong.
pub fn default_catalog() -> TechnologyCatalog {
    let entry = |technology, base_capital_cost, om_cost, capacity_factor, lifespan_years| {
        (
            technology,
            RenewableOption {
                technology,
                capital_cost_per_kw: MoneyPerCapacity(base_capital_cost) * NORTHERN_COST_MULTIPLIER,
                annual_om_cost_per_kw: MoneyPerCapacity(om_cost),
                capacity_factor: Dimensionless(capacity_factor),
                lifespan_years,
            },
        )
    };

    TechnologyCatalog::from_iter([
        entry(TechnologyType::Solar, 3000.0, 30.0, 0.12, 25),
        entry(TechnologyType::Wind, 4500.0, 100.0, 0.35, 20),
        entry(TechnologyType::BatteryStorage, 1500.0, 50.0, 0.85, 10),
        entry(TechnologyType::Hydro, 6000.0, 80.0, 0.50, 50),
        entry(TechnologyType::Biomass, 5000.0, 150.0, 0.70, 20),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_catalog_covers_all_technologies() {
        let catalog = default_catalog();
        for technology in TechnologyType::iter() {
            assert!(catalog.contains_key(&technology));
        }
    }

    #[test]
    fn test_northern_premium_applied() {
        let catalog = default_catalog();
        let solar = &catalog[&TechnologyType::Solar];
        assert_approx_eq!(f64, solar.capital_cost_per_kw.value(), 4500.0);
    }

    #[test]
    fn test_cost_effectiveness_ranking_key() {
        let catalog = default_catalog();
        let wind = &catalog[&TechnologyType::Wind];
        // 0.35 * 8760 / 6750 kWh per dollar
        assert_approx_eq!(
            f64,
            wind.cost_effectiveness().value(),
            0.35 * HOURS_PER_YEAR / 6750.0
        );
    }

    #[test]
    fn test_catalog_invariants() {
        for option in default_catalog().values() {
            assert!(option.capacity_factor > Dimensionless(0.0));
            assert!(option.capacity_factor <= Dimensionless(1.0));
            assert!(option.capital_cost_per_kw > MoneyPerCapacity(0.0));
            assert!(option.annual_om_cost_per_kw.value() >= 0.0);
            assert!(option.lifespan_years > 0);
        }
    }
}
