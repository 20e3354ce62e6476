//! Community energy profiles and transition planning constraints.
use serde::{Deserialize, Serialize};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use strum::EnumIter;

/// The current energy situation of a diesel-dependent community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityEnergyProfile {
    /// Name of the community (e.g. "Old Crow")
    pub community_name: String,
    /// Annual diesel consumption for power generation, in litres
    pub diesel_consumption_litres_annual: f64,
    /// Delivered diesel price, in CAD per litre
    pub diesel_price_per_litre: f64,
    /// Community population
    pub population: u32,
    /// Renewable generation capacity already installed, in kW
    #[serde(default)]
    pub current_renewable_capacity_kw: f64,
    /// Whether the community has a connection to a provincial/territorial grid
    #[serde(default)]
    pub grid_connected: bool,
}

/// Constraints on a transition plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Total capital budget, in CAD
    pub budget_cad: f64,
    /// Share of current diesel generation to displace, as a percentage in [0, 100]
    pub diesel_reduction_target_percent: f64,
    /// Required hours of backup generation.
    ///
    /// Carried for interface compatibility but not enforced by the allocator; it only
    /// informs the advisory text. See DESIGN.md.
    pub min_reliability_hours: u32,
    /// Longest acceptable implementation horizon, in years
    pub max_implementation_years: u32,
}

/// Named constraint bundles covering common planning postures
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
pub enum Preset {
    #[string = "aggressive_transition"]
    AggressiveTransition,
    #[string = "moderate_transition"]
    ModerateTransition,
    #[string = "conservative_transition"]
    ConservativeTransition,
    #[string = "budget_constrained"]
    BudgetConstrained,
}

impl Preset {
    /// Human-readable scenario name
    pub fn name(&self) -> &'static str {
        match self {
            Self::AggressiveTransition => "Aggressive Transition",
            Self::ModerateTransition => "Moderate Transition",
            Self::ConservativeTransition => "Conservative Transition",
            Self::BudgetConstrained => "Budget Constrained",
        }
    }

    /// The constraint bundle for this preset
    pub fn constraints(&self) -> Constraints {
        match self {
            Self::AggressiveTransition => Constraints {
                budget_cad: 5_000_000.0,
                diesel_reduction_target_percent: 75.0,
                min_reliability_hours: 48,
                max_implementation_years: 3,
            },
            Self::ModerateTransition => Constraints {
                budget_cad: 2_000_000.0,
                diesel_reduction_target_percent: 50.0,
                min_reliability_hours: 72,
                max_implementation_years: 5,
            },
            Self::ConservativeTransition => Constraints {
                budget_cad: 1_000_000.0,
                diesel_reduction_target_percent: 25.0,
                min_reliability_hours: 96,
                max_implementation_years: 7,
            },
            Self::BudgetConstrained => Constraints {
                budget_cad: 500_000.0,
                diesel_reduction_target_percent: 30.0,
                min_reliability_hours: 72,
                max_implementation_years: 5,
            },
        }
    }

    /// The label used in scenario files
    pub fn label(&self) -> &'static str {
        match self {
            Self::AggressiveTransition => "aggressive_transition",
            Self::ModerateTransition => "moderate_transition",
            Self::ConservativeTransition => "conservative_transition",
            Self::BudgetConstrained => "budget_constrained",
        }
    }
}
