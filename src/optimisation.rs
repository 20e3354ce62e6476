//! The greedy diesel-displacement allocator.
//!
//! Given a community's diesel profile, a constraint bundle and a technology menu, the
//! allocator ranks technologies by annual kWh delivered per capital dollar and assigns
//! capacity to each in turn, capped by both the remaining budget and the remaining
//! energy gap. This is a deliberate heuristic, not a linear program: the ranking key
//! and the two-sided cap are part of the contract and fixed deliberately.
use crate::community::{CommunityEnergyProfile, Constraints};
use crate::technology::{NORTHERN_COST_MULTIPLIER, RenewableOption, TechnologyCatalog, TechnologyType};
use crate::units::{Capacity, Dimensionless, Energy, Litres, MassPerLitre, Money, MoneyPerLitre};
use crate::utils::round_to_places;
use anyhow::{Result, ensure};
use itertools::Itertools;
use log::{debug, error};
use serde::Serialize;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

/// Energy delivered per litre of diesel, assuming typical generator efficiency
pub const DIESEL_KWH_PER_LITRE: crate::units::EnergyPerLitre = crate::units::EnergyPerLitre(10.0);

/// CO2 emitted per litre of diesel burned
pub const DIESEL_CO2_KG_PER_LITRE: f64 = 2.68;

/// Allocations below this capacity are dropped as degenerate line items
const MIN_ALLOCATION: Capacity = Capacity(0.1);

/// A plan counts as feasible if it reaches this share of the nominal target
const FEASIBILITY_TOLERANCE: f64 = 0.9;

/// Installation is always front-loaded into at most this many years
const MAX_ROLLOUT_YEARS: u32 = 3;

/// Reliability heuristic: base score plus bonuses, capped at 100
const BASE_RELIABILITY: u32 = 60;
const DIVERSITY_BONUS: u32 = 20;
const STORAGE_BONUS: u32 = 20;

/// Payback thresholds for the confidence tag, in years
const HIGH_CONFIDENCE_PAYBACK: f64 = 15.0;
const MEDIUM_CONFIDENCE_PAYBACK: f64 = 25.0;

/// One allocated technology line item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixItem {
    /// The allocated technology
    pub technology: TechnologyType,
    /// Installed capacity, in kW (1 decimal place)
    pub capacity_kw: f64,
    /// Capital cost, in CAD (whole dollars)
    pub cost_cad: f64,
    /// Expected annual generation, in kWh (whole kWh)
    pub annual_generation_kwh: f64,
}

/// One year of the implementation timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    /// Implementation year, starting at 1
    pub year: u32,
    /// What gets installed in this step
    pub action: String,
    /// Capital cost of this step, in CAD
    pub cost_cad: f64,
}

/// How much to trust the plan's payback figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum)]
pub enum Confidence {
    #[string = "high"]
    High,
    #[string = "medium"]
    Medium,
    #[string = "low"]
    Low,
}

/// The outcome of a transition optimisation.
///
/// Always fully populated: structural problems and internal errors are reported through
/// `success`/`feasible` and `warnings` rather than by failing the call, so callers
/// always receive something renderable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionPlan {
    /// Whether the computation itself completed
    pub success: bool,
    /// Whether the plan reaches at least 90% of the reduction target
    pub feasible: bool,
    /// Total capital cost, in CAD
    pub total_cost_cad: f64,
    /// Annual fuel savings net of O&M, in CAD
    pub annual_savings_cad: f64,
    /// Simple payback period, in years
    pub payback_period_years: f64,
    /// Achieved diesel reduction, as a percentage of current consumption
    pub diesel_reduction_percent: f64,
    /// Annual CO2 avoided, in tonnes
    pub co2_reduction_tonnes_annual: f64,
    /// The allocated technology line items
    pub recommended_mix: Vec<MixItem>,
    /// Year-by-year installation schedule
    pub timeline: Vec<TimelineEntry>,
    /// Heuristic reliability score, 0-100
    pub reliability_score: u32,
    /// Confidence tag derived from feasibility and payback
    pub confidence: Confidence,
    /// Human-readable advisories and failure explanations
    pub warnings: Vec<String>,
    /// The fixed assumptions behind the numbers
    pub assumptions: Vec<String>,
}

impl TransitionPlan {
    /// A zeroed plan carrying only the given warnings
    fn failure(warnings: Vec<String>) -> Self {
        Self {
            success: false,
            feasible: false,
            total_cost_cad: 0.0,
            annual_savings_cad: 0.0,
            payback_period_years: 0.0,
            diesel_reduction_percent: 0.0,
            co2_reduction_tonnes_annual: 0.0,
            recommended_mix: Vec::new(),
            timeline: Vec::new(),
            reliability_score: 0,
            confidence: Confidence::Low,
            warnings,
            assumptions: Vec::new(),
        }
    }
}

/// Plans a diesel-to-renewable transition for a community.
///
/// `menu` selects which catalog entries the allocator may use; technologies missing
/// from `catalog` are silently skipped. An empty effective menu and any internal error
/// both produce a soft-failure plan rather than an `Err`, so this function never fails
/// from the caller's perspective.
pub fn optimise_diesel_to_renewable(
    profile: &CommunityEnergyProfile,
    constraints: &Constraints,
    menu: &[TechnologyType],
    catalog: &TechnologyCatalog,
) -> TransitionPlan {
    let options = menu
        .iter()
        .filter_map(|technology| catalog.get(technology))
        .cloned()
        .collect_vec();

    if options.is_empty() {
        return TransitionPlan::failure(vec!["No renewable options selected".to_string()]);
    }

    match allocate(profile, constraints, &options) {
        Ok(plan) => plan,
        Err(err) => {
            error!(
                "Optimisation failed for {}: {err:#}",
                profile.community_name
            );
            TransitionPlan::failure(vec![format!("Optimisation failed: {err:#}")])
        }
    }
}

/// Check the inputs are in range before doing any arithmetic with them
fn validate(profile: &CommunityEnergyProfile, constraints: &Constraints) -> Result<()> {
    ensure!(
        profile.diesel_consumption_litres_annual > 0.0,
        "Annual diesel consumption must be positive"
    );
    ensure!(
        profile.diesel_price_per_litre >= 0.0,
        "Diesel price cannot be negative"
    );
    ensure!(constraints.budget_cad >= 0.0, "Budget cannot be negative");
    ensure!(
        (0.0..=100.0).contains(&constraints.diesel_reduction_target_percent),
        "Diesel reduction target must be between 0 and 100 percent"
    );
    Ok(())
}

/// The greedy allocation loop and everything derived from its outcome
fn allocate(
    profile: &CommunityEnergyProfile,
    constraints: &Constraints,
    options: &[RenewableOption],
) -> Result<TransitionPlan> {
    validate(profile, constraints)?;

    let mut warnings = Vec::new();

    let annual_diesel = Litres(profile.diesel_consumption_litres_annual);
    let diesel_price = MoneyPerLitre(profile.diesel_price_per_litre);
    let budget = Money(constraints.budget_cad);
    let current_diesel_energy = annual_diesel * DIESEL_KWH_PER_LITRE;
    let target_fraction = Dimensionless(constraints.diesel_reduction_target_percent / 100.0);
    let target_energy = current_diesel_energy * target_fraction;

    // Rank by annual kWh delivered per capital dollar, best first
    let ranked = options
        .iter()
        .sorted_by(|a, b| {
            b.cost_effectiveness()
                .value()
                .total_cmp(&a.cost_effectiveness().value())
        })
        .collect_vec();

    let mut remaining_energy = target_energy;
    let mut total_cost = Money(0.0);
    let mut total_annual_om = Money(0.0);
    let mut selected = Vec::new();

    for option in ranked {
        if remaining_energy <= Energy(0.0) || total_cost >= budget {
            break;
        }

        // Cap by what the remaining budget buys and by what the gap still needs
        let affordable = (budget - total_cost) / option.capital_cost_per_kw;
        let needed = remaining_energy / option.annual_yield();
        let allocated = affordable.min(needed);
        if allocated <= MIN_ALLOCATION {
            continue;
        }

        let cost = allocated * option.capital_cost_per_kw;
        let generation = allocated * option.annual_yield();
        total_cost += cost;
        total_annual_om += allocated * option.annual_om_cost_per_kw;
        remaining_energy -= generation;

        debug!(
            "Allocated {:.1} kW of {} for {}",
            allocated.value(),
            option.technology,
            profile.community_name
        );
        selected.push(MixItem {
            technology: option.technology,
            capacity_kw: round_to_places(allocated.value(), 1),
            cost_cad: cost.value().round(),
            annual_generation_kwh: generation.value().round(),
        });
    }

    // Feasibility is judged against a 90% tolerance band around the nominal target
    let achieved_energy = target_energy - remaining_energy;
    let achieved_percent = (achieved_energy / current_diesel_energy).0 * 100.0;
    let feasible =
        achieved_percent >= constraints.diesel_reduction_target_percent * FEASIBILITY_TOLERANCE;
    if !feasible {
        warnings.push(format!(
            "Only achieved {achieved_percent:.1}% diesel reduction (target: {}%)",
            constraints.diesel_reduction_target_percent
        ));
        warnings.push("Consider: Increase budget, reduce target, or extend timeline".to_string());
    }

    let diesel_saved = achieved_energy / DIESEL_KWH_PER_LITRE;
    let annual_savings = diesel_saved * diesel_price - total_annual_om;
    // Divisor floored at one dollar, so zero or negative savings cannot blow up
    let payback_years = (total_cost / annual_savings.max(Money(1.0))).0;
    let co2_reduction = diesel_saved * MassPerLitre(DIESEL_CO2_KG_PER_LITRE / 1000.0);

    let reliability_score = reliability_score(&selected);
    let has_storage = selected
        .iter()
        .any(|item| item.technology == TechnologyType::BatteryStorage);
    let has_intermittent = selected.iter().any(|item| {
        matches!(
            item.technology,
            TechnologyType::Solar | TechnologyType::Wind
        )
    });
    if !has_storage && has_intermittent {
        warnings.push(
            "Consider adding battery storage to improve reliability of intermittent renewables"
                .to_string(),
        );
    }

    let timeline = build_timeline(&selected, constraints.max_implementation_years);

    let assumptions = vec![
        format!(
            "Diesel generator efficiency: {} kWh/L",
            DIESEL_KWH_PER_LITRE.value()
        ),
        format!("Northern cost multiplier: {}x", NORTHERN_COST_MULTIPLIER.0),
        format!(
            "Current diesel price: ${:.2}/L",
            profile.diesel_price_per_litre
        ),
        "Costs include transportation and installation for remote location".to_string(),
        "Capacity factors are annual averages (seasonal variation applies)".to_string(),
    ];

    let confidence = if feasible && payback_years < HIGH_CONFIDENCE_PAYBACK {
        Confidence::High
    } else if payback_years < MEDIUM_CONFIDENCE_PAYBACK {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    Ok(TransitionPlan {
        success: true,
        feasible,
        total_cost_cad: total_cost.value().round(),
        annual_savings_cad: annual_savings.value().round(),
        payback_period_years: round_to_places(payback_years, 1),
        diesel_reduction_percent: round_to_places(achieved_percent, 1),
        co2_reduction_tonnes_annual: round_to_places(co2_reduction.value(), 1),
        recommended_mix: selected,
        timeline,
        reliability_score,
        confidence,
        warnings,
        assumptions,
    })
}

/// Heuristic reliability score: base 60, +20 for a diversified mix, +20 for storage.
///
/// Not a physical simulation; it rewards properties that make a mix easier to operate.
fn reliability_score(mix: &[MixItem]) -> u32 {
    let mut score = BASE_RELIABILITY;
    if mix.len() > 1 {
        score += DIVERSITY_BONUS;
    }
    if mix
        .iter()
        .any(|item| item.technology == TechnologyType::BatteryStorage)
    {
        score += STORAGE_BONUS;
    }
    score.min(100)
}

/// Distributes line items evenly across at most [`MAX_ROLLOUT_YEARS`] years.
fn build_timeline(mix: &[MixItem], max_implementation_years: u32) -> Vec<TimelineEntry> {
    let rollout_years = max_implementation_years.clamp(1, MAX_ROLLOUT_YEARS) as usize;
    let items_per_year = mix.len().div_ceil(rollout_years).max(1);

    mix.iter()
        .enumerate()
        .map(|(idx, item)| TimelineEntry {
            year: (idx / items_per_year + 1) as u32,
            action: format!(
                "Install {:.1} kW {} capacity",
                item.capacity_kw, item.technology
            ),
            cost_cad: item.cost_cad,
        })
        .collect()
}
