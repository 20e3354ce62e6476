//! End-to-end checks of the planning library against hand-computed scenarios.
use arcticmix::community::{CommunityEnergyProfile, Preset};
use arcticmix::optimisation::optimise_diesel_to_renewable;
use arcticmix::technology::{HOURS_PER_YEAR, TechnologyType, default_catalog};
use float_cmp::assert_approx_eq;

fn old_crow() -> CommunityEnergyProfile {
    CommunityEnergyProfile {
        community_name: "Old Crow".to_string(),
        diesel_consumption_litres_annual: 1_000_000.0,
        diesel_price_per_litre: 1.5,
        population: 250,
        current_renewable_capacity_kw: 0.0,
        grid_connected: false,
    }
}

/// The moderate/solar-only scenario is small enough to verify by hand: the $2M budget
/// buys 444.4 kW of solar at $4500/kW, well short of the 4756.5 kW needed to displace
/// half of 10 GWh per year at a 12% capacity factor.
#[test]
fn test_moderate_solar_scenario_by_hand() {
    let plan = optimise_diesel_to_renewable(
        &old_crow(),
        &Preset::ModerateTransition.constraints(),
        &[TechnologyType::Solar],
        &default_catalog(),
    );

    let needed_capacity_kw = (1_000_000.0 * 10.0 * 0.5) / (0.12 * HOURS_PER_YEAR);
    assert_approx_eq!(f64, needed_capacity_kw, 4756.4687975646875, epsilon = 1e-9);

    let affordable_kw: f64 = 2_000_000.0 / 4500.0;
    assert!(plan.success);
    assert!(!plan.feasible);
    assert_eq!(plan.recommended_mix.len(), 1);
    assert_approx_eq!(
        f64,
        plan.recommended_mix[0].capacity_kw,
        (affordable_kw * 10.0).round() / 10.0
    );
    assert_eq!(plan.total_cost_cad, 2_000_000.0);
}

/// With the default menu, battery storage ranks first on kWh-per-dollar and closes the
/// moderate target inside budget.
#[test]
fn test_moderate_default_menu_is_feasible() {
    let plan = optimise_diesel_to_renewable(
        &old_crow(),
        &Preset::ModerateTransition.constraints(),
        &[
            TechnologyType::Solar,
            TechnologyType::Wind,
            TechnologyType::BatteryStorage,
        ],
        &default_catalog(),
    );

    assert!(plan.success);
    assert!(plan.feasible);
    assert_eq!(
        plan.recommended_mix[0].technology,
        TechnologyType::BatteryStorage
    );
    assert_approx_eq!(f64, plan.diesel_reduction_percent, 50.0, epsilon = 0.1);
    assert!(plan.total_cost_cad <= 2_000_000.0 + 1.0);
}
