//! Fixtures for tests

use crate::community::CommunityEnergyProfile;
use crate::technology::{TechnologyCatalog, default_catalog};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn profile() -> CommunityEnergyProfile {
    CommunityEnergyProfile {
        community_name: "Old Crow".to_string(),
        diesel_consumption_litres_annual: 1_000_000.0,
        diesel_price_per_litre: 1.5,
        population: 250,
        current_renewable_capacity_kw: 0.0,
        grid_connected: false,
    }
}

#[fixture]
pub fn catalog() -> TechnologyCatalog {
    default_catalog()
}
