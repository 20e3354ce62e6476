//! Common functionality for the arcticmix transition planner.
#![warn(missing_docs)]
pub mod cli;
pub mod community;
pub mod forecast;
pub mod input;
pub mod log;
pub mod optimisation;
pub mod output;
pub mod settings;
pub mod technology;
pub mod units;
pub mod utils;

#[cfg(test)]
mod fixture;
