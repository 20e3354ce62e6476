//! Single-point naive forecasts with simple confidence bands.
//!
//! These produce one forecast value (not a series) for display next to a model's
//! prediction. Bands are normal-approximation intervals; when no historical standard
//! deviation is available, a method-specific fraction of the level stands in for it.
use serde::Serialize;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

/// 97.5th percentile of the standard normal, for 95% bands
const Z_95: f64 = 1.96;

/// Fallback variability as a fraction of the forecast level, per method.
///
/// Persistence drifts least over short horizons; the seasonal methods carry more
/// spread because they look further back.
const PERSISTENCE_VARIABILITY: f64 = 0.15;
const DAILY_VARIABILITY: f64 = 0.20;
const WEEKLY_VARIABILITY: f64 = 0.25;

/// Which naive method produced a point forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum)]
pub enum PointMethod {
    #[string = "persistence"]
    Persistence,
    #[string = "seasonal_naive_daily"]
    SeasonalNaiveDaily,
    #[string = "seasonal_naive_weekly"]
    SeasonalNaiveWeekly,
}

/// A single naive forecast value with its 95% band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointBaseline {
    /// The method that produced this forecast
    pub method: PointMethod,
    /// The forecast value
    pub predicted_value: f64,
    /// Lower bound of the 95% band, floored at zero
    pub lower: f64,
    /// Upper bound of the 95% band
    pub upper: f64,
}

fn with_band(method: PointMethod, value: f64, std_dev: f64) -> PointBaseline {
    PointBaseline {
        method,
        predicted_value: value,
        lower: (value - Z_95 * std_dev).max(0.0),
        upper: value + Z_95 * std_dev,
    }
}

/// Persistence: the current value continues. Effective at 1-3 hour horizons.
pub fn persistence_forecast(current_value: f64, historical_std_dev: Option<f64>) -> PointBaseline {
    let std_dev = historical_std_dev.unwrap_or(current_value * PERSISTENCE_VARIABILITY);
    with_band(PointMethod::Persistence, current_value, std_dev)
}

/// Seasonal naive (daily): the same hour yesterday repeats. Captures daily cycles.
pub fn seasonal_naive_daily_forecast(
    same_hour_yesterday: f64,
    historical_std_dev: Option<f64>,
) -> PointBaseline {
    let std_dev = historical_std_dev.unwrap_or(same_hour_yesterday * DAILY_VARIABILITY);
    with_band(PointMethod::SeasonalNaiveDaily, same_hour_yesterday, std_dev)
}

/// Seasonal naive (weekly): the same hour last week repeats. Captures weekday/weekend
/// patterns at longer horizons.
pub fn seasonal_naive_weekly_forecast(
    same_hour_last_week: f64,
    historical_std_dev: Option<f64>,
) -> PointBaseline {
    let std_dev = historical_std_dev.unwrap_or(same_hour_last_week * WEEKLY_VARIABILITY);
    with_band(PointMethod::SeasonalNaiveWeekly, same_hour_last_week, std_dev)
}

/// Picks the conventional baseline for a forecast horizon: persistence up to 3 hours,
/// daily seasonal naive up to 24, weekly beyond. Falls back to persistence when the
/// required history is missing.
pub fn select_baseline_for_horizon(
    horizon_hours: u32,
    current_value: f64,
    same_hour_yesterday: Option<f64>,
    same_hour_last_week: Option<f64>,
) -> PointBaseline {
    if horizon_hours <= 3 {
        persistence_forecast(current_value, None)
    } else if horizon_hours <= 24
        && let Some(yesterday) = same_hour_yesterday
    {
        seasonal_naive_daily_forecast(yesterday, None)
    } else if let Some(last_week) = same_hour_last_week {
        seasonal_naive_weekly_forecast(last_week, None)
    } else {
        persistence_forecast(current_value, None)
    }
}
