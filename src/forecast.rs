//! Forecast accuracy metrics and naive baseline comparisons.
//!
//! Everything here is a pure function over numeric slices with "fail soft" semantics:
//! empty, mismatched or too-short inputs produce zero-valued results rather than
//! errors, so a dashboard panel can always render a placeholder while history
//! accumulates. The bootstrap confidence interval is the one stochastic routine and
//! takes an injectable random source so callers can seed it.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

pub mod point;

/// Default seasonal period for the seasonal-naive baseline: one week of hourly data
pub const DEFAULT_SEASONAL_PERIOD: usize = 168;

/// Default confidence level for bootstrap intervals
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Default number of bootstrap resamples
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 1000;

/// MAE, MAPE and RMSE for one forecast series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ErrorTriple {
    /// Mean absolute error
    pub mae: f64,
    /// Mean absolute percentage error
    pub mape: f64,
    /// Root mean square error
    pub rmse: f64,
}

/// Empirical bounds of a bootstrap confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CiBounds {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
}

/// Full baseline comparison for one forecast model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineMetrics {
    /// The model's own error metrics
    pub model: ErrorTriple,
    /// Persistence-baseline error metrics
    pub persistence: ErrorTriple,
    /// Seasonal-naive-baseline error metrics
    pub seasonal_naive: ErrorTriple,
    /// Percentage improvement of the model over persistence
    pub uplift_vs_persistence: f64,
    /// Percentage improvement of the model over seasonal naive
    pub uplift_vs_seasonal_naive: f64,
    /// Number of samples compared
    pub sample_count: usize,
    /// 95% bootstrap interval on the model's mean absolute error
    pub confidence: CiBounds,
}

/// Mean absolute error. Returns 0 for empty or mismatched inputs.
pub fn calculate_mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return 0.0;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();
    sum / actual.len() as f64
}

/// Mean absolute percentage error. Returns 0 for empty or mismatched inputs.
///
/// Terms with a zero actual contribute zero rather than dividing by zero, which
/// slightly understates MAPE when zeros are present. Known caveat, kept deliberately.
pub fn calculate_mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return 0.0;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| if *a == 0.0 { 0.0 } else { ((a - p) / a).abs() })
        .sum();
    sum / actual.len() as f64 * 100.0
}

/// Root mean square error. Returns 0 for empty or mismatched inputs.
pub fn calculate_rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return 0.0;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    (sum / actual.len() as f64).sqrt()
}

/// All three error metrics for one (actual, predicted) pair of series
pub fn calculate_errors(actual: &[f64], predicted: &[f64]) -> ErrorTriple {
    ErrorTriple {
        mae: calculate_mae(actual, predicted),
        mape: calculate_mape(actual, predicted),
        rmse: calculate_rmse(actual, predicted),
    }
}

/// Persistence baseline at the given lead time: the value at `t` predicts `t + horizon`.
///
/// Returns all-zero metrics if the series is too short for even one pair.
pub fn calculate_persistence_baseline(actual: &[f64], horizon: usize) -> ErrorTriple {
    if actual.len() <= horizon {
        return ErrorTriple::default();
    }
    let forecasts = &actual[..actual.len() - horizon];
    let actuals = &actual[horizon..];
    calculate_errors(actuals, forecasts)
}

/// Seasonal-naive baseline: the value one seasonal period ago predicts now, offset by
/// `horizon`. With the default period of 168 hours this captures weekly patterns.
///
/// Returns all-zero metrics if the series does not span a full period plus horizon.
pub fn calculate_seasonal_naive_baseline(
    actual: &[f64],
    horizon: usize,
    seasonal_period: usize,
) -> ErrorTriple {
    if actual.len() <= seasonal_period + horizon {
        return ErrorTriple::default();
    }
    let pairs = actual.len() - seasonal_period - horizon;
    let forecasts = &actual[..pairs];
    let actuals = &actual[seasonal_period + horizon..];
    calculate_errors(actuals, forecasts)
}

/// Percentage improvement of the model's error over a baseline's.
///
/// A zero baseline makes the improvement undefined; that is treated as neutral (0).
pub fn calculate_uplift(model_mae: f64, baseline_mae: f64) -> f64 {
    if baseline_mae == 0.0 {
        return 0.0;
    }
    (baseline_mae - model_mae) / baseline_mae * 100.0
}

/// Skill score `1 - model/baseline`: 1 is perfect, 0 matches the baseline, negative is
/// worse than the baseline. A zero baseline yields 0.
pub fn calculate_skill_score(model_mae: f64, baseline_mae: f64) -> f64 {
    if baseline_mae == 0.0 {
        return 0.0;
    }
    1.0 - model_mae / baseline_mae
}

/// Nonparametric bootstrap interval on the mean of `errors`, using the supplied random
/// source. Resamples with replacement `n_bootstrap` times and reports the empirical
/// `(alpha/2, 1 - alpha/2)` quantiles of the resampled means.
pub fn calculate_bootstrap_ci_with_rng(
    errors: &[f64],
    confidence: f64,
    n_bootstrap: usize,
    rng: &mut impl Rng,
) -> CiBounds {
    if errors.is_empty() || n_bootstrap == 0 {
        return CiBounds::default();
    }

    let n = errors.len();
    let mut means = Vec::with_capacity(n_bootstrap);
    for _ in 0..n_bootstrap {
        let sum: f64 = (0..n).map(|_| errors[rng.random_range(0..n)]).sum();
        means.push(sum / n as f64);
    }
    means.sort_by(f64::total_cmp);

    let alpha = 1.0 - confidence;
    let lower_idx = ((alpha / 2.0) * n_bootstrap as f64).floor() as usize;
    let upper_idx = ((1.0 - alpha / 2.0) * n_bootstrap as f64).floor() as usize;
    CiBounds {
        lower: means[lower_idx.min(n_bootstrap - 1)],
        upper: means[upper_idx.min(n_bootstrap - 1)],
    }
}

/// [`calculate_bootstrap_ci_with_rng`] with a freshly seeded generator.
pub fn calculate_bootstrap_ci(errors: &[f64], confidence: f64, n_bootstrap: usize) -> CiBounds {
    let mut rng = SmallRng::from_os_rng();
    calculate_bootstrap_ci_with_rng(errors, confidence, n_bootstrap, &mut rng)
}

/// Compares a model's predictions to the persistence and seasonal-naive baselines.
///
/// This is the orchestrating entry point: it bundles the model's own metrics, both
/// baselines, the uplift against each, the sample count and a bootstrap interval on
/// the model's absolute errors.
pub fn compare_to_baselines(
    actual: &[f64],
    model_predictions: &[f64],
    horizon: usize,
) -> BaselineMetrics {
    let model = calculate_errors(actual, model_predictions);
    let persistence = calculate_persistence_baseline(actual, horizon);
    let seasonal_naive = calculate_seasonal_naive_baseline(actual, horizon, DEFAULT_SEASONAL_PERIOD);

    let abs_errors: Vec<f64> = actual
        .iter()
        .zip(model_predictions)
        .map(|(a, p)| (a - p).abs())
        .collect();
    let confidence = calculate_bootstrap_ci(&abs_errors, DEFAULT_CONFIDENCE, DEFAULT_BOOTSTRAP_SAMPLES);

    BaselineMetrics {
        model,
        uplift_vs_persistence: calculate_uplift(model.mae, persistence.mae),
        uplift_vs_seasonal_naive: calculate_uplift(model.mae, seasonal_naive.mae),
        persistence,
        seasonal_naive,
        sample_count: actual.len(),
        confidence,
    }
}

/// A forecast source with an industry-standard accuracy target
#[derive(Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum)]
pub enum ForecastSource {
    #[string = "solar"]
    Solar,
    #[string = "wind"]
    Wind,
}

/// Whether a forecast meets its industry accuracy standard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndustryCompliance {
    /// Whether the MAE is at or below the target
    pub meets: bool,
    /// The target MAE for this source type
    pub target: f64,
    /// Headroom below the target (negative when failing)
    pub margin: f64,
}

/// Grades a forecast MAE against fixed industry targets: solar 6%, wind 8%.
///
/// The boundary is inclusive: exactly hitting the target passes.
pub fn meets_industry_standard(mae: f64, source: ForecastSource) -> IndustryCompliance {
    let target = match source {
        ForecastSource::Solar => 6.0,
        ForecastSource::Wind => 8.0,
    };
    IndustryCompliance {
        meets: mae <= target,
        target,
        margin: target - mae,
    }
}
