//! Shared numeric helpers.

/// Rounds a value to the given number of decimal places.
///
/// Results are reported pre-rounded so all callers display the same figures; anything
/// finer is noise given the input data quality.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(444.444, 1, 444.4)]
    #[case(0.125, 2, 0.13)] // exactly representable tie, rounds up
    #[case(-1.25, 1, -1.3)] // f64::round ties away from zero
    #[case(1234.5678, 0, 1235.0)]
    #[case(0.0, 2, 0.0)]
    fn test_round_to_places(#[case] value: f64, #[case] places: u32, #[case] expected: f64) {
        assert_eq!(round_to_places(value, places), expected);
    }
}
