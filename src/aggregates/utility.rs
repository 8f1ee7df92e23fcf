/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample standard deviation given a pre-computed mean.
/// Returns 0.0 for groups with fewer than two values.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Median of a list of values. Takes the vector by value so it can sort
/// in place. Returns 0.0 for empty input.
pub fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Rounds to two decimal places, the precision shown on dashboard tiles.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[10.0, 20.0, 30.0]), 20.0);
    }

    #[test]
    fn test_stddev_constant_series_is_zero() {
        let vals = [5.0, 5.0, 5.0];
        assert_eq!(stddev(&vals, mean(&vals)), 0.0);
    }

    #[test]
    fn test_stddev_sample_divisor() {
        // Sample stddev of [2, 4] is sqrt(2), not 1
        let vals = [2.0, 4.0];
        assert!((stddev(&vals, mean(&vals)) - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_stddev_single_value_is_zero() {
        assert_eq!(stddev(&[7.0], 7.0), 0.0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(vec![]), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(20.004), 20.0);
        assert_eq!(round2(20.006), 20.01);
        assert_eq!(round2(4.1), 4.1);
    }
}
