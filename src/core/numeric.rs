//! Rounding and tolerance helpers

/// Slack absorbed by every tolerance comparison so that values printed as
/// exactly on the boundary (e.g. a 99% mixture) are accepted.
const TOLERANCE_SLACK: f64 = 1e-9;

/// Round to `digits` decimal places; exact halves go to the even digit
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}

/// Check `|value - target| <= tolerance`
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance + TOLERANCE_SLACK
}

/// Divide, falling back to zero when the denominator vanishes
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    }
}

/// Arithmetic mean; an empty slice yields zero
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Component-wise weighted arithmetic mean of fixed-size vectors
///
/// Returns `None` when the weights sum to zero.
pub fn weighted_mean<const N: usize>(items: &[([f64; N], f64)]) -> Option<[f64; N]> {
    let total: f64 = items.iter().map(|(_, w)| w).sum();
    if total.abs() < f64::EPSILON {
        return None;
    }
    let mut acc = [0.0f64; N];
    for (values, weight) in items {
        for (slot, v) in acc.iter_mut().zip(values.iter()) {
            *slot += v * weight;
        }
    }
    for slot in acc.iter_mut() {
        *slot /= total;
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666_666, 1), 66.7);
        assert_eq!(round_to(0.123_45, 3), 0.123);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_round_to_ties_go_to_even() {
        assert_eq!(round_to(0.0625, 3), 0.062);
        assert_eq!(round_to(62.25, 1), 62.2);
        assert_eq!(round_to(62.75, 1), 62.8);
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
    }

    #[test]
    fn test_within_tolerance_accepts_boundary() {
        assert!(within_tolerance(0.99, 1.0, 0.01));
        assert!(within_tolerance(1.01, 1.0, 0.01));
        assert!(!within_tolerance(0.98, 1.0, 0.01));
        assert!(!within_tolerance(0.9, 1.0, 0.01));
    }

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(ratio_or_zero(1.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(1.0, 4.0), 0.25);
    }

    #[test]
    fn test_weighted_mean() {
        let items = [([1.0, 2.0], 1.0), ([3.0, 4.0], 3.0)];
        let m = weighted_mean(&items).unwrap();
        assert!((m[0] - 2.5).abs() < 1e-12);
        assert!((m[1] - 3.5).abs() < 1e-12);
        assert!(weighted_mean::<2>(&[([1.0, 1.0], 0.0)]).is_none());
    }
}
