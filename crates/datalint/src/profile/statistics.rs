//! Shared statistical helpers used by the profiler and the validators.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::input::{Column, Value};
use crate::schema::{NumericStatistics, TopValue, ValueKind};

// =============================================================================
// STREAMING MOMENTS
// =============================================================================
// Welford's online algorithm for computing mean and variance in a single pass.

/// Streaming mean/variance accumulator using Welford's algorithm.
#[derive(Debug, Clone)]
struct StreamingStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
}

impl StreamingStats {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Population variance.
    fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    fn std(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Compute min/max/mean/std and quartiles. Returns `None` for no values.
pub fn numeric_statistics(values: &[f64]) -> Option<NumericStatistics> {
    if values.is_empty() {
        return None;
    }

    let (mean, std) = moments(values);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);

    Some(NumericStatistics {
        min,
        max,
        mean: mean.clamp(min, max),
        std,
        q1: quantile_sorted(&sorted, 0.25),
        q3: quantile_sorted(&sorted, 0.75),
    })
}

/// Population mean and std of non-empty data.
///
/// Values near `f64::MAX` overflow the squared deltas, so on a non-finite
/// result the pass is repeated on values divided by the largest magnitude.
fn moments(values: &[f64]) -> (f64, f64) {
    let mut plain = StreamingStats::new();
    for &value in values {
        plain.add(value);
    }
    if plain.mean.is_finite() && plain.std().is_finite() {
        return (plain.mean, plain.std());
    }

    let scale = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let mut scaled = StreamingStats::new();
    for &value in values {
        scaled.add(value / scale);
    }
    (scaled.mean * scale, scaled.std() * scale)
}

/// Quantile of sorted data with linear interpolation between order statistics.
///
/// `p` is in [0, 1]; position is `p * (n - 1)`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = p.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            let (a, b) = (sorted[lo], sorted[hi]);
            let span = b - a;
            let value = if span.is_finite() {
                a + span * frac
            } else {
                a * (1.0 - frac) + b * frac
            };
            value.clamp(a, b)
        }
    }
}

/// Pearson correlation over paired samples.
///
/// `None` when fewer than two pairs, either side has zero variance, or the
/// sums overflow.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Rows where both columns hold a numeric reading.
pub fn paired_numeric(a: &Column, b: &Column) -> Vec<(f64, f64)> {
    a.values
        .iter()
        .zip(&b.values)
        .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
        .collect()
}

// =============================================================================
// VALUE CLASSIFICATION
// =============================================================================

/// Scalar kind of a value; `None` for missing.
pub fn value_kind(value: &Value) -> Option<ValueKind> {
    match value {
        Value::Missing => None,
        Value::Numeric(n) if n.is_finite() => Some(ValueKind::Numeric),
        Value::Numeric(_) => Some(ValueKind::Text),
        Value::Boolean(_) => Some(ValueKind::Boolean),
        Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.parse::<f64>().is_ok_and(|n| n.is_finite()) {
                Some(ValueKind::Numeric)
            } else if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
                Some(ValueKind::Boolean)
            } else {
                Some(ValueKind::Text)
            }
        }
    }
}

/// Distinct value kinds in a column, sorted.
pub fn observed_kinds(column: &Column) -> Vec<ValueKind> {
    let mut kinds: Vec<ValueKind> = column.values.iter().filter_map(value_kind).collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

/// Canonical key used for distinct counting and frequency tables.
///
/// Numbers are keyed by their parsed value so `"1.0"` and `1` collide.
pub fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::Missing => None,
        Value::Boolean(b) => Some(b.to_string()),
        Value::Numeric(n) => Some(number_key(*n)),
        Value::Text(s) => {
            let trimmed = s.trim();
            match value_kind(value) {
                Some(ValueKind::Numeric) => trimmed.parse::<f64>().ok().map(number_key),
                Some(ValueKind::Boolean) => Some(trimmed.to_ascii_lowercase()),
                _ => Some(trimmed.to_string()),
            }
        }
    }
}

/// `-0.0` compares equal to `0.0`, so both get the key `"0"`.
fn number_key(n: f64) -> String {
    if n == 0.0 { 0.0f64 } else { n }.to_string()
}

/// Count non-missing values by key, in first-seen order.
pub fn frequency_table(column: &Column) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for key in column.values.iter().filter_map(value_key) {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Top `limit` entries by frequency; ties keep first-seen order.
pub fn top_values(counts: &IndexMap<String, usize>, limit: usize) -> Vec<TopValue> {
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    // Stable sort keeps insertion order among equal counts
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .take(limit)
        .map(|(value, &frequency)| TopValue {
            value: value.clone(),
            frequency,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std() {
        let stats = numeric_statistics(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std - 2.0).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let stats = numeric_statistics(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        // positions 0.75 and 2.25 over [1, 2, 3, 4]
        assert!((stats.q1 - 1.75).abs() < 1e-12);
        assert!((stats.q3 - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_statistics() {
        let stats = numeric_statistics(&[7.0]).unwrap();
        assert_eq!(stats.q1, 7.0);
        assert_eq!(stats.q3, 7.0);
        assert_eq!(stats.std, 0.0);
        assert!(numeric_statistics(&[]).is_none());
    }

    #[test]
    fn test_extreme_magnitudes_stay_finite() {
        let mut values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        values.push(1.5e308);
        values.push(-1.5e308);
        let stats = numeric_statistics(&values).unwrap();

        assert!(stats.std.is_finite());
        assert!(stats.std > 0.0 && stats.std <= 1.5e308);
        assert!(stats.mean.is_finite());
        assert!(stats.min <= stats.q1 && stats.q1 <= stats.q3 && stats.q3 <= stats.max);
    }

    #[test]
    fn test_quartiles_between_opposite_extremes() {
        let q1 = quantile_sorted(&[-1.5e308, 1.5e308], 0.25);
        assert!((q1 + 0.75e308).abs() < 1e294);
        assert_eq!(quantile_sorted(&[-1.5e308, 1.5e308], 0.0), -1.5e308);
    }

    #[test]
    fn test_pearson_overflow_is_undefined() {
        let pairs = vec![(-1e308, -1e308), (1e308, 1e308)];
        assert!(pearson(&pairs).is_none());
    }

    #[test]
    fn test_pearson_perfect() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, i as f64 * 2.0 + 1.0)).collect();
        assert!((pearson(&pairs).unwrap() - 1.0).abs() < 1e-12);

        let inverse: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, -(i as f64))).collect();
        assert!((pearson(&inverse).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_undefined() {
        let pairs = vec![(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)];
        assert!(pearson(&pairs).is_none());
        assert!(pearson(&[(1.0, 1.0)]).is_none());
    }

    #[test]
    fn test_value_kind_of_text_numbers() {
        assert_eq!(value_kind(&Value::Text("3".into())), Some(ValueKind::Numeric));
        assert_eq!(value_kind(&Value::Text("True".into())), Some(ValueKind::Boolean));
        assert_eq!(value_kind(&Value::Text("x".into())), Some(ValueKind::Text));
        assert_eq!(value_kind(&Value::Missing), None);
    }

    #[test]
    fn test_value_key_canonicalizes_numbers() {
        assert_eq!(value_key(&Value::Numeric(1.0)), value_key(&Value::Text("1.0".into())));
    }

    #[test]
    fn test_negative_zero_shares_key_with_zero() {
        assert_eq!(value_key(&Value::Numeric(-0.0)).as_deref(), Some("0"));
        assert_eq!(value_key(&Value::Text("-0".into())).as_deref(), Some("0"));

        let column = Column::new("z", [0.0, -0.0, 0.0]);
        let table = frequency_table(&column);
        assert_eq!(table.len(), 1);
        assert_eq!(table["0"], 3);
    }

    #[test]
    fn test_top_values_ties_keep_first_seen() {
        let column = Column::new("c", ["b", "a", "a", "b", "c"]);
        let table = frequency_table(&column);
        let top = top_values(&table, 2);
        assert_eq!(top[0].value, "b");
        assert_eq!(top[1].value, "a");
        assert_eq!(top.len(), 2);
    }
}
