//! Grade rounding and subject statistics.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::SubjectStatistics;

/// Lowest valid grade.
pub const MIN_GRADE: f64 = 0.0;

/// Highest valid grade.
pub const MAX_GRADE: f64 = 10.0;

/// Grades strictly below this mark count as low performance.
pub const LOW_GRADE_THRESHOLD: Decimal = dec!(6.0);

/// Whether a submitted grade lies in `[MIN_GRADE, MAX_GRADE]`.
///
/// Checked on the parsed number, before any conversion can truncate it.
pub fn is_valid_grade(grade: f64) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&grade)
}

/// Round to one decimal place, halves to even.
pub fn round_grade(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
}

/// Stored form of a submitted grade.
///
/// Rounds the exact binary value of `value`, so 7.35 (stored as
/// 7.3499999...) becomes 7.3 and 0.05 (0.05000000...277) becomes 0.1.
/// `None` for values a `Decimal` cannot hold.
pub fn grade_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value).map(round_grade)
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Median; the mean of the two middle values when the count is even.
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    }
}

/// Sample standard deviation (N-1 denominator). `None` below two values.
pub fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let squares: Decimal = values
        .iter()
        .map(|value| {
            let delta = *value - avg;
            delta * delta
        })
        .sum();
    let variance = squares / Decimal::from(values.len() - 1);
    variance.sqrt()
}

/// Mean, median and sample standard deviation, each rounded to one place.
///
/// `None` when fewer than two values are given.
pub fn summarize(values: &[Decimal]) -> Option<SubjectStatistics> {
    let std_dev = sample_std_dev(values)?;
    Some(SubjectStatistics {
        mean: round_grade(mean(values)?),
        median: round_grade(median(values)?),
        std_dev: round_grade(std_dev),
    })
}
