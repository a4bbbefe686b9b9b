//! Token value generation
//!
//! A round's tokens are `count` integers in `[1, bound)` such that
//! - no three of them sum to `bound` or more, and
//! - exactly one unordered triple `{a, b, c}` has one member equal to the sum
//!   of the other two.
//!
//! Values come from rejection sampling over whole sequences, capped at a
//! caller-supplied number of attempts.

use rand::Rng;

use crate::error::GenerateError;

/// Smallest bound that admits any solution (`1 + 1 = 2`, sum 4 < bound)
const MIN_FEASIBLE_BOUND: u32 = 5;

/// Draw a valid token sequence
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    bound: u32,
    max_attempts: u32,
) -> Result<Vec<u32>, GenerateError> {
    if count < 3 || bound < MIN_FEASIBLE_BOUND {
        return Err(GenerateError::Infeasible { count, bound });
    }

    let mut values = vec![0u32; count];
    for attempt in 1..=max_attempts {
        for v in values.iter_mut() {
            *v = rng.random_range(1..bound);
        }
        if !sums_below_bound(&values, bound) {
            continue;
        }
        if count_addition_triples(&values) == 1 {
            log::debug!("Token set {:?} accepted after {} attempts", values, attempt);
            return Ok(values);
        }
    }

    log::warn!(
        "Gave up generating {} tokens below {} after {} attempts",
        count,
        bound,
        max_attempts
    );
    Err(GenerateError::Exhausted {
        count,
        bound,
        attempts: max_attempts,
    })
}

/// No three values sum to `bound` or more
///
/// Checking the three largest covers every triple.
pub fn sums_below_bound(values: &[u32], bound: u32) -> bool {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let top: u64 = sorted.iter().take(3).map(|&v| u64::from(v)).sum();
    top < u64::from(bound)
}

/// The sum member of `{a, b, c}` if one member is the sum of the other two
fn sum_member(a: u32, b: u32, c: u32) -> Option<u32> {
    let (a64, b64, c64) = (u64::from(a), u64::from(b), u64::from(c));
    if a64 + b64 == c64 {
        Some(c)
    } else if a64 + c64 == b64 {
        Some(b)
    } else if b64 + c64 == a64 {
        Some(a)
    } else {
        None
    }
}

/// Index triples `i < j < k`
fn triples(n: usize) -> impl Iterator<Item = (usize, usize, usize)> {
    (0..n).flat_map(move |i| {
        (i + 1..n).flat_map(move |j| (j + 1..n).map(move |k| (i, j, k)))
    })
}

/// Number of index triples where one value is the sum of the other two
pub fn count_addition_triples(values: &[u32]) -> usize {
    triples(values.len())
        .filter(|&(i, j, k)| sum_member(values[i], values[j], values[k]).is_some())
        .count()
}

/// The solving equation `(addend, addend, sum)`, smaller addend first
///
/// Returns the first match in index order; for a valid token set it is the
/// only one.
pub fn find_solution(values: &[u32]) -> Option<(u32, u32, u32)> {
    triples(values.len()).find_map(|(i, j, k)| {
        let (a, b, c) = (values[i], values[j], values[k]);
        let sum = sum_member(a, b, c)?;
        let mut addends = [a, b, c];
        // Drop the sum member once; duplicates of it may still be addends
        let pos = addends.iter().position(|&v| v == sum)?;
        addends.swap(pos, 2);
        let (x, y) = (addends[0].min(addends[1]), addends[0].max(addends[1]));
        Some((x, y, sum))
    })
}

/// Whether `values` satisfies every generator constraint for `bound`
pub fn is_valid_token_set(values: &[u32], bound: u32) -> bool {
    values.len() >= 3
        && values.iter().all(|&v| v >= 1 && v < bound)
        && sums_below_bound(values, bound)
        && count_addition_triples(values) == 1
}
