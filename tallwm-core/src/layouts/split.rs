//! Integer splitting shared by the layouts.

/// Split `total` pixels into one length per share, proportional to the shares.
///
/// Boundaries are rounded from the cumulative share, so the lengths always sum
/// to exactly `total` and no pixel is lost or doubled between neighbours.
#[must_use]
pub fn split_length(total: i32, shares: &[f64]) -> Vec<i32> {
    let sum: f64 = shares.iter().sum();
    if shares.is_empty() {
        return vec![];
    }
    if sum <= 0.0 {
        return split_evenly(total, shares.len());
    }
    let mut lengths = Vec::with_capacity(shares.len());
    let mut cumulative = 0.0;
    let mut previous = 0;
    for (i, share) in shares.iter().enumerate() {
        cumulative += share;
        let boundary = if i + 1 == shares.len() {
            total
        } else {
            (f64::from(total) * cumulative / sum).round() as i32
        };
        lengths.push(boundary - previous);
        previous = boundary;
    }
    lengths
}

#[must_use]
pub fn split_evenly(total: i32, count: usize) -> Vec<i32> {
    split_length(total, &vec![1.0; count])
}

/// Turn lengths into `(offset, length)` pairs starting at `origin`.
pub fn offsets(origin: i32, lengths: &[i32]) -> impl Iterator<Item = (i32, i32)> + '_ {
    lengths.iter().scan(origin, |next, &len| {
        let start = *next;
        *next += len;
        Some((start, len))
    })
}
