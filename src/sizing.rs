//! Group size partitioning.
//!
//! Splits a roster of `n` members into group sizes close to an optimal size.
//! When `n` is not a multiple of the optimal size, the leftover members
//! either form smaller groups (members are moved out of the largest groups
//! into the remainder group) or are absorbed into larger groups (the
//! remainder group is drained into its neighbours).
//!
//! # Algorithm
//!
//! 1. `q = n / s` full groups of size `s`, plus one group of `r = n mod s`.
//! 2. Prefer smaller: move one member from the largest to the smallest group
//!    until every pair of sizes differs by at most one.
//! 3. Prefer larger: move one member from the smallest to the second-smallest
//!    group until every pair differs by at most one, dropping empty groups.
//!
//! Ties pick the first occurrence. The result is sorted ascending.
//!
//! # Complexity
//! O(g * m) where g = group count, m = number of moves (bounded by `s`).

/// Computes group sizes for a roster.
///
/// # Arguments
/// * `roster_size` - Number of members to partition.
/// * `optimal_size` - Preferred group size. Zero is treated as "one group".
/// * `prefer_smaller` - Resolve a remainder by shrinking groups (`true`)
///   or by growing them (`false`).
///
/// # Example
/// ```
/// use u_grouping::sizing::group_sizes;
///
/// assert_eq!(group_sizes(21, 4, true), vec![3, 3, 3, 4, 4, 4]);
/// assert_eq!(group_sizes(21, 4, false), vec![4, 4, 4, 4, 5]);
/// ```
pub fn group_sizes(roster_size: usize, optimal_size: usize, prefer_smaller: bool) -> Vec<usize> {
    if optimal_size == 0 || roster_size < optimal_size {
        return vec![roster_size];
    }

    let full_groups = roster_size / optimal_size;
    let remainder = roster_size - full_groups * optimal_size;

    let mut sizes = vec![optimal_size; full_groups];
    if remainder > 0 {
        sizes.push(remainder);
        if prefer_smaller {
            shrink_to_balance(&mut sizes);
        } else {
            grow_to_balance(&mut sizes);
        }
    }

    sizes.sort_unstable();
    sizes
}

/// Moves members from the largest group into the smallest until balanced.
fn shrink_to_balance(sizes: &mut [usize]) {
    while spread(sizes) >= 2 {
        let (smallest, largest) = extreme_indices(sizes);
        sizes[largest] -= 1;
        sizes[smallest] += 1;
    }
}

/// Drains the smallest group into the second-smallest until balanced.
fn grow_to_balance(sizes: &mut Vec<usize>) {
    while spread(sizes) >= 2 {
        let (smallest, second) = two_smallest_indices(sizes);
        sizes[second] += 1;
        sizes[smallest] -= 1;
        if sizes[smallest] == 0 {
            sizes.remove(smallest);
        }
    }
}

/// Largest difference between any two sizes (zero for empty input).
pub(crate) fn spread(sizes: &[usize]) -> usize {
    match (sizes.iter().min(), sizes.iter().max()) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    }
}

/// Indices of the (smallest, largest) entries, first occurrence on ties.
fn extreme_indices(sizes: &[usize]) -> (usize, usize) {
    let mut smallest = 0;
    let mut largest = 0;
    for (i, &size) in sizes.iter().enumerate() {
        if size < sizes[smallest] {
            smallest = i;
        }
        if size > sizes[largest] {
            largest = i;
        }
    }
    (smallest, largest)
}

/// Indices of the (smallest, second-smallest) entries.
///
/// The second smallest is searched with the smallest excluded, so duplicate
/// minima resolve to the next occurrence.
fn two_smallest_indices(sizes: &[usize]) -> (usize, usize) {
    let (smallest, _) = extreme_indices(sizes);
    let second = sizes
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != smallest)
        .fold(None, |best: Option<(usize, usize)>, (i, &size)| match best {
            Some((_, best_size)) if best_size <= size => best,
            _ => Some((i, size)),
        })
        .map_or(smallest, |(i, _)| i);
    (smallest, second)
}
