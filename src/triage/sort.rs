//! Stable merge sort parameterized by an arbitrary comparator.
//!
//! Top-down: each call splits its owned run at `len / 2`, sorts both
//! halves and merges them. Recursion depth is `ceil(log2(n))`. Each level
//! allocates O(n) for the merged runs.
//!
//! When the left and right heads compare `Equal` the left head is taken,
//! which keeps equal elements in input order.
//!
//! The split point is fixed. For a comparator that is not transitive the
//! result depends on the merge tree, so every entry point here uses the
//! same one.

use std::cmp::Ordering;

/// Below this length the parallel entry point sorts sequentially.
#[cfg(feature = "parallel")]
pub const PARALLEL_CUTOFF: usize = 4096;

/// Sorts `items` stably according to `cmp`.
///
/// # Examples
///
/// ```
/// use u_triage::triage::merge_sort_by;
///
/// let pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
/// let sorted = merge_sort_by(pairs, |a, b| a.0.cmp(&b.0));
/// assert_eq!(sorted, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
/// ```
pub fn merge_sort_by<T, F>(items: Vec<T>, mut cmp: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_run(items, &mut cmp)
}

fn sort_run<T, F>(mut items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = sort_run(items, cmp);
    let right = sort_run(right, cmp);
    merge(left, right, cmp)
}

/// Parallel form of [`merge_sort_by`].
///
/// The two halves of each split are sorted with `rayon::join`. Splits and
/// merges match the sequential sort, so the output is identical even for
/// a comparator that is not transitive.
#[cfg(feature = "parallel")]
pub fn par_merge_sort_by<T, F>(items: Vec<T>, cmp: F) -> Vec<T>
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    par_sort_run(items, &cmp)
}

#[cfg(feature = "parallel")]
fn par_sort_run<T, F>(mut items: Vec<T>, cmp: &F) -> Vec<T>
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if items.len() < PARALLEL_CUTOFF {
        return sort_run(items, &mut &*cmp);
    }

    let right = items.split_off(items.len() / 2);
    let (left, right) = rayon::join(|| par_sort_run(items, cmp), || par_sort_run(right, cmp));
    merge(left, right, &mut &*cmp)
}

/// Merges two sorted runs, preferring the left head on ties.
fn merge<T, F>(left: Vec<T>, right: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(l, r) != Ordering::Greater,
            _ => break,
        };
        if take_left {
            merged.extend(left.next());
        } else {
            merged.extend(right.next());
        }
    }

    merged.extend(left);
    merged.extend(right);
    merged
}
