//! Fast-track shortlist selection.
//!
//! The shortlist is pure greedy-by-cost: descending priority cost, ties by
//! ascending arrival index. The hard safety rule is deliberately not
//! consulted here.

use super::comparator::PriorityComparator;
use super::types::CostedRequest;
use crate::error::{Result, TriageError};
use std::collections::HashSet;

/// Number of requests to fast-track for a batch of `len`.
///
/// `max(1, ceil(fraction * len))`, clamped to `len`. An empty batch gives 0.
///
/// # Examples
///
/// ```
/// use u_triage::triage::shortlist_size;
///
/// assert_eq!(shortlist_size(0.0, 4), 1);
/// assert_eq!(shortlist_size(0.2, 10), 2);
/// assert_eq!(shortlist_size(0.25, 10), 3);
/// assert_eq!(shortlist_size(1.0, 10), 10);
/// assert_eq!(shortlist_size(0.5, 0), 0);
/// ```
pub fn shortlist_size(fraction: f64, len: usize) -> usize {
    let wanted = (fraction * len as f64).ceil().max(1.0) as usize;
    wanted.min(len)
}

/// A batch split into the fast-track shortlist and everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected requests in selection order.
    pub shortlist: Vec<CostedRequest>,

    /// Requests not selected, in batch order.
    pub remainder: Vec<CostedRequest>,
}

/// Picks the `k` highest-cost requests of a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortlistSelector;

impl ShortlistSelector {
    /// Selects `k` requests and partitions the batch by identity.
    ///
    /// Membership is decided on the `(id, arrival_index)` pair, never on
    /// `id` alone.
    ///
    /// # Errors
    ///
    /// [`TriageError::ShortlistTooLarge`] if `k > batch.len()`.
    pub fn select(batch: Vec<CostedRequest>, k: usize) -> Result<Selection> {
        let shortlist = Self::top_k(&batch, k)?;

        let remainder: Vec<CostedRequest> = {
            let chosen: HashSet<(&str, u64)> = shortlist.iter().map(|c| c.identity()).collect();
            batch
                .into_iter()
                .filter(|c| !chosen.contains(&c.identity()))
                .collect()
        };

        Ok(Selection {
            shortlist,
            remainder,
        })
    }

    /// Returns copies of the `k` best requests by
    /// [`PriorityComparator::cost_order`], best first.
    ///
    /// Uses a partial selection so only the chosen `k` are fully sorted.
    pub fn top_k(batch: &[CostedRequest], k: usize) -> Result<Vec<CostedRequest>> {
        if k > batch.len() {
            return Err(TriageError::ShortlistTooLarge {
                k,
                len: batch.len(),
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut order: Vec<&CostedRequest> = batch.iter().collect();
        if k < order.len() {
            order.select_nth_unstable_by(k - 1, |a, b| PriorityComparator::cost_order(a, b));
            order.truncate(k);
        }
        order.sort_unstable_by(|a, b| PriorityComparator::cost_order(a, b));

        Ok(order.into_iter().cloned().collect())
    }
}
