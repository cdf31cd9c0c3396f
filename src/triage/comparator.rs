//! Final-queue ordering of costed requests.

use super::types::CostedRequest;
use std::cmp::Ordering;

/// Ordering used to rank requests for final-queue placement.
///
/// `Less` means the first argument is served first. Decision procedure:
///
/// 1. **Hard safety rule**: a Tier1 request precedes any Tier3/Tier4
///    request, whatever the costs.
/// 2. Higher priority cost first.
/// 3. Lower arrival index first.
///
/// Only the {Tier1, Tier3-or-4} pairing triggers step 1. Tier1 vs Tier2
/// and Tier2 vs anything are decided by cost alone.
///
/// Since arrival indices are unique within a validated batch, two distinct
/// requests never compare `Equal`.
///
/// The rule is not transitive when a Tier2 request bridges the pair: with
/// costs `T3 > T2 > T1` the comparator says `T1 < T3`, `T3 < T2` and
/// `T2 < T1`. A merge sort over such a cycle may leave the Tier1 request
/// behind the Tier3 one; [`BoundaryPolicy::Enforce`](super::BoundaryPolicy)
/// repairs that after the fact.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityComparator;

impl PriorityComparator {
    /// Full ordering: hard rule, then cost, then arrival.
    pub fn compare(a: &CostedRequest, b: &CostedRequest) -> Ordering {
        Self::hard_rule(a, b).unwrap_or_else(|| Self::cost_order(a, b))
    }

    /// The safety override alone. `None` when the pair is not
    /// {Tier1, Tier3-or-4}.
    pub fn hard_rule(a: &CostedRequest, b: &CostedRequest) -> Option<Ordering> {
        use super::types::UrgencyTier::Tier1;

        let (ta, tb) = (a.urgency(), b.urgency());
        if ta == Tier1 && tb.is_low_acuity() {
            Some(Ordering::Less)
        } else if tb == Tier1 && ta.is_low_acuity() {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    /// Cost descending, then arrival ascending. No safety rule.
    ///
    /// This is also the shortlist selection key. Costs compare with
    /// [`f64::total_cmp`], so NaN costs still order deterministically.
    pub fn cost_order(a: &CostedRequest, b: &CostedRequest) -> Ordering {
        b.priority_cost()
            .total_cmp(&a.priority_cost())
            .then_with(|| a.arrival_index().cmp(&b.arrival_index()))
    }
}
