//! Queue construction pipeline.
//!
//! [`QueueBuilder`] runs the full pipeline:
//! validate → cost → select shortlist → sort remainder → concatenate →
//! apply boundary policy.

use super::comparator::PriorityComparator;
use super::config::{BoundaryPolicy, QueueConfig, Weights};
use super::cost::CostModel;
use super::report::{find_safety_violations, SafetyViolation};
use super::shortlist::{shortlist_size, Selection, ShortlistSelector};
use super::sort::merge_sort_by;
use super::types::{CostedRequest, Lane, QueueEntry, Request, UrgencyTier};
use crate::error::{Result, TriageError};
use std::collections::HashMap;
use tracing::{debug, debug_span, trace, warn};

/// An ordered treatment queue.
///
/// Always a permutation of the batch it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriageQueue {
    entries: Vec<QueueEntry>,
}

impl TriageQueue {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueueEntry> {
        self.entries.iter()
    }

    /// Number of fast-tracked entries.
    pub fn fast_tracked(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.lane == Lane::FastTrack)
            .count()
    }

    /// Fast-tracked requests in queue order.
    pub fn shortlist(&self) -> Vec<&CostedRequest> {
        self.in_lane(Lane::FastTrack)
    }

    /// Comparator-ordered requests in queue order.
    pub fn remainder(&self) -> Vec<&CostedRequest> {
        self.in_lane(Lane::Standard)
    }

    /// Request ids in queue order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.item.id()).collect()
    }

    /// Tier1 entries positioned behind a Tier3/Tier4 entry.
    ///
    /// Always empty under [`BoundaryPolicy::Enforce`].
    pub fn safety_violations(&self) -> Vec<SafetyViolation> {
        find_safety_violations(&self.entries)
    }

    pub fn into_requests(self) -> Vec<CostedRequest> {
        self.entries.into_iter().map(|e| e.item).collect()
    }

    fn in_lane(&self, lane: Lane) -> Vec<&CostedRequest> {
        self.entries
            .iter()
            .filter(|e| e.lane == lane)
            .map(|e| &e.item)
            .collect()
    }
}

impl<'a> IntoIterator for &'a TriageQueue {
    type Item = &'a QueueEntry;
    type IntoIter = std::slice::Iter<'a, QueueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds treatment queues from request batches.
///
/// # Usage
///
/// ```
/// use u_triage::triage::{QueueBuilder, QueueConfig, Request, UrgencyTier, Weights};
///
/// let batch = vec![
///     Request::new("A", UrgencyTier::Tier1, 5.0, 90.0, 0),
///     Request::new("B", UrgencyTier::Tier3, 100.0, 10.0, 1),
///     Request::new("C", UrgencyTier::Tier2, 10.0, 50.0, 2),
///     Request::new("D", UrgencyTier::Tier4, 50.0, 5.0, 3),
/// ];
/// let config = QueueConfig::default()
///     .with_weights(Weights::new(200.0, 1.0, 1.0))
///     .with_shortlist_fraction(0.0);
///
/// let queue = QueueBuilder::new(config).build(&batch).unwrap();
/// assert_eq!(queue.ids(), vec!["A", "C", "B", "D"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueueBuilder {
    config: QueueConfig,
}

impl QueueBuilder {
    /// Creates a builder that validates `config` on every build.
    pub fn new(config: QueueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Orders `batch` into a treatment queue.
    ///
    /// The input is not modified. Parameters are validated before any
    /// costing, so an invalid config is rejected even for an empty batch.
    ///
    /// # Errors
    ///
    /// - [`TriageError::InvalidWeight`] for a negative or NaN weight
    /// - [`TriageError::InvalidFraction`] for a fraction outside `[0, 1]`
    /// - [`TriageError::DuplicateArrivalIndex`] when two requests share an
    ///   arrival index
    pub fn build(&self, batch: &[Request]) -> Result<TriageQueue> {
        let _span = debug_span!("build_queue", batch = batch.len()).entered();

        self.config.validate()?;
        check_arrival_indices(batch)?;
        if batch.is_empty() {
            debug!("empty batch");
            return Ok(TriageQueue::default());
        }

        let costed = CostModel::new(self.config.weights).apply_batch(batch, self.config.parallel);
        trace!(requests = costed.len(), "costed batch");

        let k = shortlist_size(self.config.shortlist_fraction, costed.len());
        let Selection {
            shortlist,
            remainder,
        } = ShortlistSelector::select(costed, k)?;
        debug!(
            fast_tracked = shortlist.len(),
            remainder = remainder.len(),
            "shortlist selected"
        );

        let sorted = self.sort_remainder(remainder);

        let mut entries: Vec<QueueEntry> = Vec::with_capacity(batch.len());
        entries.extend(shortlist.into_iter().map(|item| QueueEntry {
            item,
            lane: Lane::FastTrack,
        }));
        entries.extend(sorted.into_iter().map(|item| QueueEntry {
            item,
            lane: Lane::Standard,
        }));

        match self.config.boundary_policy {
            BoundaryPolicy::Preserve => {
                let violations = find_safety_violations(&entries);
                if !violations.is_empty() {
                    warn!(
                        violations = violations.len(),
                        "Tier1 requests queued behind low-acuity requests"
                    );
                }
            }
            BoundaryPolicy::Enforce => {
                let moved = enforce_hard_rule(&mut entries);
                if moved > 0 {
                    warn!(moved, "moved Tier1 requests ahead of low-acuity requests");
                }
            }
        }

        Ok(TriageQueue { entries })
    }

    fn sort_remainder(&self, remainder: Vec<CostedRequest>) -> Vec<CostedRequest> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return super::sort::par_merge_sort_by(remainder, PriorityComparator::compare);
        }

        merge_sort_by(remainder, PriorityComparator::compare)
    }
}

/// Orders a batch with explicit parameters.
///
/// Equivalent to [`QueueBuilder::build`] with
/// [`BoundaryPolicy::Preserve`], returning the bare request sequence.
///
/// ```
/// use u_triage::triage::{build_queue, Weights};
///
/// let queue = build_queue(&[], Weights::default(), 0.5).unwrap();
/// assert!(queue.is_empty());
/// ```
pub fn build_queue(
    requests: &[Request],
    weights: Weights,
    shortlist_fraction: f64,
) -> Result<Vec<CostedRequest>> {
    let config = QueueConfig::default()
        .with_weights(weights)
        .with_shortlist_fraction(shortlist_fraction);
    QueueBuilder::new(config)
        .build(requests)
        .map(TriageQueue::into_requests)
}

fn check_arrival_indices(batch: &[Request]) -> Result<()> {
    let mut seen: HashMap<u64, &str> = HashMap::with_capacity(batch.len());
    for request in batch {
        if let Some(first) = seen.insert(request.arrival_index, &request.id) {
            return Err(TriageError::DuplicateArrivalIndex {
                index: request.arrival_index,
                first: first.to_string(),
                second: request.id.clone(),
            });
        }
    }
    Ok(())
}

/// Moves every Tier1 entry found after the first low-acuity entry to sit
/// directly before it, keeping all other relative order.
///
/// Returns the number of entries moved.
fn enforce_hard_rule(entries: &mut Vec<QueueEntry>) -> usize {
    let Some(first_low) = entries
        .iter()
        .position(|e| e.item.urgency().is_low_acuity())
    else {
        return 0;
    };

    let tail = entries.split_off(first_low);
    let (promoted, rest): (Vec<QueueEntry>, Vec<QueueEntry>) = tail
        .into_iter()
        .partition(|e| e.item.urgency() == UrgencyTier::Tier1);

    let moved = promoted.len();
    entries.extend(promoted);
    entries.extend(rest);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Request> {
        vec![
            Request::new("A", UrgencyTier::Tier1, 5.0, 90.0, 0),
            Request::new("B", UrgencyTier::Tier3, 100.0, 10.0, 1),
            Request::new("C", UrgencyTier::Tier2, 10.0, 50.0, 2),
            Request::new("D", UrgencyTier::Tier4, 50.0, 5.0, 3),
        ]
    }

    fn sample() -> Vec<Request> {
        use UrgencyTier::*;
        let rows = [
            ("P1", Tier2, 15.0, 80.0),
            ("P2", Tier1, 5.0, 95.0),
            ("P3", Tier3, 35.0, 40.0),
            ("P4", Tier4, 10.0, 10.0),
            ("P5", Tier2, 60.0, 30.0),
            ("P6", Tier1, 2.0, 60.0),
            ("P7", Tier3, 120.0, 50.0),
            ("P8", Tier2, 25.0, 70.0),
            ("P9", Tier4, 5.0, 20.0),
            ("P10", Tier2, 45.0, 85.0),
        ];
        rows.iter()
            .enumerate()
            .map(|(i, &(id, tier, wait, sev))| Request::new(id, tier, wait, sev, i as u64))
            .collect()
    }

    fn unit_weights(fraction: f64) -> QueueConfig {
        QueueConfig::default()
            .with_weights(Weights::new(1.0, 1.0, 1.0))
            .with_shortlist_fraction(fraction)
    }

    #[test]
    fn test_scenario_order() {
        let config = QueueConfig::default()
            .with_weights(Weights::new(200.0, 1.0, 1.0))
            .with_shortlist_fraction(0.0);
        let queue = QueueBuilder::new(config).build(&scenario()).unwrap();

        assert_eq!(queue.ids(), vec!["A", "C", "B", "D"]);
        assert_eq!(queue.fast_tracked(), 1);
        assert!((queue.entries()[0].item.priority_cost() - 895.0).abs() < 1e-10);
        assert!(queue.safety_violations().is_empty());
    }

    #[test]
    fn test_reference_sample() {
        let queue = QueueBuilder::default().build(&sample()).unwrap();

        let shortlist: Vec<&str> = queue.shortlist().iter().map(|c| c.id()).collect();
        assert_eq!(shortlist, vec!["P2", "P6"]);
        assert_eq!(
            queue.ids(),
            vec!["P2", "P6", "P10", "P5", "P8", "P1", "P7", "P3", "P9", "P4"]
        );
        assert!((queue.entries()[1].item.priority_cost() - 837.6).abs() < 1e-9);
    }

    #[test]
    fn test_build_queue_entry_point() {
        let out = build_queue(&scenario(), Weights::new(200.0, 1.0, 1.0), 0.0).unwrap();
        let ids: Vec<&str> = out.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn test_empty_batch() {
        let queue = QueueBuilder::default().build(&[]).unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.fast_tracked(), 0);
    }

    #[test]
    fn test_single_request() {
        let batch = vec![Request::new("only", UrgencyTier::Tier4, 1.0, 1.0, 9)];
        let queue = QueueBuilder::default().build(&batch).unwrap();
        assert_eq!(queue.ids(), vec!["only"]);
        assert_eq!(queue.entries()[0].lane, Lane::FastTrack);
    }

    #[test]
    fn test_full_fraction_fast_tracks_everything() {
        let queue = QueueBuilder::new(unit_weights(1.0)).build(&scenario()).unwrap();
        assert_eq!(queue.fast_tracked(), 4);
        assert!(queue.remainder().is_empty());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let config = QueueConfig::default().with_weights(Weights::new(1.0, -1.0, 1.0));
        let err = QueueBuilder::new(config).build(&scenario()).unwrap_err();
        assert!(matches!(err, TriageError::InvalidWeight { name: "wait", .. }));
    }

    #[test]
    fn test_rejects_bad_fraction_even_when_empty() {
        let err = QueueBuilder::new(unit_weights(1.5)).build(&[]).unwrap_err();
        assert_eq!(err, TriageError::InvalidFraction(1.5));
    }

    #[test]
    fn test_rejects_duplicate_arrival_index() {
        let mut batch = scenario();
        batch[3].arrival_index = 1;
        let err = QueueBuilder::default().build(&batch).unwrap_err();
        assert_eq!(
            err,
            TriageError::DuplicateArrivalIndex {
                index: 1,
                first: "B".into(),
                second: "D".into(),
            }
        );
    }

    #[test]
    fn test_input_untouched_and_deterministic() {
        let batch = sample();
        let before = batch.clone();
        let builder = QueueBuilder::default();
        let first = builder.build(&batch).unwrap();
        let second = builder.build(&batch).unwrap();
        assert_eq!(batch, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_equal_cost_keeps_arrival_order() {
        let batch = vec![
            Request::new("lead", UrgencyTier::Tier2, 0.0, 500.0, 0),
            Request::new("x", UrgencyTier::Tier2, 10.0, 10.0, 4),
            Request::new("y", UrgencyTier::Tier2, 0.0, 20.0, 2),
            Request::new("z", UrgencyTier::Tier2, 20.0, 0.0, 3),
        ];
        let queue = QueueBuilder::new(unit_weights(0.0)).build(&batch).unwrap();
        assert_eq!(queue.ids(), vec!["lead", "y", "z", "x"]);
    }

    // ---- Boundary policy ----

    fn cross_segment_batch() -> Vec<Request> {
        vec![
            Request::new("low", UrgencyTier::Tier4, 0.0, 1000.0, 0),
            Request::new("crit", UrgencyTier::Tier1, 0.0, 10.0, 1),
            Request::new("mid", UrgencyTier::Tier2, 0.0, 20.0, 2),
        ]
    }

    #[test]
    fn test_preserve_keeps_cross_segment_gap() {
        let queue = QueueBuilder::new(unit_weights(0.0))
            .build(&cross_segment_batch())
            .unwrap();
        assert_eq!(queue.ids(), vec!["low", "mid", "crit"]);
        assert_eq!(
            queue.safety_violations(),
            vec![SafetyViolation {
                position: 2,
                blocked_by: 0
            }]
        );
    }

    #[test]
    fn test_enforce_repairs_cross_segment_gap() {
        let config = unit_weights(0.0).with_boundary_policy(BoundaryPolicy::Enforce);
        let queue = QueueBuilder::new(config)
            .build(&cross_segment_batch())
            .unwrap();

        assert_eq!(queue.ids(), vec!["crit", "low", "mid"]);
        assert!(queue.safety_violations().is_empty());
        // Lanes travel with their entries.
        assert_eq!(queue.fast_tracked(), 1);
        assert_eq!(queue.entries()[1].lane, Lane::FastTrack);
    }

    fn tier2_bridge_batch() -> Vec<Request> {
        // unit weights: costs lead=100, t3=30, t2=20, t1=10. The remainder
        // splits as [t3] | [t2, t1], so t1 is only ever compared with t2.
        vec![
            Request::new("lead", UrgencyTier::Tier2, 0.0, 97.0, 0),
            Request::new("t3", UrgencyTier::Tier3, 0.0, 28.0, 1),
            Request::new("t2", UrgencyTier::Tier2, 0.0, 17.0, 2),
            Request::new("t1", UrgencyTier::Tier1, 0.0, 6.0, 3),
        ]
    }

    #[test]
    fn test_preserve_tier2_bridge_inside_remainder() {
        let queue = QueueBuilder::new(unit_weights(0.0))
            .build(&tier2_bridge_batch())
            .unwrap();
        assert_eq!(queue.ids(), vec!["lead", "t3", "t2", "t1"]);
        assert_eq!(queue.safety_violations().len(), 1);
    }

    #[test]
    fn test_bridge_resolved_when_tier1_meets_tier3() {
        // Same costs, but the split [t1] | [t3, t2] merges t1 against t3.
        let batch = vec![
            Request::new("lead", UrgencyTier::Tier2, 0.0, 97.0, 0),
            Request::new("t1", UrgencyTier::Tier1, 0.0, 6.0, 1),
            Request::new("t2", UrgencyTier::Tier2, 0.0, 17.0, 2),
            Request::new("t3", UrgencyTier::Tier3, 0.0, 28.0, 3),
        ];
        let queue = QueueBuilder::new(unit_weights(0.0)).build(&batch).unwrap();
        assert_eq!(queue.ids(), vec!["lead", "t1", "t3", "t2"]);
        assert!(queue.safety_violations().is_empty());
    }

    #[test]
    fn test_enforce_tier2_bridge_inside_remainder() {
        let config = unit_weights(0.0).with_boundary_policy(BoundaryPolicy::Enforce);
        let queue = QueueBuilder::new(config)
            .build(&tier2_bridge_batch())
            .unwrap();
        assert_eq!(queue.ids(), vec!["lead", "t1", "t3", "t2"]);
        assert!(queue.safety_violations().is_empty());
    }

    #[test]
    fn test_enforce_is_noop_without_violations() {
        let config = QueueConfig::default().with_boundary_policy(BoundaryPolicy::Enforce);
        let enforced = QueueBuilder::new(config).build(&sample()).unwrap();
        let preserved = QueueBuilder::default().build(&sample()).unwrap();
        assert_eq!(enforced, preserved);
    }

    #[test]
    fn test_enforce_hard_rule_helper() {
        let model = CostModel::new(Weights::new(1.0, 1.0, 1.0));
        let mut entries: Vec<QueueEntry> = [
            ("a", UrgencyTier::Tier2),
            ("b", UrgencyTier::Tier3),
            ("c", UrgencyTier::Tier1),
            ("d", UrgencyTier::Tier4),
            ("e", UrgencyTier::Tier1),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(id, tier))| QueueEntry {
            item: model.apply(Request::new(id, tier, 0.0, 0.0, i as u64)),
            lane: Lane::Standard,
        })
        .collect();

        assert_eq!(enforce_hard_rule(&mut entries), 2);
        let ids: Vec<&str> = entries.iter().map(|e| e.item.id()).collect();
        assert_eq!(ids, vec!["a", "c", "e", "b", "d"]);
    }

    #[test]
    fn test_display_table() {
        let config = QueueConfig::default()
            .with_weights(Weights::new(200.0, 1.0, 1.0))
            .with_shortlist_fraction(0.0);
        let queue = QueueBuilder::new(config).build(&scenario()).unwrap();
        let table = queue.to_string();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Rank | Request"));
        assert!(lines[2].contains("A"));
        assert!(lines[2].contains("895.00"));
        assert!(lines[2].ends_with("fast"));
        assert!(lines[5].contains("U4"));
        assert!(lines[5].ends_with("std"));
    }
}
