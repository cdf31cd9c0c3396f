//! Triage queue ordering.
//!
//! Orders one batch of requests into a single treatment queue:
//!
//! - **Cost model**: weighted sum of urgency tier weight, wait time and
//!   severity ([`CostModel`]).
//! - **Comparator**: hard safety rule (Tier1 never behind Tier3/Tier4),
//!   then cost descending, then arrival ascending ([`PriorityComparator`]).
//! - **Stable sort**: top-down merge sort over any comparator
//!   ([`merge_sort_by`]).
//! - **Shortlist**: the top `k` requests by raw cost are fast-tracked,
//!   ignoring the safety rule ([`ShortlistSelector`]).
//! - **Pipeline**: [`QueueBuilder`] composes the above and applies the
//!   configured [`BoundaryPolicy`].
//!
//! # Data flow
//!
//! ```text
//! batch → costed → (shortlist, remainder) → (shortlist, sorted remainder) → queue
//! ```
//!
//! Nothing is shared between calls: each build owns its working copies and
//! returns a fresh [`TriageQueue`].

mod comparator;
mod config;
mod cost;
mod queue;
mod report;
mod shortlist;
mod sort;
mod types;

pub use comparator::PriorityComparator;
pub use config::{BoundaryPolicy, QueueConfig, Weights};
pub use cost::CostModel;
pub use queue::{build_queue, QueueBuilder, TriageQueue};
pub use report::{find_safety_violations, SafetyViolation};
pub use shortlist::{shortlist_size, Selection, ShortlistSelector};
#[cfg(feature = "parallel")]
pub use sort::{par_merge_sort_by, PARALLEL_CUTOFF};
pub use sort::merge_sort_by;
pub use types::{CostedRequest, Lane, QueueEntry, Request, UrgencyTier};
