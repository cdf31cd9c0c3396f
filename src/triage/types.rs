//! Core data model: urgency tiers, raw requests and costed requests.

use crate::error::TriageError;
use std::fmt;
use std::str::FromStr;

/// Externally assigned urgency category.
///
/// `Tier1` is the most urgent, `Tier4` the least. The cost model reads the
/// tier as a numeric weight via [`UrgencyTier::weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UrgencyTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl UrgencyTier {
    /// All tiers, most urgent first.
    pub const ALL: [UrgencyTier; 4] = [Self::Tier1, Self::Tier2, Self::Tier3, Self::Tier4];

    /// Numeric weight used by the cost model: Tier1 → 4 … Tier4 → 1.
    pub fn weight(self) -> f64 {
        match self {
            Self::Tier1 => 4.0,
            Self::Tier2 => 3.0,
            Self::Tier3 => 2.0,
            Self::Tier4 => 1.0,
        }
    }

    /// Tier3 and Tier4: the tiers a Tier1 request may never be ranked behind.
    pub fn is_low_acuity(self) -> bool {
        matches!(self, Self::Tier3 | Self::Tier4)
    }

    /// Short display code (`U1`..`U4`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Tier1 => "U1",
            Self::Tier2 => "U2",
            Self::Tier3 => "U3",
            Self::Tier4 => "U4",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// Parses `U1`..`U4`, `1`..`4` or `Tier1`..`Tier4` (case-insensitive).
impl FromStr for UrgencyTier {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digit = lower
            .strip_prefix("tier")
            .or_else(|| lower.strip_prefix('u'))
            .unwrap_or(&lower);
        match digit {
            "1" => Ok(Self::Tier1),
            "2" => Ok(Self::Tier2),
            "3" => Ok(Self::Tier3),
            "4" => Ok(Self::Tier4),
            _ => Err(TriageError::UnknownTier(s.to_string())),
        }
    }
}

/// A triage request as supplied by the caller, before costing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    /// Opaque identifier. Not guaranteed unique on its own; identity is the
    /// `(id, arrival_index)` pair.
    pub id: String,

    pub urgency: UrgencyTier,

    /// Minutes already waited.
    pub wait_minutes: f64,

    /// Externally supplied severity estimate, no fixed range.
    pub severity: f64,

    /// Position in arrival order. Unique per batch; the only tie-break key.
    pub arrival_index: u64,
}

impl Request {
    /// Creates a request. `arrival_index` must be unique within its batch.
    pub fn new(
        id: impl Into<String>,
        urgency: UrgencyTier,
        wait_minutes: f64,
        severity: f64,
        arrival_index: u64,
    ) -> Self {
        Self {
            id: id.into(),
            urgency,
            wait_minutes,
            severity,
            arrival_index,
        }
    }

    /// Identity key used for partitioning.
    pub fn identity(&self) -> (&str, u64) {
        (&self.id, self.arrival_index)
    }
}

/// A request paired with its computed priority cost.
///
/// Only [`CostModel`](super::CostModel) constructs these, so the cost is
/// always consistent with the weights it was computed under. With the
/// `serde` feature this type is `Serialize` only; deserializing would
/// bypass the cost model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CostedRequest {
    request: Request,
    priority_cost: f64,
}

impl CostedRequest {
    pub(crate) fn new(request: Request, priority_cost: f64) -> Self {
        Self {
            request,
            priority_cost,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn into_request(self) -> Request {
        self.request
    }

    pub fn priority_cost(&self) -> f64 {
        self.priority_cost
    }

    pub fn id(&self) -> &str {
        &self.request.id
    }

    pub fn urgency(&self) -> UrgencyTier {
        self.request.urgency
    }

    pub fn arrival_index(&self) -> u64 {
        self.request.arrival_index
    }

    pub fn identity(&self) -> (&str, u64) {
        self.request.identity()
    }
}

/// Which segment of the final queue an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lane {
    /// Selected by the shortlist (greedy by raw cost).
    FastTrack,
    /// Ordered by the full priority comparator.
    Standard,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::FastTrack => f.pad("fast"),
            Lane::Standard => f.pad("std"),
        }
    }
}

/// One position in a built queue.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueueEntry {
    pub item: CostedRequest,
    pub lane: Lane,
}
