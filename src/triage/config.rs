//! Queue configuration.
//!
//! [`QueueConfig`] holds every parameter of a pipeline run. Nothing is
//! read from global state; callers pass a config explicitly.

use crate::error::{Result, TriageError};

/// Non-negative weights of the three cost factors.
///
/// # Examples
///
/// ```
/// use u_triage::triage::Weights;
///
/// let w = Weights::new(200.0, 1.0, 1.0);
/// assert!(w.validate().is_ok());
/// assert!(Weights::new(-1.0, 1.0, 1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    /// Multiplier of the urgency tier weight (Tier1 = 4 … Tier4 = 1).
    pub urgency: f64,

    /// Multiplier of minutes waited.
    pub wait: f64,

    /// Multiplier of the severity score.
    pub severity: f64,
}

impl Weights {
    /// Creates weights for the urgency, wait and severity factors.
    pub fn new(urgency: f64, wait: f64, severity: f64) -> Self {
        Self {
            urgency,
            wait,
            severity,
        }
    }

    /// Rejects negative (or NaN) weights.
    ///
    /// Cost ordering is only monotonic in each factor when every weight is
    /// non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("urgency", self.urgency),
            ("wait", self.wait),
            ("severity", self.severity),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(TriageError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            urgency: 200.0,
            wait: 0.8,
            severity: 0.6,
        }
    }
}

/// How the boundary between the fast-track shortlist and the sorted
/// remainder is treated.
///
/// The shortlist is chosen by raw cost and ignores the hard safety rule,
/// so a low-acuity request can be fast-tracked while a Tier1 request lands
/// in the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// Emit `shortlist ++ sorted remainder` unchanged. Any resulting
    /// safety violation is reported (see
    /// [`TriageQueue::safety_violations`](super::TriageQueue::safety_violations))
    /// but left in place.
    #[default]
    Preserve,

    /// After concatenation, move every Tier1 entry that follows a
    /// low-acuity entry to sit directly before the first low-acuity entry.
    /// All other relative order is kept.
    Enforce,
}

/// Configuration for a queue build.
///
/// # Defaults
///
/// ```
/// use u_triage::triage::{BoundaryPolicy, QueueConfig};
///
/// let config = QueueConfig::default();
/// assert!((config.weights.urgency - 200.0).abs() < 1e-10);
/// assert!((config.shortlist_fraction - 0.2).abs() < 1e-10);
/// assert_eq!(config.boundary_policy, BoundaryPolicy::Preserve);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_triage::triage::{BoundaryPolicy, QueueConfig, Weights};
///
/// let config = QueueConfig::default()
///     .with_weights(Weights::new(100.0, 1.0, 0.5))
///     .with_shortlist_fraction(0.1)
///     .with_boundary_policy(BoundaryPolicy::Enforce);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueConfig {
    /// Cost model weights.
    pub weights: Weights,

    /// Fraction of the batch fast-tracked by raw cost (0.0–1.0).
    ///
    /// At least one request is always fast-tracked for a non-empty batch.
    pub shortlist_fraction: f64,

    /// Treatment of the shortlist/remainder boundary.
    pub boundary_policy: BoundaryPolicy,

    /// Whether to cost and sort on the rayon pool.
    ///
    /// Ignored unless the crate is built with the `parallel` feature.
    /// Output is identical either way.
    pub parallel: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            shortlist_fraction: 0.2,
            boundary_policy: BoundaryPolicy::Preserve,
            parallel: false,
        }
    }
}

impl QueueConfig {
    /// Sets the cost weights.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the shortlist fraction.
    ///
    /// Not clamped: an out-of-range value is reported by
    /// [`validate`](Self::validate).
    pub fn with_shortlist_fraction(mut self, fraction: f64) -> Self {
        self.shortlist_fraction = fraction;
        self
    }

    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    /// Enables or disables parallel costing and sorting.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Weights are checked before the fraction.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !(0.0..=1.0).contains(&self.shortlist_fraction) {
            return Err(TriageError::InvalidFraction(self.shortlist_fraction));
        }
        Ok(())
    }
}
