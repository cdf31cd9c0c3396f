//! Weighted priority cost.

use super::config::Weights;
use super::types::{CostedRequest, Request};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Turns a request's raw attributes into a scalar priority cost.
///
/// ```text
/// cost = w_urgency * tier_weight + w_wait * wait_minutes + w_severity * severity
/// ```
///
/// Higher cost means higher priority. The model performs no validation:
/// negative waits or severities are used as given.
///
/// # Examples
///
/// ```
/// use u_triage::triage::{CostModel, Request, UrgencyTier, Weights};
///
/// let model = CostModel::new(Weights::new(200.0, 1.0, 1.0));
/// let a = Request::new("A", UrgencyTier::Tier1, 5.0, 90.0, 0);
/// assert!((model.cost(&a) - 895.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    weights: Weights,
}

impl CostModel {
    /// Creates a cost model with the given weights.
    ///
    /// Weights are not validated here; see [`Weights::validate`].
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Computes the priority cost of a single request.
    pub fn cost(&self, request: &Request) -> f64 {
        let w = &self.weights;
        w.urgency * request.urgency.weight()
            + w.wait * request.wait_minutes
            + w.severity * request.severity
    }

    /// Costs a request, taking ownership of it.
    pub fn apply(&self, request: Request) -> CostedRequest {
        let cost = self.cost(&request);
        CostedRequest::new(request, cost)
    }

    /// Costs every request of a batch, preserving batch order.
    ///
    /// With the `parallel` feature and `parallel == true` the per-request
    /// work runs on the rayon pool. Requests are independent, so the result
    /// is the same either way.
    pub fn apply_batch(&self, batch: &[Request], parallel: bool) -> Vec<CostedRequest> {
        #[cfg(feature = "parallel")]
        if parallel {
            return batch.par_iter().map(|r| self.apply(r.clone())).collect();
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        batch.iter().map(|r| self.apply(r.clone())).collect()
    }
}
