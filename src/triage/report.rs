//! Safety audit and table rendering for built queues.

use super::queue::TriageQueue;
use super::types::{QueueEntry, UrgencyTier};
use std::fmt;

/// A Tier1 entry positioned behind a low-acuity (Tier3/Tier4) entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyViolation {
    /// Queue position (0-based) of the Tier1 entry.
    pub position: usize,

    /// Position of the first low-acuity entry ahead of it.
    pub blocked_by: usize,
}

/// Scans a queue once for Tier1 entries that follow any low-acuity entry.
pub fn find_safety_violations(entries: &[QueueEntry]) -> Vec<SafetyViolation> {
    let mut first_low = None;
    let mut violations = Vec::new();

    for (position, entry) in entries.iter().enumerate() {
        let tier = entry.item.urgency();
        if tier.is_low_acuity() {
            first_low.get_or_insert(position);
        } else if tier == UrgencyTier::Tier1 {
            if let Some(blocked_by) = first_low {
                violations.push(SafetyViolation {
                    position,
                    blocked_by,
                });
            }
        }
    }
    violations
}

/// Fixed-width table, one row per queue position.
///
/// ```text
/// Rank | Request | Urgency |   Wait | Severity |     Cost | Lane
/// ```
impl fmt::Display for TriageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4} | {:>7} | {:>7} | {:>6} | {:>8} | {:>8} | Lane",
            "Rank", "Request", "Urgency", "Wait", "Severity", "Cost"
        )?;
        writeln!(f, "{}", "-".repeat(65))?;
        for (rank, entry) in self.iter().enumerate() {
            let r = entry.item.request();
            writeln!(
                f,
                "{:>4} | {:>7} | {:>7} | {:>6.1} | {:>8.1} | {:>8.2} | {}",
                rank + 1,
                r.id,
                r.urgency,
                r.wait_minutes,
                r.severity,
                entry.item.priority_cost(),
                entry.lane
            )?;
        }
        Ok(())
    }
}
