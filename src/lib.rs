//! Batch triage queue ordering.
//!
//! Turns a fixed batch of triage requests into one ordered treatment
//! queue under a multi-factor priority model:
//!
//! - **Priority cost**: weighted sum of urgency tier, minutes waited and
//!   severity.
//! - **Hard safety rule**: a Tier1 request is never ranked behind a Tier3
//!   or Tier4 request by the comparator.
//! - **Fast track**: a configurable fraction of the batch is shortlisted by
//!   raw cost before the remainder is stably sorted.
//!
//! # Quick start
//!
//! ```
//! use u_triage::triage::{build_queue, Request, UrgencyTier, Weights};
//!
//! let batch = vec![
//!     Request::new("A", UrgencyTier::Tier1, 5.0, 90.0, 0),
//!     Request::new("B", UrgencyTier::Tier3, 100.0, 10.0, 1),
//! ];
//! let queue = build_queue(&batch, Weights::new(200.0, 1.0, 1.0), 0.0)?;
//! assert_eq!(queue[0].id(), "A");
//! # Ok::<(), u_triage::TriageError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: cost and sort large batches on the rayon pool.
//! - `serde`: `Serialize`/`Deserialize` for requests, queues and configs.
//! - `demo`: the `u-triage-demo` binary.
//!
//! The crate is synchronous and batch-oriented. It has no notion of time
//! passing: a queue is never re-ranked after it is built.

pub mod error;
pub mod triage;

pub use error::{Result, TriageError};
