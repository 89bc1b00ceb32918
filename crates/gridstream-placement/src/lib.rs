//! gridstream-placement — locality-aware partition-to-endpoint assignment.
//!
//! Assigns the partitions of a distributed bulk-load job to the ingestion
//! endpoints of a clustered analytical database. Each endpoint receives a
//! balanced share of work, and a partition lands on one of its preferred
//! hosts whenever the affinity graph allows it.
//!
//! # Components
//!
//! - **`roster`** — endpoint roster and dense host index table
//! - **`splitter`** — separates affinity-bearing from bare partitions
//! - **`matcher`** — balanced bipartite matching of partitions to hosts
//! - **`expander`** — spreads each host's share over its endpoints
//! - **`residual`** — levelling and round-robin top-up of bare partitions
//! - **`assigner`** — the `assign` entry points and the assignment plan
//!
//! # Model
//!
//! ```text
//! affinities + endpoints
//!   → HostRoster (hostname → dense index)
//!   → split (affinity partitions | bare partitions)
//!   → HostMatcher (host → partitions, max load ≤ ceil(nA / nB) when feasible)
//!   → expand (endpoint → partitions, per-host sizes within 1)
//!   → residual (bare partitions levelled in, then round-robin)
//! ```
//!
//! One run is synchronous, single-threaded, and one-shot: it owns all
//! mutable state and yields an immutable plan. Identical inputs produce
//! bitwise-identical plans — job plans must be reproducible. Cooperative
//! cancellation is available through [`CancelToken`].

pub mod assigner;
pub mod cancel;
pub mod error;
pub mod expander;
pub mod matcher;
pub mod residual;
pub mod roster;
pub mod splitter;

pub use assigner::{assign, assign_with_cancel, compute_assignment, AssignmentPlan, AssignmentStats};
pub use cancel::CancelToken;
pub use error::{PlacementError, PlacementResult};
pub use matcher::{HostMatcher, Matching};
pub use roster::{Endpoint, HostRoster};
pub use splitter::{split_partitions, AffinityPartition, SplitPartitions};
