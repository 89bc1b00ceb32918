//! Assignment orchestration.
//!
//! Wires the pipeline together: roster → splitter → matcher → expander →
//! residual. One run is synchronous, single-threaded, and deterministic:
//! identical inputs and endpoint order produce identical plans. A final
//! advisory pass counts the partitions that remain remote and reports the
//! count in the stats and a debug line; it never fails the run.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::PlacementResult;
use crate::expander::expand_to_endpoints;
use crate::matcher::HostMatcher;
use crate::residual::distribute_residual;
use crate::roster::{Endpoint, HostRoster};
use crate::splitter::{split_partitions, SplitPartitions};

/// Counters from one assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentStats {
    /// Partitions that entered the matcher (non-empty preferred list).
    pub affinity_partitions: usize,
    /// Partitions distributed without affinity, including those whose
    /// preferred hosts were all outside the roster.
    pub bare_partitions: usize,
    /// Rebalance passes spent in the matcher.
    pub matcher_passes: usize,
    /// Partitions with a preferred list that landed on an endpoint whose
    /// host is not among their known preferred hosts.
    pub remote_partitions: usize,
}

/// A complete per-endpoint assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    /// Element `i` holds the original partition indices assigned to
    /// endpoint `i`, in stable order.
    pub per_endpoint: Vec<Vec<usize>>,
    pub stats: AssignmentStats,
}

/// Assign every partition to an endpoint.
///
/// `affinities` holds one preferred-host list per partition, in partition
/// order; entries may be empty. `endpoints` must be non-empty. The result
/// has one partition list per endpoint, in endpoint order, and covers each
/// partition exactly once.
pub fn assign(
    affinities: &[Vec<String>],
    endpoints: &[Endpoint],
) -> PlacementResult<Vec<Vec<usize>>> {
    assign_with_cancel(affinities, endpoints, &CancelToken::new())
}

/// [`assign`] with a caller-owned cancellation token.
pub fn assign_with_cancel(
    affinities: &[Vec<String>],
    endpoints: &[Endpoint],
    cancel: &CancelToken,
) -> PlacementResult<Vec<Vec<usize>>> {
    compute_assignment(affinities, endpoints, cancel).map(|plan| plan.per_endpoint)
}

/// Full assignment run returning the plan together with its stats.
pub fn compute_assignment(
    affinities: &[Vec<String>],
    endpoints: &[Endpoint],
    cancel: &CancelToken,
) -> PlacementResult<AssignmentPlan> {
    let roster = HostRoster::build(endpoints)?;
    let split = split_partitions(affinities, &roster);
    debug!(
        partitions = affinities.len(),
        affinity = split.affinity.len(),
        bare = split.bare.len(),
        hosts = roster.host_count(),
        endpoints = endpoints.len(),
        "partitions split"
    );

    let matching = HostMatcher::new(&split.affinity, roster.host_count()).run(cancel)?;

    let mut per_endpoint =
        expand_to_endpoints(&matching.host_partitions, &split.affinity, &roster, cancel)?;

    // Hostless leftovers join the bare queue behind the splitter's entries.
    let mut bare = split.bare.clone();
    bare.extend(matching.unmatched.iter().map(|&i| split.affinity[i].partition));
    distribute_residual(&mut per_endpoint, &bare);

    let remote = count_remote(&per_endpoint, &split, affinities.len(), endpoints, &roster);
    debug!(
        passes = matching.passes,
        remote, "assignment complete"
    );

    Ok(AssignmentPlan {
        per_endpoint,
        stats: AssignmentStats {
            affinity_partitions: split.affinity.len(),
            bare_partitions: bare.len(),
            matcher_passes: matching.passes,
            remote_partitions: remote,
        },
    })
}

/// Count partitions that will be read remotely: those with a preferred
/// list whose landing endpoint's host is not among their known preferred
/// hosts. Bare partitions have no local host anywhere and are not counted.
fn count_remote(
    per_endpoint: &[Vec<usize>],
    split: &SplitPartitions,
    partition_count: usize,
    endpoints: &[Endpoint],
    roster: &HostRoster,
) -> usize {
    let mut known_hosts: Vec<Option<&[usize]>> = vec![None; partition_count];
    for part in &split.affinity {
        known_hosts[part.partition] = Some(part.hosts.as_slice());
    }

    let mut remote = 0;
    for (endpoint, partitions) in per_endpoint.iter().enumerate() {
        let Some(host) = roster.host_index(&endpoints[endpoint].host) else {
            continue;
        };
        for &partition in partitions {
            if let Some(hosts) = known_hosts[partition] {
                if !hosts.contains(&host) {
                    remote += 1;
                }
            }
        }
    }
    remote
}
