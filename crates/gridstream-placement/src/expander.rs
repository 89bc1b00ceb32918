//! Endpoint expander.
//!
//! The matcher balances over hosts; this layer spreads each host's share
//! over the endpoints bound to that host, translating local affinity
//! indices back to original partition indices.

use crate::cancel::CancelToken;
use crate::error::{PlacementError, PlacementResult};
use crate::roster::HostRoster;
use crate::splitter::AffinityPartition;

/// Distribute each host's matched partitions across its endpoints.
///
/// Endpoint `j` of `k` receives `n / k` partitions plus one extra when
/// `j < n mod k`, sliced in matcher output order, so sizes within a host
/// differ by at most one. The returned lists are indexed by endpoint in
/// original endpoint order and stay append-friendly for the residual pass.
pub fn expand_to_endpoints(
    host_partitions: &[Vec<usize>],
    affinity: &[AffinityPartition],
    roster: &HostRoster,
    cancel: &CancelToken,
) -> PlacementResult<Vec<Vec<usize>>> {
    let mut per_endpoint: Vec<Vec<usize>> = vec![Vec::new(); roster.endpoint_count()];

    for (host, locals) in host_partitions.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(PlacementError::Cancelled);
        }

        let endpoints = roster.endpoints_of(host);
        let k = endpoints.len();
        let base = locals.len() / k;
        let extra = locals.len() % k;

        let mut offset = 0;
        for (j, &endpoint) in endpoints.iter().enumerate() {
            let take = base + usize::from(j < extra);
            for &local in &locals[offset..offset + take] {
                per_endpoint[endpoint].push(affinity[local].partition);
            }
            offset += take;
        }
    }

    Ok(per_endpoint)
}
