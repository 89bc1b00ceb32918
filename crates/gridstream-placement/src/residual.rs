//! Residual distributor.
//!
//! Folds bare partitions into the per-endpoint lists produced by the
//! expander: a levelling pass raises every endpoint to the current maximum
//! list size, then the remainder wraps round-robin from endpoint 0. The
//! maximum endpoint size grows by at most one beyond the post-expansion
//! maximum, and existing entries are never moved or removed.

/// Append `bare` partitions to the endpoint lists, levelling first.
pub fn distribute_residual(per_endpoint: &mut [Vec<usize>], bare: &[usize]) {
    if per_endpoint.is_empty() {
        return;
    }

    let mut rest = bare.iter().copied();
    let max = per_endpoint.iter().map(Vec::len).max().unwrap_or(0);

    for list in per_endpoint.iter_mut() {
        while list.len() < max {
            match rest.next() {
                Some(partition) => list.push(partition),
                None => return,
            }
        }
    }

    for (i, partition) in rest.enumerate() {
        per_endpoint[i % per_endpoint.len()].push(partition);
    }
}
