//! End-to-end assignment scenarios.
//!
//! Each test drives the full pipeline through `assign` and checks the
//! exact per-endpoint output; the engine is deterministic, so exact
//! expectations are stable.

use gridstream_placement::{assign, assign_with_cancel, CancelToken, Endpoint, PlacementError};

fn endpoints(hosts: &[&str]) -> Vec<Endpoint> {
    hosts
        .iter()
        .enumerate()
        .map(|(i, h)| Endpoint::new(*h, 9000 + i as u16))
        .collect()
}

fn affinities(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|l| l.iter().map(|s| s.to_string()).collect())
        .collect()
}

// ── Affinity honored, balanced hosts ────────────────────────────────

#[test]
fn distinct_hosts_keep_their_partitions() {
    let out = assign(
        &affinities(&[&["h1"], &["h1"], &["h2"]]),
        &endpoints(&["h1", "h2"]),
    )
    .unwrap();

    assert_eq!(out, vec![vec![0, 1], vec![2]]);
}

#[test]
fn pinned_partitions_cannot_rebalance() {
    // Every partition prefers h1 only; no alternating path reaches h2.
    let out = assign(
        &affinities(&[&["h1"], &["h1"], &["h1"], &["h1"]]),
        &endpoints(&["h1", "h2"]),
    )
    .unwrap();

    assert_eq!(out, vec![vec![0, 1, 2, 3], Vec::new()]);
}

#[test]
fn flexible_partitions_split_across_hosts() {
    let out = assign(
        &affinities(&[&["h1", "h2"], &["h1", "h2"], &["h1"], &["h2"]]),
        &endpoints(&["h1", "h2"]),
    )
    .unwrap();

    // The pinned partitions hold one slot on each host; the flexible pair
    // fills the remaining slots, one per host.
    assert_eq!(out[0].len(), 2);
    assert_eq!(out[1].len(), 2);
    assert!(out[0].contains(&2));
    assert!(out[1].contains(&3));
    assert_eq!(out, vec![vec![0, 2], vec![1, 3]]);
}

// ── Bare partitions ─────────────────────────────────────────────────

#[test]
fn bare_only_input_is_round_robin() {
    let out = assign(&affinities(&[&[], &[], &[]]), &endpoints(&["h1", "h2"])).unwrap();

    assert_eq!(out, vec![vec![0, 2], vec![1]]);
}

#[test]
fn bare_partitions_level_uneven_endpoints_first() {
    // Partitions 0 and 1 pin endpoint 0's host; the bare pair first levels
    // endpoint 1, then wraps from endpoint 0.
    let out = assign(
        &affinities(&[&["h1"], &["h1"], &[], &[], &[]]),
        &endpoints(&["h1", "h2"]),
    )
    .unwrap();

    assert_eq!(out, vec![vec![0, 1, 4], vec![2, 3]]);
}

// ── Shared hosts and unknown hosts ──────────────────────────────────

#[test]
fn endpoints_sharing_a_host_split_its_partitions() {
    let out = assign(
        &affinities(&[&["h1"], &["h1"], &["h1"]]),
        &endpoints(&["h1", "h1"]),
    )
    .unwrap();

    assert_eq!(out, vec![vec![0, 1], vec![2]]);
}

#[test]
fn unknown_host_affinity_is_treated_as_bare() {
    let out = assign(&affinities(&[&["hX"]]), &endpoints(&["h1"])).unwrap();

    assert_eq!(out, vec![vec![0]]);
}

// ── Errors and cancellation ─────────────────────────────────────────

#[test]
fn empty_endpoint_list_fails() {
    let result = assign(&affinities(&[&["h1"]]), &[]);
    assert!(matches!(result, Err(PlacementError::InvalidInput(_))));
}

#[test]
fn cancelled_run_discards_partial_results() {
    let token = CancelToken::new();
    token.cancel();

    let result = assign_with_cancel(
        &affinities(&[&["h1"], &["h1"], &["h2"]]),
        &endpoints(&["h1", "h2"]),
        &token,
    );
    assert!(matches!(result, Err(PlacementError::Cancelled)));
}

// ── Determinism ─────────────────────────────────────────────────────

#[test]
fn repeated_runs_are_bitwise_identical() {
    let affinities = affinities(&[
        &["h3", "h1"],
        &[],
        &["h2"],
        &["h2", "h3"],
        &["hX", "h1"],
        &[],
        &["h1", "h2", "h3"],
    ]);
    let endpoints = endpoints(&["h1", "h2", "h1", "h3", "h2"]);

    let first = assign(&affinities, &endpoints).unwrap();
    let second = assign(&affinities, &endpoints).unwrap();
    assert_eq!(first, second);
}

#[test]
fn larger_cluster_covers_every_partition_once() {
    let raw: Vec<Vec<String>> = (0..100)
        .map(|i| match i % 4 {
            0 => vec![format!("h{}", i % 7)],
            1 => vec![format!("h{}", i % 7), format!("h{}", (i + 3) % 7)],
            2 => vec!["elsewhere".to_string()],
            _ => Vec::new(),
        })
        .collect();
    let endpoints: Vec<Endpoint> = (0..10)
        .map(|i| Endpoint::new(format!("h{}", i % 5), 9000 + i as u16))
        .collect();

    let out = assign(&raw, &endpoints).unwrap();

    assert_eq!(out.len(), endpoints.len());
    let mut seen = vec![false; raw.len()];
    for list in &out {
        for &p in list {
            assert!(!seen[p], "partition {p} assigned twice");
            seen[p] = true;
        }
    }
    assert!(seen.iter().all(|&s| s), "some partition was never assigned");

    let total: usize = out.iter().map(Vec::len).sum();
    assert_eq!(total, 100);
}
