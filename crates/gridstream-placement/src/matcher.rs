//! Balanced bipartite matching of partitions to hosts.
//!
//! Each affinity-bearing partition must land on one of its preferred hosts
//! while the maximum host load stays as low as the affinity graph allows.
//! Two phases:
//!
//! 1. **Seed** — in ascending partition order, take the least-loaded
//!    preferred host (ties to the lowest host index).
//! 2. **Rebalance** — hosts above `target = ceil(nA / nB)` shed partitions
//!    along augmenting paths that terminate at a host below target. Passes
//!    repeat until one completes without an augmentation.
//!
//! The path search is iterative with an explicit frame stack; alternating
//! paths can span the whole graph and must not recurse. Per-host reverse
//! edge cursors are shared across a pass, so each reverse edge is examined
//! at most once per pass: `O(|E| · sqrt(nA + nB))` overall, which for
//! bounded-degree affinity reduces to `O(nA · sqrt(nA))`.

use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::{PlacementError, PlacementResult};
use crate::splitter::AffinityPartition;

/// Result of one matching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    /// Host index → ascending local affinity-partition indices.
    pub host_partitions: Vec<Vec<usize>>,
    /// Local indices left unmatched (their preferred hosts were all
    /// outside the roster). The caller demotes these to the bare queue.
    pub unmatched: Vec<usize>,
    /// Rebalance passes spent before the matching stabilized.
    pub passes: usize,
}

/// Work-stack frame: a partition and the index of the edge currently being
/// explored below it (`None` before any edge has been tried).
struct Frame {
    partition: usize,
    edge: Option<usize>,
}

/// One-shot matcher. All state is sized eagerly at construction and owned
/// exclusively by the run; [`HostMatcher::run`] consumes the instance.
pub struct HostMatcher {
    /// Forward edges: partition → preferred host indices.
    edges: Vec<Vec<usize>>,
    /// Reverse edges: host → partitions listing it, ascending.
    rev: Vec<Vec<usize>>,
    /// Current host of each partition, `None` while unmatched.
    match_for: Vec<Option<usize>>,
    /// Partitions currently matched to each host.
    load: Vec<usize>,
    /// Per-host position in `rev`, reset each pass.
    cursor: Vec<usize>,
    /// Per-pass visitation flags.
    visited: Vec<bool>,
    target: usize,
}

impl HostMatcher {
    pub fn new(affinity: &[AffinityPartition], host_count: usize) -> Self {
        let n = affinity.len();
        let mut edges = Vec::with_capacity(n);
        let mut rev: Vec<Vec<usize>> = vec![Vec::new(); host_count];

        for (i, part) in affinity.iter().enumerate() {
            for &host in &part.hosts {
                rev[host].push(i);
            }
            edges.push(part.hosts.clone());
        }

        let target = if host_count == 0 { 0 } else { n.div_ceil(host_count) };

        Self {
            edges,
            rev,
            match_for: vec![None; n],
            load: vec![0; host_count],
            cursor: vec![0; host_count],
            visited: vec![false; n],
            target,
        }
    }

    /// Ideal per-host load bound, `ceil(nA / nB)`.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Run both phases and hand the matching off by value.
    pub fn run(mut self, cancel: &CancelToken) -> PlacementResult<Matching> {
        self.seed();
        let passes = self.rebalance(cancel)?;

        let mut host_partitions: Vec<Vec<usize>> = vec![Vec::new(); self.load.len()];
        let mut unmatched = Vec::new();
        for (partition, matched) in self.match_for.iter().enumerate() {
            match matched {
                Some(host) => host_partitions[*host].push(partition),
                None => unmatched.push(partition),
            }
        }

        for (host, partitions) in host_partitions.iter().enumerate() {
            if partitions.len() != self.load[host] {
                return Err(PlacementError::Internal(format!(
                    "host {host} load counter {} does not match {} assigned partitions",
                    self.load[host],
                    partitions.len()
                )));
            }
        }

        debug!(
            partitions = self.edges.len(),
            hosts = self.load.len(),
            target = self.target,
            passes,
            "matching stabilized"
        );

        Ok(Matching {
            host_partitions,
            unmatched,
            passes,
        })
    }

    /// Phase 1: each partition takes its least-loaded preferred host.
    fn seed(&mut self) {
        for partition in 0..self.edges.len() {
            let best = self.edges[partition]
                .iter()
                .copied()
                .min_by_key(|&host| (self.load[host], host));
            if let Some(host) = best {
                self.match_for[partition] = Some(host);
                self.load[host] += 1;
            }
        }
    }

    /// Phase 2: drain overloaded hosts through augmenting paths until a
    /// full pass produces no change.
    fn rebalance(&mut self, cancel: &CancelToken) -> PlacementResult<usize> {
        let mut passes = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(PlacementError::Cancelled);
            }
            if !self.load.iter().any(|&l| l > self.target) {
                break;
            }

            passes += 1;
            self.visited.fill(false);
            self.cursor.fill(0);
            let mut dirty = false;

            for host in 0..self.load.len() {
                while self.load[host] > self.target && self.cursor[host] < self.rev[host].len() {
                    let partition = self.rev[host][self.cursor[host]];
                    self.cursor[host] += 1;
                    if self.match_for[partition] != Some(host) || self.visited[partition] {
                        continue;
                    }
                    if self.augment(partition) {
                        dirty = true;
                    }
                }
            }

            if !dirty {
                break;
            }
        }
        Ok(passes)
    }

    /// Search one augmenting path from `start` and, on success, rewrite
    /// matches along it. Every rewrite moves a single partition between
    /// hosts, so the overloaded origin loses exactly one unit and the
    /// terminal host gains exactly one.
    fn augment(&mut self, start: usize) -> bool {
        let mut stack = vec![Frame {
            partition: start,
            edge: None,
        }];
        let mut found = false;

        while let Some(frame) = stack.pop() {
            let partition = frame.partition;

            if found {
                // Unwind: the subtree below this edge freed a slot there.
                if let Some(edge) = frame.edge {
                    let host = self.edges[partition][edge];
                    self.rematch(partition, host);
                }
                continue;
            }

            let mut next_edge = match frame.edge {
                None => {
                    self.visited[partition] = true;
                    if let Some(host) = self.direct_target(partition) {
                        self.rematch(partition, host);
                        found = true;
                        continue;
                    }
                    0
                }
                Some(edge) => edge + 1,
            };

            // Descend through the first edge that still has an unvisited
            // partition matched to it. Dead ends drop the frame.
            while next_edge < self.edges[partition].len() {
                let host = self.edges[partition][next_edge];
                if let Some(next) = self.next_candidate(host) {
                    stack.push(Frame {
                        partition,
                        edge: Some(next_edge),
                    });
                    stack.push(Frame {
                        partition: next,
                        edge: None,
                    });
                    break;
                }
                next_edge += 1;
            }
        }

        found
    }

    /// First preferred host that is not the partition's current match and
    /// sits below target.
    fn direct_target(&self, partition: usize) -> Option<usize> {
        self.edges[partition]
            .iter()
            .copied()
            .find(|&host| Some(host) != self.match_for[partition] && self.load[host] < self.target)
    }

    /// Advance `cursor[host]` to the next unvisited partition still matched
    /// to `host`. Skipped entries stay skipped for the rest of the pass.
    fn next_candidate(&mut self, host: usize) -> Option<usize> {
        while self.cursor[host] < self.rev[host].len() {
            let partition = self.rev[host][self.cursor[host]];
            if !self.visited[partition] && self.match_for[partition] == Some(host) {
                return Some(partition);
            }
            self.cursor[host] += 1;
        }
        None
    }

    /// Move `partition` onto `host`, keeping both load counters exact.
    fn rematch(&mut self, partition: usize, host: usize) {
        if let Some(old) = self.match_for[partition] {
            self.load[old] -= 1;
        }
        self.match_for[partition] = Some(host);
        self.load[host] += 1;
    }
}
