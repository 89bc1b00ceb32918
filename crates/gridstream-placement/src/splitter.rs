//! Partition splitter.
//!
//! Separates input partitions into those carrying at least one preferred
//! host and those without any, resolving hostnames to dense host indices
//! along the way. Hosts outside the roster are stripped silently; a
//! partition whose preferred list is non-empty but resolves to no known
//! host stays affinity-classified with an empty edge list, and the matcher
//! leaves it unmatched.

use crate::roster::HostRoster;

/// An affinity-bearing partition: its original index plus forward edges
/// (preferred hosts resolved to host indices, first occurrence order,
/// duplicates dropped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityPartition {
    pub partition: usize,
    pub hosts: Vec<usize>,
}

/// Splitter output. Both sequences are in ascending original-index order.
#[derive(Debug, Default)]
pub struct SplitPartitions {
    pub affinity: Vec<AffinityPartition>,
    pub bare: Vec<usize>,
}

/// Split raw affinity lists into affinity-bearing and bare partitions.
pub fn split_partitions(affinities: &[Vec<String>], roster: &HostRoster) -> SplitPartitions {
    let mut split = SplitPartitions::default();

    for (partition, preferred) in affinities.iter().enumerate() {
        if preferred.is_empty() {
            split.bare.push(partition);
            continue;
        }

        let mut hosts = Vec::with_capacity(preferred.len());
        for name in preferred {
            if let Some(host) = roster.host_index(name) {
                if !hosts.contains(&host) {
                    hosts.push(host);
                }
            }
        }
        split.affinity.push(AffinityPartition { partition, hosts });
    }

    split
}
