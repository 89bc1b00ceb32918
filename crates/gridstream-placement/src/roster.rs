//! Endpoint roster and host index table.
//!
//! Hostnames are interned into dense indices by first occurrence in the
//! endpoint order. That order drives deterministic tie-breaks downstream,
//! so construction is order-stable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlacementError, PlacementResult};

/// One database ingestion channel. Several endpoints may share a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// Dense host index table built from an endpoint roster.
///
/// Maps hostname → host index in `[0, H)` and host index → the indices of
/// the endpoints bound to that host, both in original endpoint order.
#[derive(Debug, Clone)]
pub struct HostRoster {
    index_by_host: HashMap<String, usize>,
    endpoints_by_host: Vec<Vec<usize>>,
    endpoint_count: usize,
}

impl HostRoster {
    /// Build the roster. Fails with `InvalidInput` iff `endpoints` is empty.
    pub fn build(endpoints: &[Endpoint]) -> PlacementResult<Self> {
        if endpoints.is_empty() {
            return Err(PlacementError::InvalidInput(
                "endpoint list is empty".to_string(),
            ));
        }

        let mut index_by_host: HashMap<String, usize> = HashMap::new();
        let mut endpoints_by_host: Vec<Vec<usize>> = Vec::new();

        for (i, endpoint) in endpoints.iter().enumerate() {
            let next = endpoints_by_host.len();
            let host = *index_by_host.entry(endpoint.host.clone()).or_insert(next);
            if host == endpoints_by_host.len() {
                endpoints_by_host.push(Vec::new());
            }
            endpoints_by_host[host].push(i);
        }

        Ok(Self {
            index_by_host,
            endpoints_by_host,
            endpoint_count: endpoints.len(),
        })
    }

    /// Number of distinct hosts.
    pub fn host_count(&self) -> usize {
        self.endpoints_by_host.len()
    }

    /// Number of endpoints the roster was built from.
    pub fn endpoint_count(&self) -> usize {
        self.endpoint_count
    }

    /// Dense index for `host`, or `None` if the host is not in the roster.
    pub fn host_index(&self, host: &str) -> Option<usize> {
        self.index_by_host.get(host).copied()
    }

    /// Endpoint indices bound to `host`, in original endpoint order.
    pub fn endpoints_of(&self, host: usize) -> &[usize] {
        &self.endpoints_by_host[host]
    }
}
