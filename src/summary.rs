//! Connection summaries: which endpoints answered and which failed.

use crate::address::{Address, AddressSet};
use crate::results::{EndpointError, ResultMap};
use serde_json::{Map, Value, json};
use std::fmt;

pub const NO_ACTIVE_CONNECTIONS: &str = "No active connections!";

/// Failed endpoints (address order) and the targets left active.
///
/// Only entries carrying an error count as failed; a target with no entry
/// at all is active.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSummary {
    failures: Vec<(Address, EndpointError)>,
    active: AddressSet,
}

impl ConnectionSummary {
    pub fn new<T>(addrs: &AddressSet, results: &ResultMap<T>) -> Self {
        let failures: Vec<(Address, EndpointError)> = results
            .failures()
            .map(|(addr, err)| (addr.clone(), err.clone()))
            .collect();
        let active = addrs.without(failures.iter().map(|(addr, _)| addr));

        tracing::debug!(
            targets = addrs.len(),
            failed = failures.len(),
            active = active.len(),
            "summarized connections"
        );

        Self { failures, active }
    }

    pub fn failures(&self) -> &[(Address, EndpointError)] {
        &self.failures
    }

    pub fn active(&self) -> &AddressSet {
        &self.active
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Failure lines followed by the active connections line
    pub fn sprint(&self) -> String {
        let mut out = String::new();
        for (addr, err) in &self.failures {
            out.push_str(&format!("failed to connect to {} ({})\n", addr, err));
        }
        out.push_str(&format!("Active connections: {}\n", self.active));
        out
    }

    pub fn to_json(&self) -> Value {
        let failed: Map<String, Value> = self
            .failures
            .iter()
            .map(|(addr, err)| (addr.to_string(), Value::String(err.to_string())))
            .collect();
        json!({
            "failed": failed,
            "active": self.active,
        })
    }
}

/// Full summary, ending with the no-active marker when nothing answered
impl fmt::Display for ConnectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sprint())?;
        if !self.has_active() {
            f.write_str(NO_ACTIVE_CONNECTIONS)?;
        }
        Ok(())
    }
}

/// Report failed connections and the remaining active ones
pub fn sprint_conns<T>(addrs: &AddressSet, results: &ResultMap<T>) -> String {
    ConnectionSummary::new(addrs, results).sprint()
}

/// Like [`sprint_conns`], plus the no-active marker when nothing answered
pub fn summarize<T>(addrs: &AddressSet, results: &ResultMap<T>) -> String {
    ConnectionSummary::new(addrs, results).to_string()
}
