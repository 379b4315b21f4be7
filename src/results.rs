//! Per-endpoint outcomes collected from a fan-out across storage servers.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Error recorded for a single endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointError {
    message: String,
}

impl EndpointError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EndpointError {}

/// Either the reply an endpoint sent or the error it produced.
///
/// Serializes externally tagged: `{"reply": ...}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome<T> {
    Reply(T),
    Error(EndpointError),
}

/// Outcome of one call against one endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ClientResult<T> {
    address: Address,
    outcome: Outcome<T>,
}

impl<T> ClientResult<T> {
    pub fn reply(address: impl Into<Address>, reply: T) -> Self {
        Self {
            address: address.into(),
            outcome: Outcome::Reply(reply),
        }
    }

    pub fn failed(address: impl Into<Address>, err: impl fmt::Display) -> Self {
        Self {
            address: address.into(),
            outcome: Outcome::Error(EndpointError::new(err.to_string())),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn outcome(&self) -> &Outcome<T> {
        &self.outcome
    }

    pub fn error(&self) -> Option<&EndpointError> {
        match &self.outcome {
            Outcome::Error(e) => Some(e),
            Outcome::Reply(_) => None,
        }
    }

    pub fn reply_ref(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Reply(r) => Some(r),
            Outcome::Error(_) => None,
        }
    }

    pub fn is_err(&self) -> bool {
        self.error().is_some()
    }
}

/// Endpoint address to outcome, iterated in address order
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMap<T> {
    entries: BTreeMap<Address, ClientResult<T>>,
}

impl<T> Default for ResultMap<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> ResultMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result, replacing any earlier outcome for the same address
    pub fn insert(&mut self, result: ClientResult<T>) -> Option<ClientResult<T>> {
        self.entries.insert(result.address.clone(), result)
    }

    pub fn get(&self, addr: &Address) -> Option<&ClientResult<T>> {
        self.entries.get(addr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Address> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &ClientResult<T>)> {
        self.entries.iter()
    }

    /// Entries carrying an error, in address order
    pub fn failures(&self) -> impl Iterator<Item = (&Address, &EndpointError)> {
        self.entries
            .iter()
            .filter_map(|(addr, r)| r.error().map(|e| (addr, e)))
    }
}

impl<T> FromIterator<ClientResult<T>> for ResultMap<T> {
    fn from_iter<I: IntoIterator<Item = ClientResult<T>>>(iter: I) -> Self {
        let mut map = Self::new();
        for r in iter {
            map.insert(r);
        }
        map
    }
}

impl<T: Serialize> Serialize for ResultMap<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|(a, r)| (a, &r.outcome)))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ResultMap<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<Address, Outcome<T>>::deserialize(deserializer)?;
        let entries = raw
            .into_iter()
            .map(|(address, outcome)| {
                (
                    address.clone(),
                    ClientResult { address, outcome },
                )
            })
            .collect();
        Ok(Self { entries })
    }
}
