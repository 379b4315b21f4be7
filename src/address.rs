use crate::error::{Result, StoreCtlError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Storage server endpoint in `host:port` form, compared as an opaque string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered set of target endpoints for one invocation.
///
/// Iteration follows insertion order; a repeated address keeps its first
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AddressSet {
    addrs: Vec<Address>,
}

impl AddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated host list such as `"a:10000,b"`.
    ///
    /// Entries without a port get `default_port`. Blank entries are skipped.
    pub fn parse_hostlist(input: &str, default_port: u16) -> Result<Self> {
        let mut set = Self::new();
        for raw in input.split(',') {
            let entry = raw.trim();
            if entry.is_empty() {
                continue;
            }
            set.push(normalize_host(entry, default_port)?);
        }
        Ok(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.addrs.iter()
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn contains(&self, addr: &Address) -> bool {
        self.addrs.contains(addr)
    }

    /// Addresses of `self` not in `excluded`, in the original order
    pub fn without<'a>(&self, excluded: impl IntoIterator<Item = &'a Address>) -> AddressSet {
        let excluded: HashSet<&Address> = excluded.into_iter().collect();
        self.addrs
            .iter()
            .filter(|a| !excluded.contains(a))
            .cloned()
            .collect()
    }

    fn push(&mut self, addr: Address) {
        if !self.addrs.contains(&addr) {
            self.addrs.push(addr);
        }
    }
}

impl FromIterator<Address> for AddressSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        let mut set = Self::new();
        for addr in iter {
            set.push(addr);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for AddressSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(Address::from).collect()
    }
}

impl<'a> IntoIterator for &'a AddressSet {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.iter()
    }
}

impl<'de> Deserialize<'de> for AddressSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let addrs = Vec::<Address>::deserialize(deserializer)?;
        Ok(addrs.into_iter().collect())
    }
}

/// Prints like a Go slice: `[a b c]`
impl fmt::Display for AddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, addr) in self.addrs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(addr.as_str())?;
        }
        f.write_str("]")
    }
}

fn normalize_host(entry: &str, default_port: u16) -> Result<Address> {
    match entry.rsplit_once(':') {
        None => Ok(Address::new(format!("{}:{}", entry, default_port))),
        Some((host, port)) => {
            if host.is_empty() {
                return Err(StoreCtlError::Config {
                    message: format!("host list entry '{}' is missing a host name", entry),
                });
            }
            if port.parse::<u16>().is_err() {
                return Err(StoreCtlError::Config {
                    message: format!("host list entry '{}' has an invalid port", entry),
                });
            }
            Ok(Address::new(entry))
        }
    }
}
