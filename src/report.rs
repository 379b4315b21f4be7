//! Listing reports rendered from per-endpoint results.
//!
//! Each report kind pairs a category label with a typed [`ResultMap`]. The
//! text form is a header followed by one block per endpoint: the YAML
//! rendering of its reply, or its error on the endpoint line.

use crate::address::AddressSet;
use crate::error::{Result, StoreCtlError};
use crate::payload::{Feature, FeatureMap, NvmeController, ScmModule, feature_map};
use crate::results::{ClientResult, Outcome, ResultMap};
use crate::yaml;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// The closed set of reportable item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Feature,
    NvmeController,
    ScmModule,
    /// Opaque replies, typically a map holding only failures
    Result,
}

impl ReportKind {
    /// Singular item name used in the listing header
    pub fn category(&self) -> &'static str {
        match self {
            ReportKind::Feature => "Feature",
            ReportKind::NvmeController => "NvmeController",
            ReportKind::ScmModule => "ScmModule",
            ReportKind::Result => "Result",
        }
    }

    /// Tag used in JSON snapshots
    pub fn tag(&self) -> &'static str {
        match self {
            ReportKind::Feature => "feature",
            ReportKind::NvmeController => "nvme",
            ReportKind::ScmModule => "scm",
            ReportKind::Result => "result",
        }
    }

    pub fn header(&self) -> String {
        listing_header(self.category())
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ReportKind {
    type Err = StoreCtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feature" | "features" => Ok(ReportKind::Feature),
            "nvme" | "nvmecontroller" | "nvmecontrollers" => Ok(ReportKind::NvmeController),
            "scm" | "scmmodule" | "scmmodules" => Ok(ReportKind::ScmModule),
            "result" | "results" => Ok(ReportKind::Result),
            other => Err(StoreCtlError::unsupported(format!(
                "unknown report kind '{}' (expected feature, nvme, scm or result)",
                other
            ))),
        }
    }
}

/// Something learned from the cluster, ready to be listed
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Features(ResultMap<FeatureMap>),
    Nvme(ResultMap<Vec<NvmeController>>),
    Scm(ResultMap<Vec<ScmModule>>),
    Results(ResultMap<Value>),
}

impl Report {
    /// Every address reporting the same feature set
    pub fn features(features: &[Feature], addrs: &AddressSet) -> Self {
        let fm = feature_map(features);
        Report::Features(replicate(&fm, addrs))
    }

    /// Every address reporting the same controllers
    pub fn nvme(ctrlrs: &[NvmeController], addrs: &AddressSet) -> Self {
        Report::Nvme(replicate(&ctrlrs.to_vec(), addrs))
    }

    /// Every address reporting the same modules
    pub fn scm(modules: &[ScmModule], addrs: &AddressSet) -> Self {
        Report::Scm(replicate(&modules.to_vec(), addrs))
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Features(_) => ReportKind::Feature,
            Report::Nvme(_) => ReportKind::NvmeController,
            Report::Scm(_) => ReportKind::ScmModule,
            Report::Results(_) => ReportKind::Result,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Report::Features(m) => m.len(),
            Report::Nvme(m) => m.len(),
            Report::Scm(m) => m.len(),
            Report::Results(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Header plus one block per endpoint, ending in two blank lines
    pub fn render(&self) -> Result<String> {
        let category = self.kind().category();
        match self {
            Report::Features(m) => render_map(category, m),
            Report::Nvme(m) => render_map(category, m),
            Report::Scm(m) => render_map(category, m),
            Report::Results(m) => render_map(category, m),
        }
    }

    /// Snapshot-shaped JSON (`kind` plus `results`)
    pub fn to_json(&self) -> Result<Value> {
        let results = match self {
            Report::Features(m) => serde_json::to_value(m)?,
            Report::Nvme(m) => serde_json::to_value(m)?,
            Report::Scm(m) => serde_json::to_value(m)?,
            Report::Results(m) => serde_json::to_value(m)?,
        };
        Ok(json!({
            "kind": self.kind().tag(),
            "results": results,
        }))
    }

    /// Build a typed report from a JSON endpoint map.
    ///
    /// Fails with `UnsupportedShape` when `results` is not an endpoint map of
    /// `{reply}`/`{error}` entries or a reply does not match `kind`.
    pub fn from_json(kind: ReportKind, results: Value) -> Result<Self> {
        if !results.is_object() {
            return Err(StoreCtlError::unsupported(
                "results must be an object keyed by endpoint address",
            ));
        }
        let report = match kind {
            ReportKind::Feature => Report::Features(typed(kind, results)?),
            ReportKind::NvmeController => Report::Nvme(typed(kind, results)?),
            ReportKind::ScmModule => Report::Scm(typed(kind, results)?),
            ReportKind::Result => Report::Results(typed(kind, results)?),
        };
        tracing::debug!(kind = %kind, endpoints = report.len(), "decoded report");
        Ok(report)
    }
}

/// Render any typed result map under the given singular category.
///
/// Error entries print as `<addr>: <message>` verbatim; replies print as a
/// YAML block under `<addr>:`. Either the whole report renders or an error is
/// returned; no partial output escapes.
pub fn render_map<T: Serialize>(category: &str, results: &ResultMap<T>) -> Result<String> {
    let mut out = listing_header(category);

    for (addr, r) in results.iter() {
        match r.outcome() {
            Outcome::Error(err) => out.push_str(&format!("{}: {}\n", addr, err)),
            Outcome::Reply(reply) => {
                let value = serde_yaml::to_value(reply)?;
                out.push_str(&format!("{}:", addr));
                yaml::write_keyed(&mut out, &value, 0)?;
            }
        }
    }

    out.push_str("\n\n");
    Ok(out)
}

fn listing_header(category: &str) -> String {
    format!("Listing {}s on connected storage servers:\n", category)
}

fn replicate<T: Clone>(reply: &T, addrs: &AddressSet) -> ResultMap<T> {
    addrs
        .iter()
        .map(|addr| ClientResult::reply(addr.clone(), reply.clone()))
        .collect()
}

fn typed<T>(kind: ReportKind, results: Value) -> Result<ResultMap<T>>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(results).map_err(|e| {
        StoreCtlError::unsupported(format!("results do not match {} report: {}", kind, e))
    })
}
