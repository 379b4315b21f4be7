//! JSON snapshots written by the RPC fan-out.
//!
//! ```json
//! {
//!   "kind": "nvme",
//!   "addresses": ["1.2.3.4:10000"],
//!   "results": { "1.2.3.4:10000": { "reply": [] } }
//! }
//! ```

use crate::address::AddressSet;
use crate::error::{Result, StoreCtlError};
use crate::report::{Report, ReportKind};
use crate::results::ResultMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub kind: Option<String>,
    /// Intended targets; may be empty when the producer did not record them
    #[serde(default)]
    pub addresses: AddressSet,
    pub results: Value,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreCtlError::Io {
            message: format!("reading snapshot {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(StoreCtlError::unsupported("snapshot must be a JSON object"));
        }
        serde_json::from_value(value)
            .map_err(|e| StoreCtlError::unsupported(format!("malformed snapshot: {}", e)))
    }

    /// Declared kind, or the opaque result kind when none was recorded
    pub fn kind(&self) -> Result<ReportKind> {
        match &self.kind {
            Some(k) => k.parse(),
            None => Ok(ReportKind::Result),
        }
    }

    /// Outcomes with replies left opaque; enough to tell failures apart
    pub fn result_map(&self) -> Result<ResultMap<Value>> {
        if !self.results.is_object() {
            return Err(StoreCtlError::unsupported(
                "results must be an object keyed by endpoint address",
            ));
        }
        serde_json::from_value(self.results.clone())
            .map_err(|e| StoreCtlError::unsupported(format!("malformed results: {}", e)))
    }

    pub fn into_report(self) -> Result<Report> {
        let kind = self.kind()?;
        Report::from_json(kind, self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults_to_result() {
        let snap = Snapshot::parse(r#"{"results": {}}"#).unwrap();
        assert_eq!(snap.kind().unwrap(), ReportKind::Result);
        assert!(snap.addresses.is_empty());
    }

    #[test]
    fn test_missing_results_is_unsupported() {
        let err = Snapshot::parse(r#"{"kind": "scm"}"#).unwrap_err();
        assert!(matches!(err, StoreCtlError::UnsupportedShape { .. }));
    }

    #[test]
    fn test_top_level_array_is_unsupported() {
        let err = Snapshot::parse("[1, 2]").unwrap_err();
        assert!(matches!(err, StoreCtlError::UnsupportedShape { .. }));
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = Snapshot::parse("{not json").unwrap_err();
        assert!(matches!(err, StoreCtlError::Serialization { .. }));
    }

    #[test]
    fn test_entry_without_tag_is_unsupported() {
        let snap = Snapshot::parse(r#"{"results": {"a:1": {"status": "ok"}}}"#).unwrap();
        let err = snap.result_map().unwrap_err();
        assert!(matches!(err, StoreCtlError::UnsupportedShape { .. }));
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let snap = Snapshot::parse(r#"{"kind": "pools", "results": {}}"#).unwrap();
        let err = snap.into_report().unwrap_err();
        assert!(err.to_string().contains("unknown report kind"));
    }
}
