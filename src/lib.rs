//! Reporting core for the storage management CLI.
//!
//! Results of a fan-out across storage servers arrive as a [`ResultMap`]
//! keyed by endpoint address. [`summary`] reports which endpoints answered;
//! [`report`] lists what they returned.

pub mod address;
pub mod config;
pub mod error;
pub mod payload;
pub mod report;
pub mod results;
pub mod snapshot;
pub mod summary;
pub mod yaml;

pub use address::{Address, AddressSet};
pub use error::{Result, StoreCtlError};
pub use report::{Report, ReportKind, render_map};
pub use results::{ClientResult, EndpointError, Outcome, ResultMap};
pub use snapshot::Snapshot;
pub use summary::{ConnectionSummary, sprint_conns, summarize};

