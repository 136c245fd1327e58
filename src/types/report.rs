//! Import report accumulation

use serde::{Deserialize, Serialize};

use super::customer::CustomerImportRecord;

/// Why a record ended up in the failed list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "message")]
pub enum FailReason {
    /// Request could not complete before the client timeout
    Timeout,
    /// Connection-level failure (DNS, refused, reset)
    Network,
    /// The server returned an error with a parseable message
    ServerMessage(String),
    /// Transport failure with no usable detail
    Unknown,
    /// Structurally successful response that rejected the whole chunk
    ChunkRejected(String),
    /// The endpoint's per-record outcome list marked this record failed
    RecordRejected(String),
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailReason::Timeout => write!(f, "timeout"),
            FailReason::Network => write!(f, "network"),
            FailReason::ServerMessage(msg) => write!(f, "server-message: {}", msg),
            FailReason::Unknown => write!(f, "unknown"),
            FailReason::ChunkRejected(msg) => write!(f, "rejected: {}", msg),
            FailReason::RecordRejected(msg) => write!(f, "record rejected: {}", msg),
        }
    }
}

/// A failed record together with its original input values, so the operator
/// sees exactly what was submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedRecord {
    pub record: CustomerImportRecord,
    pub reason: FailReason,
}

/// Accumulated outcome of one import run.
///
/// `succeeded.len() + failed.len() == total` must hold once every chunk has
/// been processed; `check_consistency` asserts it. A cancelled run is exempt —
/// records of never-submitted chunks appear in neither list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total: usize,
    pub succeeded: Vec<CustomerImportRecord>,
    pub failed: Vec<FailedRecord>,
    pub cancelled: bool,
}

impl ImportReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: Vec::new(),
            failed: Vec::new(),
            cancelled: false,
        }
    }

    pub fn record_success(&mut self, record: CustomerImportRecord) {
        self.succeeded.push(record);
    }

    pub fn record_failure(&mut self, record: CustomerImportRecord, reason: FailReason) {
        self.failed.push(FailedRecord { record, reason });
    }

    /// Mark every record of a chunk failed with a shared reason.
    pub fn fail_chunk(&mut self, chunk: Vec<CustomerImportRecord>, reason: FailReason) {
        for record in chunk {
            self.record_failure(record, reason.clone());
        }
    }

    /// Post-condition from the aggregation contract. A violation means the
    /// mapper or controller dropped records silently — a programming error,
    /// not an operator-facing condition.
    pub fn check_consistency(&self) -> anyhow::Result<()> {
        if self.cancelled {
            return Ok(());
        }
        anyhow::ensure!(
            self.succeeded.len() + self.failed.len() == self.total,
            "import report inconsistent: {} succeeded + {} failed != {} total",
            self.succeeded.len(),
            self.failed.len(),
            self.total,
        );
        Ok(())
    }
}
