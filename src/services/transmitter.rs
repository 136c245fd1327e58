//! Chunked transmission to the bulk-import endpoint
//!
//! One chunk in flight at a time, a fixed pacing delay between chunks, and no
//! automatic retries. A failed chunk marks its records failed and moves on —
//! the operator always gets a complete accounting at the end. Cancellation is
//! honored at chunk boundaries only.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::services::chunker::chunk;
use crate::types::{
    BulkImportRequest, BulkImportResponse, CustomerImportRecord, FailReason, ImportReport,
};

/// Transport-level submission failure, classified for the report
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("unclassified transport error: {0}")]
    Unknown(String),
}

impl From<SubmitError> for FailReason {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Timeout => FailReason::Timeout,
            SubmitError::Network(_) => FailReason::Network,
            SubmitError::Server(msg) => FailReason::ServerMessage(msg),
            SubmitError::Unknown(_) => FailReason::Unknown,
        }
    }
}

/// The backend's bulk-import operation, consumed as an opaque seam so the
/// controller can be driven without a network in tests
#[async_trait]
pub trait SubmitEndpoint: Send + Sync {
    async fn submit_chunk(
        &self,
        records: &[CustomerImportRecord],
    ) -> Result<BulkImportResponse, SubmitError>;
}

// =============================================================================
// HTTP ENDPOINT
// =============================================================================

/// Reqwest-backed submission client
pub struct HttpEndpoint {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEndpoint {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/api/customers/bulk-import", self.base_url)
    }
}

#[async_trait]
impl SubmitEndpoint for HttpEndpoint {
    async fn submit_chunk(
        &self,
        records: &[CustomerImportRecord],
    ) -> Result<BulkImportResponse, SubmitError> {
        let request = BulkImportRequest {
            customers: records.to_vec(),
        };

        let response = self
            .client
            .post(self.url())
            .json(&request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        // A parseable envelope is a structurally successful response even on
        // an error status, as long as the server accepted the request shape
        if let Ok(parsed) = serde_json::from_str::<BulkImportResponse>(&body) {
            if status.is_success() {
                return Ok(parsed);
            }
            return Err(SubmitError::Server(
                parsed.message.unwrap_or_else(|| status.to_string()),
            ));
        }

        // Error payloads that only carry a message field
        #[derive(serde::Deserialize)]
        struct MessageOnly {
            message: String,
        }
        if let Ok(msg) = serde_json::from_str::<MessageOnly>(&body) {
            return Err(SubmitError::Server(msg.message));
        }

        Err(SubmitError::Unknown(format!(
            "unparseable response (status {})",
            status
        )))
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Timeout
    } else if err.is_connect() || err.is_request() {
        SubmitError::Network(err.to_string())
    } else {
        SubmitError::Unknown(err.to_string())
    }
}

// =============================================================================
// TRANSMISSION CONTROLLER
// =============================================================================

#[derive(Debug, Clone)]
pub struct TransmitterConfig {
    pub chunk_size: usize,
    pub chunk_delay: Duration,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            chunk_delay: Duration::from_millis(100),
        }
    }
}

/// Sequential single-in-flight chunk loop. Deliberate backpressure: the next
/// chunk is not built or submitted until the previous outcome is recorded.
pub struct TransmissionController {
    endpoint: Arc<dyn SubmitEndpoint>,
    config: TransmitterConfig,
    cancel: CancellationToken,
}

impl TransmissionController {
    pub fn new(
        endpoint: Arc<dyn SubmitEndpoint>,
        config: TransmitterConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            endpoint,
            config,
            cancel,
        }
    }

    /// Submit every chunk and aggregate the outcomes into one report
    pub async fn transmit(&self, records: Vec<CustomerImportRecord>) -> Result<ImportReport> {
        anyhow::ensure!(!records.is_empty(), "no records to transmit");

        let total = records.len();
        let mut report = ImportReport::new(total);
        let chunks = chunk(records, self.config.chunk_size);
        let chunk_count = chunks.len();
        info!(
            "transmitting {} records in {} chunk(s) of up to {}",
            total, chunk_count, self.config.chunk_size
        );

        for (i, chunk_records) in chunks.into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(
                    "import cancelled before chunk {}/{}; returning partial report",
                    i + 1,
                    chunk_count
                );
                report.cancelled = true;
                break;
            }

            let chunk_len = chunk_records.len();
            match self.endpoint.submit_chunk(&chunk_records).await {
                Ok(response) => {
                    merge_response(&mut report, chunk_records, response);
                    info!("chunk {}/{} processed ({} records)", i + 1, chunk_count, chunk_len);
                }
                Err(err) => {
                    warn!("chunk {}/{} failed: {}", i + 1, chunk_count, err);
                    report.fail_chunk(chunk_records, err.into());
                }
            }

            if i + 1 < chunk_count {
                tokio::time::sleep(self.config.chunk_delay).await;
            }
        }

        report.check_consistency()?;
        Ok(report)
    }
}

/// Fold one chunk's structurally successful response into the report
fn merge_response(
    report: &mut ImportReport,
    chunk_records: Vec<CustomerImportRecord>,
    response: BulkImportResponse,
) {
    if !response.success {
        let message = response
            .message
            .unwrap_or_else(|| "서버가 요청을 거부했습니다".to_string());
        report.fail_chunk(chunk_records, FailReason::ChunkRejected(message));
        return;
    }

    match response.data {
        // Endpoint-declared per-record outcomes are authoritative
        Some(data) => {
            for record in data.success {
                report.record_success(record);
            }
            for entry in data.failed {
                let reason = entry.reason.unwrap_or_else(|| "원인 불명".to_string());
                report.record_failure(entry.customer, FailReason::RecordRejected(reason));
            }
        }
        // No per-record detail: the whole chunk is accepted
        None => {
            for record in chunk_records {
                report.record_success(record);
            }
        }
    }
}
