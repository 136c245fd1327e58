//! End-to-end import orchestration
//!
//! Wires decoder → schema mapper → transmission controller and renders the
//! operator-facing summary. Decode failures abort the run immediately; every
//! per-row and per-chunk problem after that lands in the report instead.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::services::decoder::{decode_tabular, SourceEncoding};
use crate::services::profile::{map_rows, SchemaKind};
use crate::services::transmitter::{SubmitEndpoint, TransmissionController, TransmitterConfig};
use crate::types::ImportReport;

pub struct ImportOptions {
    pub schema: SchemaKind,
    pub encoding: SourceEncoding,
    pub transmitter: TransmitterConfig,
    /// Parse and map only; nothing is submitted
    pub dry_run: bool,
}

pub struct ImportOutcome {
    /// Rows dropped by the garbage-row filter
    pub skipped: usize,
    /// How many records were mapped for submission
    pub mapped: usize,
    /// `None` on a dry run
    pub report: Option<ImportReport>,
}

pub async fn run_import(
    path: &Path,
    options: &ImportOptions,
    endpoint: Arc<dyn SubmitEndpoint>,
    cancel: CancellationToken,
) -> Result<ImportOutcome> {
    let run_id = Uuid::new_v4();
    let profile = options.schema.profile();
    info!(
        "import run {}: file '{}', profile {}, encoding {}",
        run_id,
        path.display(),
        profile.name(),
        options.encoding.label()
    );

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let text = decode_tabular(&bytes, options.encoding, profile.has_notice_line())
        .context("파일 디코딩에 실패했습니다")?;

    let mapped = map_rows(profile, &text).context("파일 형식을 해석할 수 없습니다")?;
    info!(
        "import run {}: {} records mapped, {} rows skipped",
        run_id,
        mapped.records.len(),
        mapped.skipped
    );

    if options.dry_run {
        return Ok(ImportOutcome {
            skipped: mapped.skipped,
            mapped: mapped.records.len(),
            report: None,
        });
    }

    anyhow::ensure!(
        !mapped.records.is_empty(),
        "가져올 고객 레코드가 없습니다 (건너뛴 행 {}건)",
        mapped.skipped
    );

    let record_count = mapped.records.len();
    let controller = TransmissionController::new(endpoint, options.transmitter.clone(), cancel);
    let report = controller.transmit(mapped.records).await?;

    info!(
        "import run {} finished: {}/{} succeeded, {} failed{}",
        run_id,
        report.succeeded.len(),
        report.total,
        report.failed.len(),
        if report.cancelled { " (cancelled)" } else { "" }
    );

    Ok(ImportOutcome {
        skipped: mapped.skipped,
        mapped: record_count,
        report: Some(report),
    })
}

/// Operator-facing run summary (total / succeeded / failed, first 20 failure
/// details with the original input values)
pub fn render_summary(file_name: &str, report: &ImportReport, skipped: usize) -> String {
    let mut out = format!("'{}' 고객 가져오기 결과\n", file_name);
    out.push_str(&format!("전체: {}건\n", report.total));
    out.push_str(&format!("성공: {}건\n", report.succeeded.len()));
    out.push_str(&format!("실패: {}건\n", report.failed.len()));
    if skipped > 0 {
        out.push_str(&format!("건너뜀: {}건 (빈 행 또는 필수 항목 누락)\n", skipped));
    }
    if report.cancelled {
        out.push_str("※ 사용자 요청으로 중단된 부분 결과입니다\n");
    }

    if !report.failed.is_empty() {
        out.push_str("\n실패 내역:\n");
        for (i, failed) in report.failed.iter().take(20).enumerate() {
            out.push_str(&format!(
                "{}. {} ({}) - {}\n",
                i + 1,
                failed.record.name,
                failed.record.phone,
                failed.reason
            ));
        }
        if report.failed.len() > 20 {
            out.push_str(&format!("... 외 {}건\n", report.failed.len() - 20));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transmitter::SubmitError;
    use crate::types::{BulkImportResponse, CustomerImportRecord, FailReason};
    use async_trait::async_trait;

    struct AcceptAll;

    #[async_trait]
    impl SubmitEndpoint for AcceptAll {
        async fn submit_chunk(
            &self,
            _records: &[CustomerImportRecord],
        ) -> Result<BulkImportResponse, SubmitError> {
            Ok(BulkImportResponse {
                success: true,
                message: None,
                data: None,
            })
        }
    }

    fn options(dry_run: bool) -> ImportOptions {
        ImportOptions {
            schema: SchemaKind::Contacts,
            encoding: SourceEncoding::Utf8,
            transmitter: TransmitterConfig::default(),
            dry_run,
        }
    }

    fn write_fixture(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("onbit-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    const CONTACTS: &str = "First Name,Middle Name,Last Name,Phone 1 - Value,Phone 2 - Value,Phone 3 - Value,E-mail 1 - Value,E-mail 2 - Value,Address 1 - Formatted,Address 1 - Street\n\
홍,,길동,010-1234-5678,,,,,,\n\
,,,,,,,,,\n";

    #[tokio::test]
    async fn dry_run_maps_without_submitting() {
        let path = write_fixture("dry.csv", CONTACTS);
        let outcome = run_import(
            &path,
            &options(true),
            Arc::new(AcceptAll),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.mapped, 1);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.report.is_none());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn full_run_produces_complete_report() {
        let path = write_fixture("full.csv", CONTACTS);
        let outcome = run_import(
            &path,
            &options(false),
            Arc::new(AcceptAll),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let report = outcome.report.unwrap();
        assert_eq!(report.total, 1);
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.succeeded[0].name, "홍 길동");
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn decode_failure_aborts_the_whole_run() {
        let path =
            std::env::temp_dir().join(format!("onbit-{}-bad.csv", std::process::id()));
        std::fs::write(&path, [0xFF, 0xFE, 0x80]).unwrap();

        let result = run_import(
            &path,
            &options(false),
            Arc::new(AcceptAll),
            CancellationToken::new(),
        )
        .await;

        assert!(result.is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn summary_lists_failure_details() {
        let mut report = ImportReport::new(2);
        report.record_success(CustomerImportRecord::named("성공씨"));
        let mut failed = CustomerImportRecord::named("실패씨");
        failed.phone = "01012345678".to_string();
        report.record_failure(failed, FailReason::Timeout);

        let summary = render_summary("고객.csv", &report, 3);
        assert!(summary.contains("전체: 2건"));
        assert!(summary.contains("성공: 1건"));
        assert!(summary.contains("실패: 1건"));
        assert!(summary.contains("건너뜀: 3건"));
        assert!(summary.contains("실패씨 (01012345678) - timeout"));
    }
}
