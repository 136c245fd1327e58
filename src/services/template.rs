//! Downloadable import template generation
//!
//! The produced file must round-trip through the template profile: UTF-8 with
//! BOM, one notice line carrying the 주의 marker, the exact header labels,
//! then example rows.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::services::profile::TEMPLATE_COLUMNS;

const NOTICE_LINE: &str =
    "※ 주의: 이 줄과 예시 행은 업로드 전에 지우지 않아도 됩니다. 머리글 행은 수정하지 마세요.";

const EXAMPLE_ROWS: &[&[&str]] = &[
    &[
        "홍길동",
        "010-1234-5678",
        "hong@example.com",
        "매수, 일반",
        "매매, 전세",
        "3억",
        "5억",
        "2억",
        "3억",
        "",
        "",
        "",
        "",
        "",
        "4억",
        "강남구",
        "2026-01-15",
        "서울시 강남구",
        "빠른 입주 희망",
    ],
    &[
        "김영희",
        "010-9876-5432",
        "",
        "실거주",
        "월세",
        "",
        "",
        "",
        "",
        "5천만",
        "1억",
        "50",
        "100",
        "",
        "",
        "마포구",
        "",
        "",
        "",
    ],
];

/// Render the template file contents
pub fn render() -> String {
    let mut out = String::from('\u{feff}');
    out.push_str(NOTICE_LINE);
    out.push('\n');
    out.push_str(&csv_line(TEMPLATE_COLUMNS));
    out.push('\n');
    for row in EXAMPLE_ROWS {
        out.push_str(&csv_line(row));
        out.push('\n');
    }
    out
}

fn csv_line(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| quote_cell(cell))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Write the template to `path`
pub fn write_template(path: &Path) -> Result<()> {
    std::fs::write(path, render())
        .with_context(|| format!("failed to write template to {}", path.display()))?;
    info!("import template written to {}", path.display());
    Ok(())
}
