//! Onbit import worker - bulk customer-record importer for the Onbit CRM
//!
//! Decodes an uploaded spreadsheet, maps it into customer records under one
//! of two schemas, and submits them to the backend in paced chunks.

mod cli;
mod config;
mod services;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::services::import_runner::{render_summary, run_import, ImportOptions};
use crate::services::template;
use crate::services::transmitter::HttpEndpoint;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "worker.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - both stdout and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,onbit_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Import {
            file,
            schema,
            encoding,
            chunk_size,
            delay_ms,
            dry_run,
        } => {
            let config = config::Config::from_env()?;
            let mut transmitter = config.transmitter();
            if let Some(size) = chunk_size {
                transmitter.chunk_size = size.max(1);
            }
            if let Some(ms) = delay_ms {
                transmitter.chunk_delay = std::time::Duration::from_millis(ms);
            }

            let endpoint = Arc::new(HttpEndpoint::new(&config.api_url, config.request_timeout())?);

            // Ctrl-C stops the loop at the next chunk boundary
            let cancel = CancellationToken::new();
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupt received; finishing the current chunk");
                    signal_cancel.cancel();
                }
            });

            let options = ImportOptions {
                schema,
                encoding,
                transmitter,
                dry_run,
            };

            let outcome = run_import(&file, &options, endpoint, cancel).await?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            match outcome.report {
                Some(report) => println!("{}", render_summary(&file_name, &report, outcome.skipped)),
                None => println!(
                    "검증 완료: {}건 매핑, {}건 건너뜀 (전송하지 않음)",
                    outcome.mapped, outcome.skipped
                ),
            }
        }
        cli::Command::Template { out } => {
            template::write_template(&out)?;
            info!("template ready at {}", out.display());
            println!("가져오기 양식을 저장했습니다: {}", out.display());
        }
    }

    Ok(())
}
