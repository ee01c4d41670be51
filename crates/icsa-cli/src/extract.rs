//! URL-mode analysis: export comments for a post, then analyze the download.

use std::path::Path;

use anyhow::Context;

use icsa_core::AppConfig;
use icsa_extractor::{extract_comments, ExporterClient, PollSettings};

pub(crate) async fn run_url(
    config: &AppConfig,
    post_url: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let base_url = config
        .require_exporter_url()
        .context("--post-url needs an export service; set ICSA_EXPORTER_URL")?;
    let settings = PollSettings {
        request_timeout_secs: config.exporter_request_timeout_secs,
        poll_timeout_secs: config.export_poll_timeout_secs,
        poll_interval_ms: config.export_poll_interval_ms,
    };
    let client = ExporterClient::new(base_url, config.exporter_api_key.clone(), settings)?;

    println!("Extracting comments from {post_url}");
    let downloaded = extract_comments(&client, post_url, &config.download_dir)
        .await
        .context("comment extraction failed")?;
    println!("Comments saved to {}", downloaded.display());

    crate::analyze::run_file(config, &downloaded, output)
}
