use std::path::{Path, PathBuf};

use icsa_core::io::{parse_table_bytes, TableFormat};

use crate::client::ExporterClient;
use crate::error::ExtractError;

/// Run a full extraction: start an export for `post_url`, wait for it,
/// download the file, and land it in `download_dir` under a timestamped
/// name.
///
/// The bytes must parse as a CSV table before anything is written; a file
/// path is only ever returned for a readable table.
///
/// # Errors
///
/// Returns `ExtractError` when the export fails, times out, downloads
/// nothing readable, or the file cannot be written.
pub async fn extract_comments(
    client: &ExporterClient,
    post_url: &str,
    download_dir: &Path,
) -> Result<PathBuf, ExtractError> {
    tracing::info!(post_url, "starting comment export");

    let job = client.start_export(post_url).await?;
    let completed = client.wait_for_export(&job.id).await?;
    let bytes = client.fetch_export(&completed).await?;

    let table =
        parse_table_bytes(&bytes, TableFormat::Csv, 0).map_err(ExtractError::InvalidFile)?;

    std::fs::create_dir_all(download_dir)?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = download_dir.join(format!("instagram_comments_{timestamp}.csv"));
    std::fs::write(&path, &bytes)?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        "comment export saved"
    );
    Ok(path)
}
