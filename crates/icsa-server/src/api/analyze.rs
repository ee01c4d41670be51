use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use serde::Serialize;

use icsa_core::io::{load_table_with_column, TableFormat};
use icsa_core::{DataTable, SentimentLabel, TableError};
use icsa_sentiment::{annotate_records, RowAnnotation};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// One annotated comment in the API response.
#[derive(Debug, Serialize)]
pub(super) struct CommentSentiment {
    pub original_comment: Option<String>,
    pub cleaned_comment: Option<String>,
    pub sentiment: SentimentLabel,
    pub confidence: f32,
}

/// Full analysis payload for one uploaded file.
#[derive(Debug, Serialize)]
pub(super) struct SentimentAnalysisResult {
    pub filename: String,
    pub total_comments_processed: usize,
    pub analysis_results: Vec<CommentSentiment>,
}

pub(super) async fn analyze_comments(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<SentimentAnalysisResult>>, ApiError> {
    let (filename, bytes) = read_upload(&mut multipart, &req_id.0).await?;

    let format = TableFormat::from_path(Path::new(&filename)).map_err(|e| {
        ApiError::new(
            req_id.0.clone(),
            "invalid_file_type",
            format!("{e}; upload a .csv, .xlsx, or .xls file"),
        )
    })?;

    let (table, column) = load_table_with_column(
        &bytes,
        format,
        &state.config.text_column,
        state.config.header_skip_rows,
    )
    .map_err(|e| match e {
        TableError::ColumnNotFound { .. } => ApiError::new(
            req_id.0.clone(),
            "missing_column",
            format!(
                "uploaded file must contain a '{}' column",
                state.config.text_column
            ),
        ),
        other => ApiError::new(
            req_id.0.clone(),
            "invalid_file",
            format!("could not read uploaded file: {other}"),
        ),
    })?;

    let column_index = table.column_index(&column).ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "internal_error",
            "comment column resolution failed",
        )
    })?;

    tracing::info!(
        filename = %filename,
        rows = table.row_count(),
        "analyzing uploaded comment table"
    );

    // Model inference is CPU-bound; keep it off the async workers.
    let classifier = Arc::clone(&state.classifier);
    let (table, annotations) = tokio::task::spawn_blocking(move || {
        let annotations = annotate_records(&table, column_index, classifier.as_ref());
        (table, annotations)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "analysis task failed");
        ApiError::new(req_id.0.clone(), "internal_error", "analysis task failed")
    })?;

    let analysis_results = build_results(&table, column_index, annotations);

    Ok(Json(ApiResponse {
        data: SentimentAnalysisResult {
            filename,
            total_comments_processed: table.row_count(),
            analysis_results,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Pull the first multipart field carrying a file name.
async fn read_upload(
    multipart: &mut Multipart,
    request_id: &str,
) -> Result<(String, Vec<u8>), ApiError> {
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            ApiError::new(
                request_id.to_string(),
                "bad_request",
                format!("malformed multipart upload: {e}"),
            )
        })?;
        let Some(field) = field else {
            return Err(ApiError::new(
                request_id.to_string(),
                "bad_request",
                "upload must include a file field",
            ));
        };
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| {
            ApiError::new(
                request_id.to_string(),
                "bad_request",
                format!("failed to read upload: {e}"),
            )
        })?;
        return Ok((filename, bytes.to_vec()));
    }
}

fn build_results(
    table: &DataTable,
    column: usize,
    annotations: Vec<RowAnnotation>,
) -> Vec<CommentSentiment> {
    annotations
        .into_iter()
        .enumerate()
        .map(|(row, annotation)| CommentSentiment {
            original_comment: table.cell(row, column).map(str::to_string),
            cleaned_comment: annotation.cleaned,
            sentiment: annotation.result.label,
            confidence: annotation.result.confidence,
        })
        .collect()
}
