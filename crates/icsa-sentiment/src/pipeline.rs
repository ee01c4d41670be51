//! The tabular annotation run.
//!
//! One sequential pass over a comment table: normalize each row's text,
//! classify it, and append the results as columns. One annotation per row,
//! always, in row order; a row that cannot be analyzed carries the neutral
//! fallback instead of aborting the batch.

use icsa_core::{Classification, DataTable};

use crate::classifier::Classifier;
use crate::normalize::clean_text;

/// Per-row outcome of an annotation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAnnotation {
    pub cleaned: Option<String>,
    pub result: Classification,
}

/// Annotate every row of `table`, reading text from the cell at `column`.
///
/// Rows with no cell value, or whose text normalizes away, skip the
/// classifier and carry the neutral fallback.
#[must_use]
pub fn annotate_records(
    table: &DataTable,
    column: usize,
    classifier: &dyn Classifier,
) -> Vec<RowAnnotation> {
    let mut annotations = Vec::with_capacity(table.row_count());
    for row_idx in 0..table.row_count() {
        let cleaned = table.cell(row_idx, column).and_then(clean_text);
        let result = match cleaned.as_deref() {
            Some(text) => classifier.classify(text),
            None => Classification::default(),
        };
        tracing::debug!(
            row = row_idx,
            label = %result.label,
            confidence = result.confidence,
            "row annotated"
        );
        annotations.push(RowAnnotation { cleaned, result });
    }
    annotations
}

/// Annotate `table` with `cleaned_comment`, `sentiment`, and `confidence`
/// columns, resolving `text_column` case- and whitespace-insensitively.
///
/// When the table has no rows, the text column cannot be resolved, or the
/// classifier is degraded, the table comes back unchanged except for
/// `sentiment` and `confidence` columns filled with nulls. This path never
/// fails.
#[must_use]
pub fn annotate_table(
    mut table: DataTable,
    text_column: &str,
    classifier: &dyn Classifier,
) -> DataTable {
    match table.resolve_column(text_column) {
        Some(column) if !table.is_empty() && classifier.is_ready() => {
            tracing::info!(
                rows = table.row_count(),
                column = %table.headers()[column],
                "annotating comment table"
            );
            let annotations = annotate_records(&table, column, classifier);
            let cleaned = annotations.iter().map(|a| a.cleaned.clone()).collect();
            let sentiments = annotations
                .iter()
                .map(|a| Some(a.result.label.as_str().to_string()))
                .collect();
            let confidences = annotations
                .iter()
                .map(|a| Some(a.result.confidence.to_string()))
                .collect();
            table.upsert_column("cleaned_comment", cleaned);
            table.upsert_column("sentiment", sentiments);
            table.upsert_column("confidence", confidences);
        }
        resolved => {
            tracing::warn!(
                rows = table.row_count(),
                column_found = resolved.is_some(),
                classifier_ready = classifier.is_ready(),
                "skipping sentiment run, emitting null annotation columns"
            );
            let nulls: Vec<Option<String>> = vec![None; table.row_count()];
            table.upsert_column("sentiment", nulls.clone());
            table.upsert_column("confidence", nulls);
        }
    }
    table
}
