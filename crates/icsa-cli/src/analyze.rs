//! File-mode analysis: load a comment export, annotate it, write the CSV.

use std::path::{Path, PathBuf};

use anyhow::Context;

use icsa_core::io::{load_table_with_column, write_table_csv, TableFormat};
use icsa_core::AppConfig;
use icsa_sentiment::{annotate_table, Classifier, ZeroShotClassifier};

pub(crate) fn run_file(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let classifier = ZeroShotClassifier::load(&config.model_id);
    analyze_file(config, &classifier, input, output)
}

/// Annotate the table in `input` and write the result as CSV.
///
/// A degraded classifier still produces an output file; the annotation
/// columns are simply empty, per the pipeline fallback.
fn analyze_file(
    config: &AppConfig,
    classifier: &dyn Classifier,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    anyhow::ensure!(input.exists(), "input file not found: {}", input.display());

    let format = TableFormat::from_path(input)?;
    let bytes =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let (table, _column) = load_table_with_column(
        &bytes,
        format,
        &config.text_column,
        config.header_skip_rows,
    )
    .with_context(|| format!("could not load a comment table from {}", input.display()))?;

    println!(
        "Loaded {} comments from {}",
        table.row_count(),
        input.display()
    );
    if !classifier.is_ready() {
        println!("Sentiment model unavailable; writing empty annotations");
    }

    let annotated = annotate_table(table, &config.text_column, classifier);

    let output_path = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
    write_table_csv(&annotated, &output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!(
        "Analysis complete: {} rows written to {}",
        annotated.row_count(),
        output_path.display()
    );
    Ok(())
}

/// Default output path: `<input stem>_analyzed.csv` beside the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("comments");
    input.with_file_name(format!("{stem}_analyzed.csv"))
}
