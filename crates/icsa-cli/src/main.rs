mod analyze;
mod extract;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "icsa-cli")]
#[command(about = "Sentiment analysis for Instagram comment exports")]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["input_file", "post_url"]),
))]
struct Cli {
    /// Comment export file to analyze (csv, xlsx, or xls)
    #[arg(short = 'i', long)]
    input_file: Option<PathBuf>,

    /// Instagram post URL to extract comments from before analyzing
    #[arg(short = 'u', long)]
    post_url: Option<String>,

    /// Output CSV path (defaults to <input stem>_analyzed.csv beside the input)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = icsa_core::load_app_config()?;
    tracing::debug!(?config, "configuration loaded");

    match (cli.input_file, cli.post_url) {
        (Some(input), None) => analyze::run_file(&config, &input, cli.output.as_deref()),
        (None, Some(url)) => extract::run_url(&config, &url, cli.output.as_deref()).await,
        _ => anyhow::bail!("exactly one of --input-file or --post-url is required"),
    }
}
