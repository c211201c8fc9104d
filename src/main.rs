use anyhow::Result;
use clap::Parser;
use fxpublish::core::log::init_logging;

/// Publishes merchant exchange rates, re-keyed on BASE_CURRENCY, to S3.
///
/// Configured through API_URL, BUCKET_NAME, KEY_NAME, REGION, BASE_CURRENCY
/// and the optional S3_ENDPOINT environment variables.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the JSON payload instead of uploading it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Failures are logged where they occur; the chain is reported on exit.
    let message = fxpublish::run(cli.dry_run).await?;
    println!("{message}");
    Ok(())
}
