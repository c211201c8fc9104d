pub mod core;
pub mod pipeline;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::error::{ConfigError, PipelineError};
use crate::providers::HttpRatesProvider;
use crate::store::{MemoryStore, S3Store};
use tracing::{debug, error, info};

/// Runs one invocation configured from the process environment.
pub async fn run(dry_run: bool) -> Result<String, PipelineError> {
    info!("Rates publisher starting...");
    let config = AppConfig::from_env().inspect_err(config_failed)?;
    execute(config, dry_run).await
}

/// Runs one invocation configured through `lookup`.
///
/// Returns the confirmation message, or with `dry_run` the JSON payload that
/// would have been uploaded. Configuration is validated before any client is
/// built.
pub async fn run_with_lookup<F>(lookup: F, dry_run: bool) -> Result<String, PipelineError>
where
    F: Fn(&str) -> Option<String>,
{
    info!("Rates publisher starting...");
    let config = AppConfig::from_lookup(lookup).inspect_err(config_failed)?;
    execute(config, dry_run).await
}

fn config_failed(e: &ConfigError) {
    error!(error = %e, "Invocation failed");
}

async fn execute(config: AppConfig, dry_run: bool) -> Result<String, PipelineError> {
    debug!("Loaded config: {config:#?}");

    let provider = HttpRatesProvider::new(&config.api_url);

    if dry_run {
        let store = MemoryStore::new();
        pipeline::run_pipeline(&config, &provider, &store).await?;
        let payload = store
            .get(&config.bucket_name, &config.key_name)
            .await
            .map(|object| String::from_utf8_lossy(&object.payload).into_owned())
            .unwrap_or_default();
        return Ok(payload);
    }

    let store = S3Store::new(&config.region, config.s3_endpoint.as_deref());
    let published = pipeline::run_pipeline(&config, &provider, &store).await?;
    Ok(published.to_string())
}
