//! One invocation: fetch, transform, serialize, upload.
//!
//! Each stage runs to completion before the next starts and the first failure
//! aborts the rest, so nothing is written to the store unless every earlier
//! stage succeeded.

use crate::core::config::AppConfig;
use crate::core::error::PipelineError;
use crate::core::rates::{self, MerchantRatesProvider};
use crate::core::store::{JSON_CONTENT_TYPE, ObjectStore};
use std::fmt;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Transform,
    Serialize,
    Upload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Transform => "transform",
            Stage::Serialize => "serialize",
            Stage::Upload => "upload",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub base: String,
    pub currencies: usize,
    pub bucket: String,
    pub key: String,
}

impl fmt::Display for Published {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uploaded rates for {} ({} currencies) to s3://{}/{}",
            self.base, self.currencies, self.bucket, self.key
        )
    }
}

fn failed<E: Into<PipelineError>>(stage: Stage) -> impl FnOnce(E) -> PipelineError {
    move |e| {
        let e = e.into();
        error!(%stage, error = %e, "Invocation failed");
        e
    }
}

#[instrument(
    name = "RatesPipeline",
    skip_all,
    fields(base = %config.base_currency, bucket = %config.bucket_name, key = %config.key_name)
)]
pub async fn run_pipeline(
    config: &AppConfig,
    provider: &dyn MerchantRatesProvider,
    store: &dyn ObjectStore,
) -> Result<Published, PipelineError> {
    let merchant = provider
        .fetch_rates()
        .await
        .map_err(failed(Stage::Fetch))?;
    info!(currencies = merchant.len(), "Fetched merchant rates");

    let response =
        rates::transform(&config.base_currency, &merchant).map_err(failed(Stage::Transform))?;

    let payload = serde_json::to_vec(&response)
        .map_err(PipelineError::Serialize)
        .map_err(failed(Stage::Serialize))?;

    store
        .put_object(
            &config.bucket_name,
            &config.key_name,
            &payload,
            JSON_CONTENT_TYPE,
        )
        .await
        .map_err(failed(Stage::Upload))?;

    let published = Published {
        base: response.base,
        currencies: response.rates.len(),
        bucket: config.bucket_name.clone(),
        key: config.key_name.clone(),
    };
    info!(currencies = published.currencies, "Published rates");
    Ok(published)
}
