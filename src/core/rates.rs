//! Rate tables and the re-keying transform

use super::error::{FetchError, TransformError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency code -> (reference currency code -> decimal rate string).
pub type MerchantRates = BTreeMap<String, BTreeMap<String, String>>;

/// Body returned by the upstream rates API.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantRatesResponse {
    pub merchant: MerchantRates,
}

/// Rate table published to the object store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesResponse {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
}

#[async_trait]
pub trait MerchantRatesProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<MerchantRates, FetchError>;
}

/// Re-keys `merchant` on `base`: each currency maps to its quoted rate against `base`.
///
/// Aborts on the first currency (in code order) that has no quotation against
/// `base` or whose quotation is not a finite, positive decimal.
pub fn transform(base: &str, merchant: &MerchantRates) -> Result<RatesResponse, TransformError> {
    let rates = merchant
        .iter()
        .map(|(currency, quotes)| -> Result<(String, f64), TransformError> {
            let raw = quotes
                .get(base)
                .ok_or_else(|| TransformError::MissingBaseRate {
                    currency: currency.clone(),
                    base: base.to_string(),
                })?;
            let rate = parse_rate(raw).ok_or_else(|| TransformError::RateParse {
                currency: currency.clone(),
                value: raw.clone(),
            })?;
            Ok((currency.clone(), rate))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(RatesResponse {
        base: base.to_string(),
        rates,
    })
}

fn parse_rate(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
}
