use crate::core::error::FetchError;
use crate::core::rates::{MerchantRates, MerchantRatesProvider, MerchantRatesResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("fxpublish/", env!("CARGO_PKG_VERSION"));

/// Fetches the merchant rate table with a single bounded GET.
pub struct HttpRatesProvider {
    url: String,
    timeout: Duration,
}

impl HttpRatesProvider {
    pub fn new(url: &str) -> Self {
        Self::with_timeout(url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Self {
        HttpRatesProvider {
            url: url.to_string(),
            timeout,
        }
    }

    fn request_error(&self, source: reqwest::Error) -> FetchError {
        FetchError::Request {
            url: self.url.clone(),
            source,
        }
    }
}

#[async_trait]
impl MerchantRatesProvider for HttpRatesProvider {
    #[instrument(name = "MerchantRatesFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Result<MerchantRates, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.request_error(e))?;

        debug!("Requesting merchant rates");
        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| self.request_error(e))?;

        let data: MerchantRatesResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    error = ?e,
                    response = %text,
                    "Failed to parse merchant rates response"
                );
                return Err(FetchError::Decode {
                    url: self.url.clone(),
                    source: e,
                });
            }
        };

        debug!(currencies = data.merchant.len(), "Received merchant rates");
        Ok(data.merchant)
    }
}
