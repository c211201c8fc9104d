//! Error taxonomy for a single invocation.
//!
//! Every failure aborts the invocation. Nothing here is retried; the caller
//! (the scheduler running the binary) owns any retry policy.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration error: missing required environment variable(s): {}", .vars.join(", "))]
    Missing { vars: Vec<&'static str> },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed for {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },
    #[error("decode failed for response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("missing base rate: currency {currency} has no rate against {base}")]
    MissingBaseRate { currency: String, base: String },
    #[error("rate parse: currency {currency} has malformed rate {value:?}")]
    RateParse { currency: String, value: String },
}

#[derive(Debug, Error)]
#[error("upload failed for s3://{bucket}/{key}")]
pub struct UploadError {
    pub bucket: String,
    pub key: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl UploadError {
    pub fn new(
        bucket: &str,
        key: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("serialize failed for rates response")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_all_missing_vars() {
        let err = ConfigError::Missing {
            vars: vec!["BUCKET_NAME", "REGION"],
        };
        assert_eq!(
            err.to_string(),
            "configuration error: missing required environment variable(s): BUCKET_NAME, REGION"
        );
    }

    #[test]
    fn test_transform_error_messages() {
        let missing = TransformError::MissingBaseRate {
            currency: "EUR".to_string(),
            base: "USD".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "missing base rate: currency EUR has no rate against USD"
        );

        let parse = TransformError::RateParse {
            currency: "GBP".to_string(),
            value: "1,3".to_string(),
        };
        assert_eq!(
            parse.to_string(),
            "rate parse: currency GBP has malformed rate \"1,3\""
        );
    }

    #[test]
    fn test_upload_error_keeps_source() {
        let err = UploadError::new("rates-bucket", "fx/latest.json", "permission denied");
        assert_eq!(err.to_string(), "upload failed for s3://rates-bucket/fx/latest.json");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("permission denied"));
    }

    #[test]
    fn test_pipeline_error_is_transparent_for_transform() {
        let err: PipelineError = TransformError::MissingBaseRate {
            currency: "EUR".to_string(),
            base: "USD".to_string(),
        }
        .into();
        assert!(err.to_string().contains("EUR"));
    }
}
