#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const DEFAULT_CONCURRENCY: usize = 4;
const MAX_CONCURRENCY: usize = 64;

/// Background extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct ExtractionConfig {
    /// Maximum number of documents extracted at the same time.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(
            long = "extraction-concurrency",
            env = "EXTRACTION_CONCURRENCY",
            default_value_t = DEFAULT_CONCURRENCY
        )
    )]
    #[serde(default = "ExtractionConfig::default_concurrency")]
    pub extraction_concurrency: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extraction_concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl ExtractionConfig {
    pub fn with_concurrency(extraction_concurrency: usize) -> Self {
        Self {
            extraction_concurrency,
        }
    }

    fn default_concurrency() -> usize {
        DEFAULT_CONCURRENCY
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CONCURRENCY).contains(&self.extraction_concurrency) {
            return Err(Error::config(format!(
                "extraction concurrency must be between 1 and {MAX_CONCURRENCY}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_concurrency_is_valid() {
        let config = ExtractionConfig::default();
        assert_eq!(config.extraction_concurrency, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(ExtractionConfig::with_concurrency(0).validate().is_err());
        assert!(ExtractionConfig::with_concurrency(65).validate().is_err());
    }
}
