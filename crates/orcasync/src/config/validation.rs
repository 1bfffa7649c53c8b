//! Configuration validation and error reporting

use super::types::Config;
use crate::error::Result;
use crate::profile::Category;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> Result<()> {
        for pattern in &config.ignore {
            if pattern.trim().is_empty() {
                anyhow::bail!("Ignore pattern cannot be empty");
            }
        }

        for pattern in &config.include {
            if pattern.trim().is_empty() {
                anyhow::bail!("Include pattern cannot be empty");
            }
        }

        for ext in &config.extensions {
            if ext.trim().trim_start_matches('.').is_empty() {
                anyhow::bail!("Extension cannot be empty");
            }
        }

        if let Some(required) = &config.required_fields {
            for (category, fields) in required {
                category.parse::<Category>()?;
                if fields.iter().any(|f| f.trim().is_empty()) {
                    anyhow::bail!("Required field for '{category}' cannot be empty");
                }
            }
        }

        Ok(())
    }
}
