//! Typed error variants for the overtext-config crate.
//!
//! Callers that only need a message can coerce these into `anyhow::Error`;
//! callers that care can match on the variant.

use thiserror::Error;

/// Errors produced while loading, saving or validating an [`crate::OsdConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("I/O error accessing config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the reason.
    #[error("Config validation error: {0}")]
    Validation(String),

    /// A colour string was not `#RRGGBB` or `#RRGGBBAA`.
    #[error("Invalid colour '{0}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}
