//! Error types for indicator construction.

use focus_config::ConfigError;

/// Errors that can occur when building or reconfiguring a focus indicator.
///
/// The per-frame update never fails; missing data is skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error("Invalid focus configuration: {0}")]
    Config(#[from] ConfigError),
}
