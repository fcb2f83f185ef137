//! Pool error types

use crate::scene::HostError;

/// Errors that can occur during pool operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The host failed to create an instance
    #[error(transparent)]
    Host(#[from] HostError),

    /// Release of an instance that is not currently lent out
    #[error("Instance {0} is not outstanding from any pool")]
    NotOutstanding(String),

    /// No pool is registered for the prefab
    #[error("No pool exists for prefab {0}")]
    PoolNotFound(String),

    /// Pool settings failed validation
    #[error("Invalid pool configuration for {prefab}: {reason}")]
    InvalidConfig {
        /// Prefab the pool was being created for
        prefab: String,
        /// What was wrong with the settings
        reason: String,
    },
}
