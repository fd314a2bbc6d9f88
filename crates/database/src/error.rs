// database/error.rs - error types for the provisioning run

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A required configuration value is missing or empty. Raised before
    /// any network call is made.
    #[error("invalid configuration: {0} must not be empty")]
    InvalidConfiguration(&'static str),

    /// The database server could not be reached or authenticated against.
    #[error("failed to reach the database server: {0}")]
    Connection(#[source] mongodb::error::Error),

    /// The server rejected a provisioning command for a reason other than
    /// the target already existing.
    #[error("database command failed: {0}")]
    Command(#[source] mongodb::error::Error),
}
