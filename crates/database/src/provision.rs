// database/provision.rs - the provisioning run: one user, a fixed set of collections

use std::fmt;

use tracing::info;

use crate::client::{CreateOutcome, DatabaseClient};
use crate::error::ProvisionError;

/// Collections provisioned when no override is configured.
pub const DEFAULT_COLLECTIONS: [&str; 4] = ["city", "weather", "dailyWeather", "airPollution"];

/// Administrative account to create, with its role grant scoped to the
/// target database. Built once at process start and never mutated.
#[derive(Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: String,
    pub target_database: String,
}

impl Credential {
    pub fn validate(&self) -> Result<(), ProvisionError> {
        if self.username.is_empty() {
            return Err(ProvisionError::InvalidConfiguration("username"));
        }
        if self.password.is_empty() {
            return Err(ProvisionError::InvalidConfiguration("password"));
        }
        if self.role.is_empty() {
            return Err(ProvisionError::InvalidConfiguration("role"));
        }
        if self.target_database.is_empty() {
            return Err(ProvisionError::InvalidConfiguration("target database"));
        }
        Ok(())
    }
}

// The password must never reach the logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("target_database", &self.target_database)
            .finish()
    }
}

/// Ensure the administrative user and every named collection exist.
///
/// Validation happens before any call is made against the server. "Already
/// exists" responses from the server are logged and skipped, so the run is
/// safe to repeat against a partially or fully provisioned database.
pub async fn provision(
    client: &impl DatabaseClient,
    credential: &Credential,
    collections: &[String],
) -> Result<(), ProvisionError> {
    credential.validate()?;
    if collections.is_empty() {
        return Err(ProvisionError::InvalidConfiguration("collection list"));
    }
    if collections.iter().any(|name| name.is_empty()) {
        return Err(ProvisionError::InvalidConfiguration("collection name"));
    }

    client.ping().await?;

    match client.create_user(credential).await? {
        CreateOutcome::Created => info!("Created user '{}'.", credential.username),
        CreateOutcome::AlreadyExists => {
            info!("User '{}' already exists, skipping.", credential.username)
        }
    }

    for name in collections {
        match client
            .create_collection(&credential.target_database, name)
            .await?
        {
            CreateOutcome::Created => info!("Created collection '{}'.", name),
            CreateOutcome::AlreadyExists => info!("Collection '{}' already exists, skipping.", name),
        }
    }

    Ok(())
}
