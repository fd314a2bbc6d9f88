// database/client.rs - database-client capability trait and the MongoDB backend

use async_trait::async_trait;
use mongodb::{bson::doc, error::ErrorKind, Client};

use crate::error::ProvisionError;
use crate::provision::Credential;

/// What a single create call did on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Minimal surface the provisioning run needs from a database server.
/// Tests substitute an in-memory fake for [`MongoBackend`].
#[async_trait]
pub trait DatabaseClient {
    /// Liveness check against the admin database.
    async fn ping(&self) -> Result<(), ProvisionError>;

    /// Create the administrative user with a single role grant scoped to
    /// the credential's target database.
    async fn create_user(&self, credential: &Credential) -> Result<CreateOutcome, ProvisionError>;

    /// Create a named collection in the given database.
    async fn create_collection(
        &self,
        database: &str,
        name: &str,
    ) -> Result<CreateOutcome, ProvisionError>;
}

pub struct MongoBackend {
    client: Client,
}

impl MongoBackend {
    pub async fn connect(uri: &str) -> Result<Self, ProvisionError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(ProvisionError::Connection)?;

        Ok(Self { client })
    }
}

// Server codes for "the thing being created is already there": 48 is
// NamespaceExists, 51003 is an existing user.
fn already_exists(err: &mongodb::error::Error) -> bool {
    matches!(*err.kind, ErrorKind::Command(ref e) if e.code == 48 || e.code == 51003)
}

#[async_trait]
impl DatabaseClient for MongoBackend {
    async fn ping(&self) -> Result<(), ProvisionError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_| ())
            .map_err(ProvisionError::Connection)
    }

    async fn create_user(&self, credential: &Credential) -> Result<CreateOutcome, ProvisionError> {
        let command = doc! {
            "createUser": credential.username.clone(),
            "pwd": credential.password.clone(),
            "roles": [ { "role": credential.role.clone(), "db": credential.target_database.clone() } ],
        };

        match self.client.database("admin").run_command(command, None).await {
            Ok(_) => Ok(CreateOutcome::Created),
            Err(err) if already_exists(&err) => Ok(CreateOutcome::AlreadyExists),
            Err(err) => Err(ProvisionError::Command(err)),
        }
    }

    async fn create_collection(
        &self,
        database: &str,
        name: &str,
    ) -> Result<CreateOutcome, ProvisionError> {
        match self
            .client
            .database(database)
            .create_collection(name, None)
            .await
        {
            Ok(_) => Ok(CreateOutcome::Created),
            Err(err) if already_exists(&err) => Ok(CreateOutcome::AlreadyExists),
            Err(err) => Err(ProvisionError::Command(err)),
        }
    }
}
