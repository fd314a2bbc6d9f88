// database/lib.rs - one-shot MongoDB provisioning: user and collection setup

pub mod client;
pub mod error;
pub mod provision;

pub use client::{CreateOutcome, DatabaseClient, MongoBackend};
pub use error::ProvisionError;
pub use provision::{provision, Credential, DEFAULT_COLLECTIONS};
