// bootstrap/main.rs - first-boot provisioning of the database user and collections

use clap::Parser;
use database::{provision, Credential, MongoBackend, ProvisionError};
use dotenvy::dotenv;
use std::collections::HashSet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// The account is always granted read-write on the target database.
const READ_WRITE_ROLE: &str = "readWrite";

#[derive(Parser)]
#[clap(name = "bootstrap")]
struct Args {
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    mongo_uri: String,
    #[arg(long, env = "MONGO_USER", default_value = "")]
    mongo_user: String,
    #[arg(long, env = "MONGO_PASSWORD", default_value = "", hide_env_values = true)]
    mongo_password: String,
    #[arg(long, env = "MONGO_INITDB_DATABASE", default_value = "")]
    mongo_initdb_database: String,
    #[arg(
        long,
        env = "MONGO_COLLECTIONS",
        value_delimiter = ',',
        default_value = "city,weather,dailyWeather,airPollution"
    )]
    collections: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    // Parse CLI args, using ENV vars if not provided
    let args = Args::parse();

    let env_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::fmt()
        .with_env_filter(env_layer)
        .with_target(true)
        .init();

    if let Err(err) = run(args).await {
        error!("Provisioning failed: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ProvisionError> {
    let credential = Credential {
        username: args.mongo_user,
        password: args.mongo_password,
        role: READ_WRITE_ROLE.to_string(),
        target_database: args.mongo_initdb_database,
    };

    // Reject bad configuration before opening a connection.
    credential.validate()?;
    let collections = dedup_preserving_order(args.collections);

    let backend = MongoBackend::connect(&args.mongo_uri).await?;
    provision(&backend, &credential, &collections).await?;

    info!("Database '{}' provisioned.", credential.target_database);
    Ok(())
}

fn dedup_preserving_order(mut names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
    names
}
