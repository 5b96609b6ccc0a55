use tracing_subscriber::EnvFilter;

use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rgoals::clock::SystemClock;
use rgoals::data::{AppConfig, SharedClock, SharedStorage};
use rgoals::storage::SqliteStorage;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config: AppConfig = rocket::Config::figment().extract()?;

    let storage: SharedStorage = Arc::new(Mutex::new(SqliteStorage::open(&config.database)?));
    let clock: SharedClock = Arc::new(SystemClock);
    tracing::info!(database = %config.database, "opened goal store");

    rgoals::build_rocket(storage, clock, config.web_root.as_deref().map(Path::new))
        .launch()
        .await?;

    Ok(())
}
