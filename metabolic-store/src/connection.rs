use std::{env, error::Error, str::FromStr, sync::Arc};

use dotenv::dotenv;
use log::{debug, info};
use sqlx::{
    sqlite::SqliteConnectOptions, ConnectOptions, Executor, SqliteConnection,
};
use tokio::sync::{Mutex, MutexGuard};

const SETUP_QUERY: &str = "PRAGMA mmap_size = 30000000000;
PRAGMA cache_size = -1000;
PRAGMA page_size = 4096;
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;";

const SCHEMA_QUERY: &str = "CREATE TABLE IF NOT EXISTS measurements (
    id TEXT PRIMARY KEY NOT NULL,
    timestamp INTEGER NOT NULL,
    weight REAL NOT NULL,
    height REAL NOT NULL,
    waist REAL,
    hip REAL,
    age REAL NOT NULL,
    gender TEXT NOT NULL,
    activity_level TEXT NOT NULL,
    bmi REAL NOT NULL,
    bmr INTEGER NOT NULL,
    tdee INTEGER NOT NULL,
    body_fat_percentage REAL,
    notes TEXT
);
CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    height REAL NOT NULL,
    gender TEXT NOT NULL,
    date_of_birth TEXT NOT NULL
);";

#[derive(Clone)]
pub struct Connection {
    inner: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    /// Opens the database named by `DATABASE_URL`, read from the environment
    /// or a `.env` file.
    pub async fn establish() -> Result<Self, Box<dyn Error>> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
        Self::establish_with_url(&database_url).await
    }

    pub async fn establish_with_url(database_url: &str) -> Result<Self, Box<dyn Error>> {
        info!("Opening database {}", database_url);
        let mut connection = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .connect()
            .await?;

        connection.execute(SETUP_QUERY).await?;
        debug!("Ensuring schema");
        connection.execute(SCHEMA_QUERY).await?;

        Ok(Self {
            inner: Arc::new(Mutex::new(connection)),
        })
    }

    /// Fresh private in-memory database.
    pub async fn in_memory() -> Result<Self, Box<dyn Error>> {
        Self::establish_with_url("sqlite::memory:").await
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.inner.lock().await
    }
}
