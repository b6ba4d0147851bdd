pub mod calendar;
pub mod config;
pub mod day;
pub mod progression;

use std::path::PathBuf;

use pushup_core::storage::data_dir;
use pushup_core::{Config, Database, Tracker};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Where the CLI reads config and data from.
pub struct Context {
    data_dir: Option<PathBuf>,
}

impl Context {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &self.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Ok(dir.clone())
            }
            None => Ok(data_dir()?),
        }
    }

    pub fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        Ok(Config::load_from(&self.data_dir()?)?)
    }

    /// Tracker on the configured database and the local clock.
    pub fn open_tracker(&self) -> Result<Tracker, Box<dyn std::error::Error>> {
        let dir = self.data_dir()?;
        let config = Config::load_from(&dir)?;
        let db_path = config.database_path(&dir);
        tracing::debug!(path = %db_path.display(), "opening record store");
        let db = Database::open_at(db_path)?;
        Ok(Tracker::new(db))
    }
}
