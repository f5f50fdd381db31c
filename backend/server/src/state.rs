use std::{collections::HashMap, sync::Arc};

use records::{Cart, DataFiles};
use tokio::sync::Mutex;

use super::{config::Config, database::init_data, error::AppError};

pub struct State {
    pub config: Config,
    pub files: DataFiles,
    /// Held by every handler that writes a data file.
    pub writer: Mutex<()>,
    /// Open carts keyed by user id.
    pub carts: Mutex<HashMap<String, Cart>>,
}

impl State {
    pub fn new() -> Result<Arc<Self>, AppError> {
        Self::with_config(Config::load()?)
    }

    pub fn with_config(config: Config) -> Result<Arc<Self>, AppError> {
        let files = init_data(&config)?;

        Ok(Arc::new(Self {
            config,
            files,
            writer: Mutex::new(()),
            carts: Mutex::new(HashMap::new()),
        }))
    }
}
