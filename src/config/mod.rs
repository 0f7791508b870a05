use anyhow::{anyhow, Result};
use rr_core::usecases::AggregationMode;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "recipe-reviews.toml";

const ENV_NAME_DB_FILE: &str = "RECIPE_REVIEWS_DB";

pub struct Config {
    pub db: Db,
    pub ratings: Ratings,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::try_default()
                }
                _ => Err(err.into()),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_file) = env::var(ENV_NAME_DB_FILE) {
            cfg.db.file = Some(db_file.into());
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// Keep comments only in memory if `None`
    pub file: Option<PathBuf>,
}

pub struct Ratings {
    pub aggregation: AggregationMode,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db, ratings } = from;

        let raw::Db { file } = match db {
            Some(db) => db,
            None => raw::Db::try_default()?,
        };
        let db = Db { file };

        let raw::Ratings { aggregation } = match ratings {
            Some(ratings) => ratings,
            None => raw::Ratings::try_default()?,
        };
        let aggregation = aggregation
            .parse()
            .map_err(|_| anyhow!("Invalid rating aggregation mode '{aggregation}'"))?;
        let ratings = Ratings { aggregation };

        Ok(Self { db, ratings })
    }
}
