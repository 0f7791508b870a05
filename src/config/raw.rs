use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = include_str!("recipe-reviews.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub ratings: Option<Ratings>,
}

impl Config {
    pub fn try_default() -> Result<Self> {
        Ok(toml::from_str(DEFAULT_CONFIG_FILE)?)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub file: Option<PathBuf>,
}

impl Db {
    pub fn try_default() -> Result<Self> {
        Config::try_default()?
            .db
            .ok_or_else(|| anyhow::anyhow!("Missing default db configuration"))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ratings {
    pub aggregation: String,
}

impl Ratings {
    pub fn try_default() -> Result<Self> {
        Config::try_default()?
            .ratings
            .ok_or_else(|| anyhow::anyhow!("Missing default ratings configuration"))
    }
}
