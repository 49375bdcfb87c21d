use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::DEFAULT_MAX_POST_LEN;

fn default_seasons_path() -> PathBuf {
    PathBuf::from("./data/seasons")
}

fn default_max_post_len() -> usize {
    DEFAULT_MAX_POST_LEN
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Directory holding info.json and one directory per season
    #[serde(default = "default_seasons_path")]
    pub seasons_path: PathBuf,
    #[serde(default)]
    pub publish: PublishConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seasons_path: default_seasons_path(),
            publish: PublishConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PublishConfig {
    /// Season directory to publish; the last listed season when unset
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default = "default_max_post_len")]
    pub max_post_len: usize,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            season: None,
            max_post_len: default_max_post_len(),
        }
    }
}
