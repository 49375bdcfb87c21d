use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::season_info::SeasonInfo;
use super::session::ServerSessionData;

pub const SEASONS_LIST_FILENAME: &str = "info.json";
pub const SEASON_INFO_FILENAME: &str = "season-info.json";
pub const RACES_DIRNAME: &str = "races";
pub const DRIVER_STANDINGS_FILENAME: &str = "driver_standings.json";
pub const TEAM_STANDINGS_FILENAME: &str = "team_standings.json";

/// File layout of one season directory
#[derive(Debug, Clone)]
pub struct SeasonPaths {
    dir: PathBuf,
}

impl SeasonPaths {
    pub fn new(seasons_path: &Path, season: &str) -> Self {
        Self {
            dir: seasons_path.join(season),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn info_file(&self) -> PathBuf {
        self.dir.join(SEASON_INFO_FILENAME)
    }

    /// Path of a race result file referenced by `RaceEvent::result_file`
    pub fn result_file(&self, result_file: &str) -> PathBuf {
        self.dir.join(RACES_DIRNAME).join(format!("{}.json", result_file))
    }

    /// Output path of the n-th (1-based) race result record
    pub fn round_results_file(&self, round: usize) -> PathBuf {
        self.dir.join(format!("round{}_results.json", round))
    }

    pub fn driver_standings_file(&self) -> PathBuf {
        self.dir.join(DRIVER_STANDINGS_FILENAME)
    }

    pub fn team_standings_file(&self) -> PathBuf {
        self.dir.join(TEAM_STANDINGS_FILENAME)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} at {}", what, path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {} at {}", what, path.display()))
}

/// Load the list of season directory names.
///
/// Returns `None` when the list does not exist, which means there is nothing
/// to process.
pub fn load_season_list(seasons_path: &Path) -> Result<Option<Vec<String>>> {
    let path = seasons_path.join(SEASONS_LIST_FILENAME);
    if !path.is_file() {
        return Ok(None);
    }
    read_json(&path, "season list").map(Some)
}

/// Load `season-info.json`, `None` if the season has no info file yet
pub fn load_season_info(paths: &SeasonPaths) -> Result<Option<SeasonInfo>> {
    let path = paths.info_file();
    if !path.is_file() {
        return Ok(None);
    }
    read_json(&path, "season info").map(Some)
}

/// Load a dedicated-server session result file
pub fn load_session(path: &Path) -> Result<ServerSessionData> {
    read_json(path, "race result")
}

/// Load any previously written JSON record, e.g. the driver standings
pub fn load_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    read_json(path, "record")
}
