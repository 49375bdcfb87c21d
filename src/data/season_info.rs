use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLASSIFICATION_THRESHOLD: u32 = 75;

pub fn default_points_system() -> Vec<u32> {
    vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1]
}

fn default_classification_threshold() -> u32 {
    DEFAULT_CLASSIFICATION_THRESHOLD
}

/// Season metadata and scoring rules, read from `season-info.json`.
///
/// Example:
/// ```json
/// {
///   "index": 2,
///   "name": "Season 2",
///   "polePoints": 1,
///   "dropRounds": 1,
///   "pointsSystem": [25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
///   "races": [{ "round": 1, "name": "Monza", "date": "2024-03-10", "resultFile": "monza" }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonInfo {
    #[serde(default)]
    pub index: Option<u32>,
    pub name: String,

    /// Championship points awarded per pole position
    #[serde(default)]
    pub pole_points: u32,

    /// Number of worst results discarded before scoring driver championship points
    #[serde(default)]
    pub drop_rounds: usize,

    /// Minimum percentage of the winner's laps needed to be classified
    #[serde(default = "default_classification_threshold")]
    pub classification_threshold: u32,

    /// Points per finishing position, index 0 = winner
    #[serde(default = "default_points_system")]
    pub points_system: Vec<u32>,

    #[serde(default)]
    pub races: Vec<RaceEvent>,

    /// Driver names or GUIDs left out of the standings
    #[serde(default)]
    pub ignored_drivers: Vec<String>,
}

impl SeasonInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            index: None,
            name: name.into(),
            pole_points: 0,
            drop_rounds: 0,
            classification_threshold: DEFAULT_CLASSIFICATION_THRESHOLD,
            points_system: default_points_system(),
            races: Vec::new(),
            ignored_drivers: Vec::new(),
        }
    }

    pub fn is_ignored(&self, driver_guid: &str, driver_name: &str) -> bool {
        self.ignored_drivers
            .iter()
            .any(|ignored| ignored == driver_guid || ignored == driver_name)
    }
}

/// A scheduled race of the season
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RaceEvent {
    pub round: u32,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub nation: Option<String>,
    /// Result file name in the season's `races/` directory, without `.json`
    #[serde(default)]
    pub result_file: Option<String>,
}
