use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::championship::{RaceResult, RaceResultRow};

/// Persisted summary and classification of one race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResults {
    /// 1-based order in which the race was ingested
    pub round: usize,
    pub name: String,
    pub track: String,
    pub date: DateTime<Utc>,
    pub num_laps: u32,
    pub winning_driver: String,
    pub winning_team: String,
    pub winning_time: u64,
    pub pole_driver: String,
    pub pole_team: String,
    pub fast_lap_driver: String,
    pub fast_lap_team: String,
    pub fast_lap_time: u64,
    pub classifications: Vec<RaceResultRow>,
}

impl RaceResults {
    pub fn from_race(round: usize, race: &RaceResult) -> Self {
        let (winning_driver, winning_team) = race
            .winner()
            .map(|row| (row.driver_name.clone(), row.team_name.clone()))
            .unwrap_or_default();

        Self {
            round,
            name: race.name.clone(),
            track: race.track.clone(),
            date: race.date,
            num_laps: race.num_laps,
            winning_driver,
            winning_team,
            winning_time: race.winning_time,
            pole_driver: race.pole.driver_name.clone(),
            pole_team: race.pole.team_name.clone(),
            fast_lap_driver: race.fastest_lap.driver_name.clone(),
            fast_lap_team: race.fastest_lap.team_name.clone(),
            fast_lap_time: race.fastest_lap_time,
            classifications: race.classifications.clone(),
        }
    }
}
