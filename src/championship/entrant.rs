use std::collections::HashMap;
use std::fmt;

use super::classification::Classification;
use crate::data::SessionCarData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub guid: String,
    pub name: String,
    pub nation: String,
}

impl Driver {
    pub fn from_car(car: &SessionCarData) -> Self {
        Self {
            guid: car.driver.guid.clone(),
            name: car.driver.name.clone(),
            nation: car.driver.nation.clone(),
        }
    }

    /// `guid-name`
    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.guid, self.name)
    }
}

/// Team and the car model it ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub model_name: String,
    pub team_name: String,
}

impl Team {
    pub fn from_car(car: &SessionCarData) -> Self {
        Self {
            model_name: car.model.clone(),
            team_name: car.driver.team.clone(),
        }
    }

    /// `model-team`
    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.model_name, self.team_name)
    }
}

/// Roster key of a driver × team × car model combination.
///
/// A driver who changes team or car mid-season gets a new key; the driver
/// standings group those entries back together by driver name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntrantKey(String);

impl EntrantKey {
    pub fn new(driver_guid: &str, driver_name: &str, car_model: &str, team_name: &str) -> Self {
        Self(format!(
            "{}-{}-{}-{}",
            driver_guid, driver_name, car_model, team_name
        ))
    }

    pub fn from_car(car: &SessionCarData) -> Self {
        Self::new(&car.driver.guid, &car.driver.name, &car.model, &car.driver.team)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntrantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A driver/team/car combination tracked across the season.
///
/// Both histories hold one entry per round since the start of the season.
/// Rounds before the entrant's first appearance are DNE.
#[derive(Debug, Clone)]
pub struct Entrant {
    pub driver: Driver,
    pub team: Team,
    qualify_positions: Vec<Classification>,
    finish_positions: Vec<Classification>,
}

impl Entrant {
    /// Create an entrant first seen in round `entered_at` (0-based), with all
    /// earlier rounds marked DNE.
    pub fn from_car(car: &SessionCarData, entered_at: usize) -> Self {
        Self {
            driver: Driver::from_car(car),
            team: Team::from_car(car),
            qualify_positions: vec![Classification::Dne; entered_at],
            finish_positions: vec![Classification::Dne; entered_at],
        }
    }

    pub fn key(&self) -> EntrantKey {
        EntrantKey::new(
            &self.driver.guid,
            &self.driver.name,
            &self.team.model_name,
            &self.team.team_name,
        )
    }

    /// Grouping key for driver standings
    pub fn driver_key(&self) -> &str {
        &self.driver.name
    }

    /// Grouping key for team standings
    pub fn team_key(&self) -> &str {
        &self.team.team_name
    }

    pub fn qualify_positions(&self) -> &[Classification] {
        &self.qualify_positions
    }

    pub fn finish_positions(&self) -> &[Classification] {
        &self.finish_positions
    }

    /// Number of rounds in this entrant's history
    pub fn rounds(&self) -> usize {
        self.finish_positions.len()
    }

    /// Append the outcome of round `round_idx` (0-based).
    ///
    /// Returns false and leaves the history untouched when that round is
    /// already recorded.
    pub fn record_round(
        &mut self,
        round_idx: usize,
        qualify: Classification,
        finish: Classification,
    ) -> bool {
        if self.finish_positions.len() != round_idx {
            return false;
        }
        self.qualify_positions.push(qualify);
        self.finish_positions.push(finish);
        true
    }

    pub fn wins(&self) -> u32 {
        count_position(&self.finish_positions, 1)
    }

    pub fn podiums(&self) -> u32 {
        self.finish_positions
            .iter()
            .filter(|c| matches!(c.position(), Some(pos) if pos <= 3))
            .count() as u32
    }

    pub fn poles(&self) -> u32 {
        count_position(&self.qualify_positions, 1)
    }

    /// Smallest finishing position ever achieved
    pub fn best_finish(&self) -> Option<u32> {
        self.finish_positions.iter().filter_map(|c| c.position()).min()
    }

    /// Finishing positions that count after discarding `drop_rounds` rounds.
    ///
    /// Every round, sentinels included, counts towards the number of results;
    /// only positions are kept, best first, capped at `rounds - drop_rounds`.
    pub fn finish_positions_with_drop_rounds(&self, drop_rounds: usize) -> Vec<u32> {
        let num_finishes = self.finish_positions.len();
        let keep = if num_finishes > drop_rounds {
            num_finishes - drop_rounds
        } else {
            num_finishes
        };
        let mut positions: Vec<u32> = self
            .finish_positions
            .iter()
            .filter_map(|c| c.position())
            .collect();
        positions.sort_unstable();
        positions.truncate(keep);
        positions
    }
}

/// Number of times `pos` appears in a history
pub fn count_position(history: &[Classification], pos: u32) -> u32 {
    history.iter().filter(|c| c.is_position(pos)).count() as u32
}

/// Season roster in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entrants: Vec<Entrant>,
    index: HashMap<EntrantKey, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn contains(&self, key: &EntrantKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &EntrantKey) -> Option<&Entrant> {
        self.index.get(key).map(|&idx| &self.entrants[idx])
    }

    pub fn get_mut(&mut self, key: &EntrantKey) -> Option<&mut Entrant> {
        match self.index.get(key) {
            Some(&idx) => self.entrants.get_mut(idx),
            None => None,
        }
    }

    /// Insert an entrant, keeping the existing one if the key is taken
    pub fn insert(&mut self, entrant: Entrant) -> bool {
        let key = entrant.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entrants.len());
        self.entrants.push(entrant);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entrant> {
        self.entrants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entrant> {
        self.entrants.iter_mut()
    }
}
