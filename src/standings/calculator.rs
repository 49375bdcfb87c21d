use std::collections::HashMap;

use super::ranking::{rank, RankingKey};
use super::rows::{min_best_finish, DriverStandings, DriverStandingsRow, TeamStandings, TeamStandingsRow};
use crate::championship::{Classification, Entrant, Season};
use crate::data::SeasonInfo;

/// Driver and team standings of a season
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    pub drivers: DriverStandings,
    pub teams: TeamStandings,
}

/// Points for one finishing position; positions outside the points system score 0
pub fn points_for_position(points_system: &[u32], position: u32) -> u32 {
    position
        .checked_sub(1)
        .and_then(|idx| points_system.get(idx as usize))
        .copied()
        .unwrap_or(0)
}

/// Points for a list of finishing positions
pub fn points_for_positions(points_system: &[u32], positions: &[u32]) -> u32 {
    positions
        .iter()
        .map(|&pos| points_for_position(points_system, pos))
        .sum()
}

/// Points for a finishing history; sentinels score 0
pub fn points_for_history(points_system: &[u32], history: &[Classification]) -> u32 {
    history
        .iter()
        .filter_map(|c| c.position())
        .map(|pos| points_for_position(points_system, pos))
        .sum()
}

/// Statistics of a single entrant over the season
#[derive(Debug, Clone, PartialEq)]
struct EntrantTally {
    wins: u32,
    podiums: u32,
    poles: u32,
    raw_points: u32,
    best_finish: Option<u32>,
}

impl EntrantTally {
    fn new(entrant: &Entrant, points_system: &[u32]) -> Self {
        Self {
            wins: entrant.wins(),
            podiums: entrant.podiums(),
            poles: entrant.poles(),
            raw_points: points_for_history(points_system, entrant.finish_positions()),
            best_finish: entrant.best_finish(),
        }
    }
}

/// Rows folded by a grouping key, in order of first appearance, each with the
/// merged finishing history used for ranking
struct Grouped<R> {
    rows: Vec<(R, Vec<Classification>)>,
    index: HashMap<String, usize>,
}

impl<R> Grouped<R> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut (R, Vec<Classification>)> {
        match self.index.get(key) {
            Some(&idx) => self.rows.get_mut(idx),
            None => None,
        }
    }

    fn insert(&mut self, key: &str, row: R, history: Vec<Classification>) {
        self.index.insert(key.to_string(), self.rows.len());
        self.rows.push((row, history));
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

fn merge_histories(
    current: &[Classification],
    other: &[Classification],
    merge: fn(Classification, Classification) -> Classification,
) -> Vec<Classification> {
    current
        .iter()
        .zip(other)
        .map(|(&a, &b)| merge(a, b))
        .collect()
}

fn fold_team(teams: &mut Grouped<TeamStandingsRow>, entrant: &Entrant, tally: &EntrantTally) {
    let team_name = entrant.team_key();
    match teams.get_mut(team_name) {
        Some((row, history)) => {
            row.wins += tally.wins;
            row.podiums += tally.podiums;
            row.poles += tally.poles;
            row.total_points += tally.raw_points;
            row.best_finish = min_best_finish(row.best_finish, tally.best_finish);
            *history = merge_histories(history, entrant.finish_positions(), Classification::best_of);
        }
        None => {
            let row = TeamStandingsRow {
                name: team_name.to_string(),
                car: entrant.team.model_name.clone(),
                championship_points: 0,
                wins: tally.wins,
                podiums: tally.podiums,
                poles: tally.poles,
                total_points: tally.raw_points,
                best_finish: tally.best_finish,
            };
            teams.insert(team_name, row, entrant.finish_positions().to_vec());
        }
    }
}

fn fold_driver(
    drivers: &mut Grouped<DriverStandingsRow>,
    entrant: &Entrant,
    tally: &EntrantTally,
    info: &SeasonInfo,
) {
    let counted = entrant.finish_positions_with_drop_rounds(info.drop_rounds);
    let pole_bonus = tally.poles * info.pole_points;
    let championship_points = points_for_positions(&info.points_system, &counted) + pole_bonus;
    let total_points = tally.raw_points + pole_bonus;

    let driver_name = entrant.driver_key();
    match drivers.get_mut(driver_name) {
        Some((row, history)) => {
            // Entries for several teams: the latest team is shown
            row.team = entrant.team.team_name.clone();
            row.wins += tally.wins;
            row.podiums += tally.podiums;
            row.poles += tally.poles;
            row.championship_points += championship_points;
            row.total_points += total_points;
            row.best_finish = min_best_finish(row.best_finish, tally.best_finish);
            *history = merge_histories(history, entrant.finish_positions(), Classification::max_code);
        }
        None => {
            let row = DriverStandingsRow {
                name: driver_name.to_string(),
                team: entrant.team.team_name.clone(),
                nation_code: entrant.driver.nation.clone(),
                championship_points,
                wins: tally.wins,
                podiums: tally.podiums,
                poles: tally.poles,
                total_points,
                best_finish: tally.best_finish,
            };
            drivers.insert(driver_name, row, entrant.finish_positions().to_vec());
        }
    }
}

/// Compute ranked driver and team standings from the season's roster.
///
/// Driver championship points apply drop rounds and the pole bonus per
/// entry. Team championship points score the team's best result in each
/// round, without drop rounds. Both tables rank by championship points, then
/// by count of each finishing position from first downwards.
pub fn calculate_standings(season: &Season) -> Standings {
    let info = &season.info;
    let mut drivers = Grouped::new();
    let mut teams = Grouped::new();

    for entrant in season.entrants() {
        if info.is_ignored(&entrant.driver.guid, &entrant.driver.name) {
            tracing::debug!(driver = %entrant.driver.name, "Ignored driver left out of standings");
            continue;
        }
        let tally = EntrantTally::new(entrant, &info.points_system);
        fold_team(&mut teams, entrant, &tally);
        fold_driver(&mut drivers, entrant, &tally, info);
    }

    for (row, history) in teams.rows.iter_mut() {
        row.championship_points = points_for_history(&info.points_system, history);
    }

    let driver_max_pos = drivers.len();
    let driver_rows: Vec<_> = drivers
        .rows
        .into_iter()
        .map(|(row, history)| {
            let key = RankingKey::new(row.championship_points, &history, driver_max_pos);
            (row, key)
        })
        .collect();

    let team_max_pos = season.roster().len();
    let team_rows: Vec<_> = teams
        .rows
        .into_iter()
        .map(|(row, history)| {
            let key = RankingKey::new(row.championship_points, &history, team_max_pos);
            (row, key)
        })
        .collect();

    Standings {
        drivers: DriverStandings {
            standings: rank(driver_rows),
        },
        teams: TeamStandings {
            standings: rank(team_rows),
        },
    }
}
