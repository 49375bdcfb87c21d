use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::classification::Classification;
use super::entrant::{Entrant, EntrantKey, Roster};
use super::error::ChampionshipError;
use crate::data::{ServerSessionData, SessionCarData, SessionResultData};

/// One line of a race classification as persisted in the round record.
///
/// Entrants who did not start carry no time, lap count or best lap, and a DNQ
/// grid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResultRow {
    pub classification: Classification,
    pub driver_name: String,
    pub team_name: String,
    pub total_time: Option<u64>,
    pub num_laps: Option<u32>,
    pub best_lap: Option<u64>,
    pub grid_position: i32,
    /// Milliseconds
    pub penalty_time: i64,
}

/// Car slot singled out in a race (pole sitter, fastest lap)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarRef {
    pub driver_name: String,
    pub team_name: String,
}

impl CarRef {
    fn from_car(car: &SessionCarData) -> Self {
        Self {
            driver_name: car.driver.name.clone(),
            team_name: car.driver.team.clone(),
        }
    }
}

/// Result of one ingested race
#[derive(Debug, Clone)]
pub struct RaceResult {
    pub name: String,
    /// `track_name-track_config`
    pub track: String,
    pub date: DateTime<Utc>,
    pub num_laps: u32,
    /// Car slot → roster entrant for every car entered in this session
    pub entrants: BTreeMap<u32, EntrantKey>,
    /// Classified rows in finishing order, then non-starters in roster order
    pub classifications: Vec<RaceResultRow>,
    pub pole: CarRef,
    pub fastest_lap: CarRef,
    pub fastest_lap_time: u64,
    pub winning_time: u64,
    pub winning_laps_completed: u32,
}

impl RaceResult {
    /// First classification row, the race winner
    pub fn winner(&self) -> Option<&RaceResultRow> {
        self.classifications.first()
    }
}

fn nanos_to_millis(nanos: i64) -> i64 {
    (nanos as f64 / 1_000_000.0).round() as i64
}

/// Grid slot as a qualify classification, DNQ when there is none
fn grid_classification(grid_position: u32) -> Classification {
    i32::try_from(grid_position)
        .ok()
        .and_then(Classification::from_code)
        .unwrap_or(Classification::Dnq)
}

/// Percentage of the winner's distance covered
fn percent_complete(num_laps: u32, winner_laps: u32) -> f64 {
    num_laps as f64 / winner_laps as f64 * 100.0
}

/// Finish classification of one result row at `ordinal` (1-based).
///
/// The server's `Disqualified` flag is not consulted.
fn classify(
    row: &SessionResultData,
    ordinal: u32,
    winner_laps: u32,
    classification_threshold: u32,
) -> Classification {
    if percent_complete(row.num_laps, winner_laps) < classification_threshold as f64 {
        Classification::Dnf
    } else {
        Classification::Position(ordinal)
    }
}

/// Pole sitter and fastest lap of a session, found before the roster is touched
struct Highlights<'a> {
    pole: &'a SessionCarData,
    fastest_lap: &'a SessionCarData,
    fastest_lap_time: u64,
}

fn find_highlights<'a>(
    name: &str,
    results: &[SessionResultData],
    cars: &BTreeMap<u32, &'a SessionCarData>,
) -> Result<Highlights<'a>, ChampionshipError> {
    let mut pole = None;
    let mut fastest: Option<(&SessionCarData, u64)> = None;

    for row in results {
        let Some(&car) = cars.get(&row.car_id) else {
            continue;
        };
        if pole.is_none() && row.grid_position == 1 {
            pole = Some(car);
        }
        // Strictly faster only, so the first row wins a tie
        if fastest.map_or(true, |(_, time)| row.best_lap < time) {
            fastest = Some((car, row.best_lap));
        }
    }

    let pole = pole.ok_or_else(|| ChampionshipError::NoPoleSitter {
        race: name.to_string(),
    })?;
    let (fastest_lap, fastest_lap_time) = fastest.ok_or_else(|| ChampionshipError::NoFastestLap {
        race: name.to_string(),
    })?;

    Ok(Highlights {
        pole,
        fastest_lap,
        fastest_lap_time,
    })
}

/// Turn one session into a race result and extend the roster's histories.
///
/// `round_idx` is the 0-based index of this race in the season. New cars are
/// added to the roster with DNE history up to this round. Every roster
/// entrant gets exactly one new history entry: its classification if it has a
/// result row, DNS/DNQ otherwise.
///
/// The session is validated first; on error the roster is unchanged.
pub fn ingest_race(
    name: &str,
    session: &ServerSessionData,
    roster: &mut Roster,
    round_idx: usize,
    classification_threshold: u32,
) -> Result<RaceResult, ChampionshipError> {
    let winner = session
        .result
        .first()
        .ok_or_else(|| ChampionshipError::EmptyResults {
            race: name.to_string(),
        })?;
    if winner.num_laps == 0 {
        return Err(ChampionshipError::WinnerWithoutLaps {
            race: name.to_string(),
        });
    }

    let cars: BTreeMap<u32, &SessionCarData> =
        session.cars.iter().map(|car| (car.car_id, car)).collect();
    let highlights = find_highlights(name, &session.result, &cars)?;

    let mut entrants = BTreeMap::new();
    for car in &session.cars {
        let key = EntrantKey::from_car(car);
        if !roster.contains(&key) {
            tracing::debug!(entrant = %key, round = round_idx + 1, "New entrant");
            roster.insert(Entrant::from_car(car, round_idx));
        }
        entrants.insert(car.car_id, key);
    }

    let mut classifications = Vec::with_capacity(roster.len());
    for (pos_idx, row) in session.result.iter().enumerate() {
        let Some(key) = entrants.get(&row.car_id) else {
            tracing::warn!(race = name, car_id = row.car_id, "Result row for a car that was not entered");
            continue;
        };
        let Some(entrant) = roster.get_mut(key) else {
            continue;
        };

        let finish = classify(
            row,
            pos_idx as u32 + 1,
            winner.num_laps,
            classification_threshold,
        );
        let qualify = grid_classification(row.grid_position);
        if !entrant.record_round(round_idx, qualify, finish) {
            tracing::warn!(race = name, entrant = %key, "Duplicate result row ignored");
            continue;
        }

        classifications.push(RaceResultRow {
            classification: finish,
            driver_name: entrant.driver.name.clone(),
            team_name: entrant.team.team_name.clone(),
            total_time: Some(row.total_time),
            num_laps: Some(row.num_laps),
            best_lap: Some(row.best_lap),
            grid_position: qualify.code(),
            penalty_time: nanos_to_millis(row.penalty_time),
        });
    }

    for entrant in roster.iter_mut() {
        if entrant.rounds() != round_idx {
            continue;
        }
        entrant.record_round(round_idx, Classification::Dnq, Classification::Dns);
        classifications.push(RaceResultRow {
            classification: Classification::Dns,
            driver_name: entrant.driver.name.clone(),
            team_name: entrant.team.team_name.clone(),
            total_time: None,
            num_laps: None,
            best_lap: None,
            grid_position: Classification::Dnq.code(),
            penalty_time: 0,
        });
    }

    Ok(RaceResult {
        name: name.to_string(),
        track: format!("{}-{}", session.track_name, session.track_config),
        date: session.date,
        num_laps: session.session_config.laps,
        entrants,
        classifications,
        pole: CarRef::from_car(highlights.pole),
        fastest_lap: CarRef::from_car(highlights.fastest_lap),
        fastest_lap_time: highlights.fastest_lap_time,
        winning_time: winner.total_time,
        winning_laps_completed: winner.num_laps,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::{SessionConfig, SessionDriverData};
    use chrono::TimeZone;

    pub(crate) fn car(car_id: u32, name: &str, team: &str) -> SessionCarData {
        SessionCarData {
            car_id,
            model: "gt3".to_string(),
            driver: SessionDriverData {
                guid: format!("guid-{}", name),
                name: name.to_string(),
                nation: "GBR".to_string(),
                team: team.to_string(),
                class_id: String::new(),
            },
            restrictor: 0,
            ballast_kg: 0,
        }
    }

    pub(crate) fn result(car_id: u32, num_laps: u32, grid: u32, best_lap: u64) -> SessionResultData {
        SessionResultData {
            car_id,
            total_time: 600_000 + car_id as u64,
            num_laps,
            has_penalty: false,
            penalty_time: 0,
            lap_penalty: 0,
            disqualified: false,
            grid_position: grid,
            best_lap,
        }
    }

    pub(crate) fn session(cars: Vec<SessionCarData>, results: Vec<SessionResultData>) -> ServerSessionData {
        ServerSessionData {
            version: 1,
            event_name: "Test".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap(),
            track_name: "monza".to_string(),
            track_config: "gp".to_string(),
            session_config: SessionConfig {
                session_type: 3,
                time: 0,
                laps: 10,
            },
            cars,
            laps: vec![],
            result: results,
        }
    }

    fn key(name: &str, team: &str) -> EntrantKey {
        EntrantKey::new(&format!("guid-{}", name), name, "gt3", team)
    }

    #[test]
    fn test_basic_race() {
        let mut roster = Roster::new();
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(1, 10, 2, 90_500), result(0, 10, 1, 90_100)],
        );

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();

        assert_eq!(race.track, "monza-gp");
        assert_eq!(race.num_laps, 10);
        assert_eq!(race.winning_laps_completed, 10);
        assert_eq!(race.winning_time, 600_001);
        assert_eq!(race.pole.driver_name, "Ana");
        assert_eq!(race.fastest_lap.driver_name, "Ana");
        assert_eq!(race.fastest_lap_time, 90_100);
        assert_eq!(race.winner().unwrap().driver_name, "Bea");

        let bea = roster.get(&key("Bea", "Blue")).unwrap();
        assert_eq!(bea.finish_positions(), &[Classification::Position(1)]);
        assert_eq!(bea.qualify_positions(), &[Classification::Position(2)]);
        let ana = roster.get(&key("Ana", "Red")).unwrap();
        assert_eq!(ana.finish_positions(), &[Classification::Position(2)]);
        assert_eq!(ana.poles(), 1);
    }

    #[test]
    fn test_below_threshold_is_dnf() {
        let mut roster = Roster::new();
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(0, 20, 1, 90_000), result(1, 14, 2, 91_000)],
        );

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();

        // 14/20 = 70% < 75%
        assert_eq!(race.classifications[1].classification, Classification::Dnf);
        let bea = roster.get(&key("Bea", "Blue")).unwrap();
        assert_eq!(bea.finish_positions(), &[Classification::Dnf]);
        assert_eq!(bea.qualify_positions(), &[Classification::Position(2)]);
    }

    #[test]
    fn test_at_threshold_is_classified() {
        let mut roster = Roster::new();
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(0, 20, 1, 90_000), result(1, 15, 2, 91_000)],
        );

        ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();

        let bea = roster.get(&key("Bea", "Blue")).unwrap();
        assert_eq!(bea.finish_positions(), &[Classification::Position(2)]);
    }

    #[test]
    fn test_disqualified_flag_keeps_ordinal() {
        let mut roster = Roster::new();
        let mut winner = result(0, 10, 1, 90_000);
        winner.disqualified = true;
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![winner, result(1, 10, 2, 91_000)],
        );

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();

        assert_eq!(race.classifications[0].classification, Classification::Position(1));
        let ana = roster.get(&key("Ana", "Red")).unwrap();
        assert_eq!(ana.wins(), 1);
    }

    #[test]
    fn test_grid_classification() {
        assert_eq!(grid_classification(3), Classification::Position(3));
        assert_eq!(grid_classification(0), Classification::Dnq);
        assert_eq!(grid_classification(u32::MAX), Classification::Dnq);
    }

    #[test]
    fn test_oversized_grid_position_is_dnq() {
        let mut roster = Roster::new();
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(0, 10, 1, 90_000), result(1, 10, u32::MAX, 91_000)],
        );

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();

        assert_eq!(race.classifications[1].grid_position, -5);
        let bea = roster.get(&key("Bea", "Blue")).unwrap();
        assert_eq!(bea.qualify_positions(), &[Classification::Dnq]);
    }

    #[test]
    fn test_entered_without_result_is_dns() {
        let mut roster = Roster::new();
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(0, 10, 1, 90_000)],
        );

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();

        let row = &race.classifications[1];
        assert_eq!(row.driver_name, "Bea");
        assert_eq!(row.classification, Classification::Dns);
        assert_eq!(row.grid_position, -5);
        assert_eq!(row.total_time, None);
        assert_eq!(row.num_laps, None);
        assert_eq!(row.best_lap, None);
        assert_eq!(row.penalty_time, 0);

        let bea = roster.get(&key("Bea", "Blue")).unwrap();
        assert_eq!(bea.finish_positions(), &[Classification::Dns]);
        assert_eq!(bea.qualify_positions(), &[Classification::Dnq]);
    }

    #[test]
    fn test_absent_previous_entrant_is_dns() {
        let mut roster = Roster::new();
        let first = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(0, 10, 1, 90_000), result(1, 10, 2, 91_000)],
        );
        let second = session(vec![car(0, "Ana", "Red")], vec![result(0, 10, 1, 90_000)]);

        ingest_race("R1", &first, &mut roster, 0, 75).unwrap();
        let race = ingest_race("R2", &second, &mut roster, 1, 75).unwrap();

        assert_eq!(race.classifications.len(), 2);
        assert!(!race.entrants.values().any(|k| *k == key("Bea", "Blue")));
        let bea = roster.get(&key("Bea", "Blue")).unwrap();
        assert_eq!(
            bea.finish_positions(),
            &[Classification::Position(2), Classification::Dns]
        );
    }

    #[test]
    fn test_late_entrant_backfilled_with_dne() {
        let mut roster = Roster::new();
        let first = session(vec![car(0, "Ana", "Red")], vec![result(0, 10, 1, 90_000)]);
        let second = session(
            vec![car(0, "Ana", "Red"), car(1, "Cid", "Red")],
            vec![result(1, 10, 2, 89_000), result(0, 10, 1, 90_000)],
        );

        ingest_race("R1", &first, &mut roster, 0, 75).unwrap();
        let race = ingest_race("R2", &second, &mut roster, 1, 75).unwrap();

        let cid = roster.get(&key("Cid", "Red")).unwrap();
        assert_eq!(
            cid.finish_positions(),
            &[Classification::Dne, Classification::Position(1)]
        );
        assert_eq!(
            cid.qualify_positions(),
            &[Classification::Dne, Classification::Position(2)]
        );
        assert_eq!(race.fastest_lap.driver_name, "Cid");
    }

    #[test]
    fn test_unknown_car_keeps_its_ordinal() {
        let mut roster = Roster::new();
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(0, 10, 1, 90_000), result(7, 10, 3, 91_000), result(1, 10, 2, 92_000)],
        );

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();

        assert_eq!(race.classifications.len(), 2);
        let bea = roster.get(&key("Bea", "Blue")).unwrap();
        assert_eq!(bea.finish_positions(), &[Classification::Position(3)]);
    }

    #[test]
    fn test_fastest_lap_tie_goes_to_first_row() {
        let mut roster = Roster::new();
        let s = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(1, 10, 2, 90_000), result(0, 10, 1, 90_000)],
        );

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();
        assert_eq!(race.fastest_lap.driver_name, "Bea");
    }

    #[test]
    fn test_penalty_time_in_millis() {
        let mut roster = Roster::new();
        let mut row = result(0, 10, 1, 90_000);
        row.penalty_time = 5_499_600_000;
        let s = session(vec![car(0, "Ana", "Red")], vec![row]);

        let race = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap();
        assert_eq!(race.classifications[0].penalty_time, 5_500);
    }

    #[test]
    fn test_empty_results_is_error() {
        let mut roster = Roster::new();
        let s = session(vec![car(0, "Ana", "Red")], vec![]);

        let err = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap_err();
        assert_eq!(err, ChampionshipError::EmptyResults { race: "Monza".to_string() });
        assert!(roster.is_empty());
    }

    #[test]
    fn test_winner_without_laps_is_error() {
        let mut roster = Roster::new();
        let s = session(vec![car(0, "Ana", "Red")], vec![result(0, 0, 1, 90_000)]);

        let err = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap_err();
        assert!(matches!(err, ChampionshipError::WinnerWithoutLaps { .. }));
    }

    #[test]
    fn test_no_pole_is_error_and_roster_untouched() {
        let mut roster = Roster::new();
        let first = session(vec![car(0, "Ana", "Red")], vec![result(0, 10, 1, 90_000)]);
        ingest_race("R1", &first, &mut roster, 0, 75).unwrap();

        let broken = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Blue")],
            vec![result(0, 10, 2, 90_000), result(1, 10, 3, 91_000)],
        );
        let err = ingest_race("R2", &broken, &mut roster, 1, 75).unwrap_err();

        assert!(matches!(err, ChampionshipError::NoPoleSitter { .. }));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(&key("Ana", "Red")).unwrap().rounds(), 1);
    }

    #[test]
    fn test_no_known_cars_is_error() {
        let mut roster = Roster::new();
        let s = session(vec![], vec![result(4, 10, 1, 90_000)]);

        let err = ingest_race("Monza", &s, &mut roster, 0, 75).unwrap_err();
        assert!(matches!(err, ChampionshipError::NoPoleSitter { .. }));
    }
}
