use super::entrant::{Entrant, EntrantKey, Roster};
use super::error::ChampionshipError;
use super::race::{ingest_race, RaceResult};
use crate::data::{SeasonInfo, ServerSessionData};

/// A season being built up race by race.
///
/// Races must be added in round order: entrant histories are indexed by the
/// order in which races were added.
#[derive(Debug, Clone)]
pub struct Season {
    pub info: SeasonInfo,
    roster: Roster,
    race_results: Vec<RaceResult>,
}

impl Season {
    pub fn new(info: SeasonInfo) -> Self {
        Self {
            info,
            roster: Roster::new(),
            race_results: Vec::new(),
        }
    }

    /// Ingest the next race of the season.
    ///
    /// On error the season is unchanged and later races can still be added.
    pub fn add_race_result(
        &mut self,
        name: &str,
        session: &ServerSessionData,
    ) -> Result<&RaceResult, ChampionshipError> {
        let round_idx = self.race_results.len();
        let race = ingest_race(
            name,
            session,
            &mut self.roster,
            round_idx,
            self.info.classification_threshold,
        )?;

        tracing::debug!(
            race = name,
            round = round_idx + 1,
            rows = race.classifications.len(),
            entrants = self.roster.len(),
            "Race ingested"
        );

        self.race_results.push(race);
        Ok(&self.race_results[round_idx])
    }

    pub fn get_entrant(&self, key: &EntrantKey) -> Option<&Entrant> {
        self.roster.get(key)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn entrants(&self) -> impl Iterator<Item = &Entrant> {
        self.roster.iter()
    }

    pub fn race_results(&self) -> &[RaceResult] {
        &self.race_results
    }

    pub fn race_count(&self) -> usize {
        self.race_results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::championship::race::tests::{car, result, session};
    use crate::championship::Classification;

    fn three_driver_season() -> Season {
        let mut season = Season::new(SeasonInfo::new("Test"));
        let r1 = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Red"), car(2, "Cid", "Blue")],
            vec![
                result(2, 10, 1, 90_000),
                result(0, 10, 2, 90_100),
                result(1, 10, 3, 90_200),
            ],
        );
        let r2 = session(
            vec![car(0, "Ana", "Red"), car(1, "Bea", "Red")],
            vec![result(0, 10, 1, 90_000), result(1, 10, 2, 90_100)],
        );
        season.add_race_result("R1", &r1).unwrap();
        season.add_race_result("R2", &r2).unwrap();
        season
    }

    #[test]
    fn test_histories_match_race_count() {
        let season = three_driver_season();
        assert_eq!(season.race_count(), 2);
        for entrant in season.entrants() {
            assert_eq!(entrant.qualify_positions().len(), season.race_count());
            assert_eq!(entrant.finish_positions().len(), season.race_count());
        }
    }

    #[test]
    fn test_skipped_race_history() {
        let season = three_driver_season();
        let cid = season
            .get_entrant(&EntrantKey::new("guid-Cid", "Cid", "gt3", "Blue"))
            .unwrap();
        assert_eq!(
            cid.finish_positions(),
            &[Classification::Position(1), Classification::Dns]
        );
        assert_eq!(
            cid.qualify_positions(),
            &[Classification::Position(1), Classification::Dnq]
        );
    }

    #[test]
    fn test_failed_race_leaves_season_unchanged() {
        let mut season = three_driver_season();
        let broken = session(vec![car(0, "Ana", "Red")], vec![]);

        assert!(season.add_race_result("R3", &broken).is_err());
        assert_eq!(season.race_count(), 2);
        assert!(season.entrants().all(|e| e.rounds() == 2));

        let r3 = session(vec![car(0, "Ana", "Red")], vec![result(0, 10, 1, 90_000)]);
        season.add_race_result("R3", &r3).unwrap();
        assert!(season.entrants().all(|e| e.rounds() == 3));
    }

    #[test]
    fn test_race_results_in_order() {
        let season = three_driver_season();
        let names: Vec<&str> = season.race_results().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["R1", "R2"]);
    }
}
