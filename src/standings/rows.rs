use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStandingsRow {
    pub name: String,
    /// Most recent team the driver raced for
    pub team: String,
    pub nation_code: String,
    /// Points after drop rounds, including pole bonus
    pub championship_points: u32,
    pub wins: u32,
    pub podiums: u32,
    pub poles: u32,
    /// Points from every round, including pole bonus
    pub total_points: u32,
    pub best_finish: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStandingsRow {
    pub name: String,
    pub car: String,
    /// Points scored by the team's best car in each round
    pub championship_points: u32,
    pub wins: u32,
    pub podiums: u32,
    pub poles: u32,
    /// Sum of every entrant's points
    pub total_points: u32,
    pub best_finish: Option<u32>,
}

/// Ranked driver standings, position implied by order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverStandings {
    pub standings: Vec<DriverStandingsRow>,
}

/// Ranked team standings, position implied by order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStandings {
    pub standings: Vec<TeamStandingsRow>,
}

/// Smaller of two optional best finishes
pub(crate) fn min_best_finish(current: Option<u32>, other: Option<u32>) -> Option<u32> {
    match (current, other) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_row_json_keys() {
        let row = DriverStandingsRow {
            name: "Ana Lopes".to_string(),
            team: "Red".to_string(),
            nation_code: "POR".to_string(),
            championship_points: 43,
            wins: 1,
            podiums: 2,
            poles: 1,
            total_points: 44,
            best_finish: None,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["nationCode"], "POR");
        assert_eq!(value["championshipPoints"], 43);
        assert_eq!(value["totalPoints"], 44);
        assert!(value["bestFinish"].is_null());
    }

    #[test]
    fn test_standings_wrapper() {
        let standings = TeamStandings {
            standings: vec![TeamStandingsRow {
                name: "Red".to_string(),
                car: "gt3".to_string(),
                championship_points: 25,
                wins: 1,
                podiums: 1,
                poles: 0,
                total_points: 25,
                best_finish: Some(1),
            }],
        };
        let json = serde_json::to_string(&standings).unwrap();
        assert!(json.starts_with(r#"{"standings":[{"name":"Red","car":"gt3""#));
        assert!(json.contains(r#""bestFinish":1"#));
    }

    #[test]
    fn test_min_best_finish() {
        assert_eq!(min_best_finish(None, None), None);
        assert_eq!(min_best_finish(Some(4), None), Some(4));
        assert_eq!(min_best_finish(None, Some(2)), Some(2));
        assert_eq!(min_best_finish(Some(4), Some(2)), Some(2));
    }
}
