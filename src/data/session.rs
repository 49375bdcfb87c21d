use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Race session as written by the dedicated server's result export.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerSessionData {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub event_name: String,
    pub date: DateTime<Utc>,
    pub track_name: String,
    #[serde(default)]
    pub track_config: String,
    pub session_config: SessionConfig,
    #[serde(default)]
    pub cars: Vec<SessionCarData>,
    #[serde(default)]
    pub laps: Vec<SessionLapData>,
    #[serde(default)]
    pub result: Vec<SessionResultData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionConfig {
    #[serde(default)]
    pub session_type: u32,
    #[serde(default)]
    pub time: u32,
    pub laps: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionDriverData {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub nation: String,
    #[serde(default)]
    pub team: String,
    #[serde(rename = "ClassID", default)]
    pub class_id: String,
}

/// One car slot of the session's entry list
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionCarData {
    pub car_id: u32,
    pub model: String,
    pub driver: SessionDriverData,
    #[serde(default)]
    pub restrictor: i32,
    #[serde(rename = "BallastKG", default)]
    pub ballast_kg: i32,
}

/// One row of the final classification, ordered by finishing position.
///
/// Times are milliseconds except `penalty_time`, which the server writes in
/// nanoseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionResultData {
    pub car_id: u32,
    pub total_time: u64,
    pub num_laps: u32,
    #[serde(default)]
    pub has_penalty: bool,
    #[serde(default)]
    pub penalty_time: i64,
    #[serde(default)]
    pub lap_penalty: i32,
    #[serde(default)]
    pub disqualified: bool,
    pub grid_position: u32,
    pub best_lap: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionLapData {
    pub car_id: u32,
    pub lap_time: u64,
    #[serde(default)]
    pub tyre: String,
    #[serde(default)]
    pub sectors: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_session() {
        let json = r#"{
            "Version": 1,
            "EventName": "Round 1",
            "Date": "2024-03-10T20:15:33Z",
            "TrackName": "monza",
            "TrackConfig": "gp",
            "SessionConfig": { "SessionType": 3, "Time": 0, "Laps": 12 },
            "Cars": [
                {
                    "CarId": 0,
                    "Model": "ks_ferrari_sf70h",
                    "Restrictor": 0,
                    "BallastKG": 5,
                    "Driver": { "Guid": "7656", "Name": "Ana Lopes", "Nation": "POR", "Team": "Scuderia", "ClassID": "gt3" }
                }
            ],
            "Laps": [ { "CarId": 0, "LapTime": 90123, "Tyre": "M", "Sectors": [30000, 30000, 30123] } ],
            "Result": [
                {
                    "CarId": 0, "TotalTime": 1100000, "NumLaps": 12, "HasPenalty": false,
                    "PenaltyTime": 5000000000, "LapPenalty": 0, "Disqualified": false,
                    "GridPosition": 1, "BestLap": 90123
                }
            ]
        }"#;

        let session: ServerSessionData = serde_json::from_str(json).unwrap();
        assert_eq!(session.track_name, "monza");
        assert_eq!(session.session_config.laps, 12);
        assert_eq!(session.cars[0].ballast_kg, 5);
        assert_eq!(session.cars[0].driver.class_id, "gt3");
        assert_eq!(session.result[0].penalty_time, 5_000_000_000);
        assert_eq!(session.laps[0].sectors.len(), 3);
    }

    #[test]
    fn test_parse_session_with_optional_sections_missing() {
        let json = r#"{
            "Date": "2024-03-10T20:15:33+01:00",
            "TrackName": "spa",
            "SessionConfig": { "Laps": 8 }
        }"#;

        let session: ServerSessionData = serde_json::from_str(json).unwrap();
        assert!(session.cars.is_empty());
        assert!(session.result.is_empty());
        assert_eq!(session.track_config, "");
    }
}
