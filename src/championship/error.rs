use thiserror::Error;

/// A race that cannot be turned into a result without inventing data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChampionshipError {
    #[error("Race '{race}' has no result rows")]
    EmptyResults { race: String },

    #[error("Race '{race}' winner completed no laps")]
    WinnerWithoutLaps { race: String },

    #[error("Race '{race}' has no entrant starting from grid position 1")]
    NoPoleSitter { race: String },

    #[error("Race '{race}' has no classified entrant with a lap time")]
    NoFastestLap { race: String },
}
