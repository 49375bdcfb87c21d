pub mod calculator;
pub mod ranking;
pub mod rows;
pub mod validation;

pub use calculator::{calculate_standings, points_for_history, points_for_position, Standings};
pub use ranking::{rank, RankingKey};
pub use rows::{DriverStandings, DriverStandingsRow, TeamStandings, TeamStandingsRow};
pub use validation::{season_info_warnings, validate_season_info};
