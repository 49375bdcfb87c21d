pub mod loader;
pub mod season_info;
pub mod session;

pub use loader::{load_record, load_season_info, load_season_list, load_session, SeasonPaths};
pub use season_info::{RaceEvent, SeasonInfo};
pub use session::{
    ServerSessionData, SessionCarData, SessionConfig, SessionDriverData, SessionLapData,
    SessionResultData,
};
