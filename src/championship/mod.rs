pub mod classification;
pub mod entrant;
pub mod error;
pub mod race;
pub mod season;

pub use classification::{label_for_code, Classification};
pub use entrant::{Driver, Entrant, EntrantKey, Roster, Team};
pub use error::ChampionshipError;
pub use race::{ingest_race, CarRef, RaceResult, RaceResultRow};
pub use season::Season;
