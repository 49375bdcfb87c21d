pub mod championship;
pub mod config;
pub mod data;
pub mod generate;
pub mod logging;
pub mod output;
pub mod publish;
pub mod standings;
