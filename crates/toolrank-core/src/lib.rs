//! Domain model and ranking logic for the toolrank directory.
//!
//! Everything here is pure: no I/O, no HTTP. The store crate fetches rows,
//! this crate joins, filters, sorts, and numbers them.

mod app_config;
mod boards;
mod config;
mod model;
mod rank;
mod state;

pub use app_config::{AppConfig, Environment};
pub use boards::{load_boards, BoardDef, BoardsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use model::{
    ActivityRecord, Alternative, CatalogStats, Category, PricingModel, RankType, Ranking, Region,
    Site, Trend,
};
pub use rank::{latest_period, rank_board, BoardFilter, BoardKey, RankedEntry, RankingBook};
pub use state::BoardState;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid region: {0}")]
    InvalidRegion(String),
    #[error("invalid rank type: {0}")]
    InvalidRankType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read boards file at {path}: {source}")]
    BoardsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse boards file: {0}")]
    BoardsFileParse(#[from] serde_yaml::Error),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}
