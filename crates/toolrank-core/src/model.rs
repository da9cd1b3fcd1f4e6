//! Row types for the four logical tables exposed by the remote datastore.
//!
//! All of these are read-only from this codebase's perspective: the hosted
//! backend owns the schema and writes; we only deserialize what it returns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Catalog partition: globally hosted tools vs domestically accessible ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Global,
    Domestic,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Global, Region::Domestic];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Global => "global",
            Region::Domestic => "domestic",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Global
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Region::Global),
            "domestic" => Ok(Region::Domestic),
            other => Err(CoreError::InvalidRegion(other.to_string())),
        }
    }
}

/// The eight scoring dimensions a board can rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankType {
    DailyActivity,
    WeeklyActivity,
    MonthlyActivity,
    Trending,
    Uniqueness,
    Innovation,
    UserRating,
    FreeProducts,
}

impl RankType {
    pub const ALL: [RankType; 8] = [
        RankType::DailyActivity,
        RankType::WeeklyActivity,
        RankType::MonthlyActivity,
        RankType::Trending,
        RankType::Uniqueness,
        RankType::Innovation,
        RankType::UserRating,
        RankType::FreeProducts,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RankType::DailyActivity => "daily_activity",
            RankType::WeeklyActivity => "weekly_activity",
            RankType::MonthlyActivity => "monthly_activity",
            RankType::Trending => "trending",
            RankType::Uniqueness => "uniqueness",
            RankType::Innovation => "innovation",
            RankType::UserRating => "user_rating",
            RankType::FreeProducts => "free_products",
        }
    }
}

impl Default for RankType {
    fn default() -> Self {
        RankType::DailyActivity
    }
}

impl std::fmt::Display for RankType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RankType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankType::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| CoreError::InvalidRankType(s.to_string()))
    }
}

/// Pricing label carried by a site row. Values the backend may add later
/// deserialize as [`PricingModel::Other`] rather than failing the whole row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    #[serde(other)]
    Other,
}

impl Default for PricingModel {
    fn default() -> Self {
        PricingModel::Other
    }
}

/// Direction label attached to an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    #[serde(other)]
    Unknown,
}

/// A domestic stand-in suggested for a global tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub similarity: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// One AI tool in the directory (`ai_sites` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub category_id: i64,
    pub is_free: bool,
    #[serde(default)]
    pub pricing_model: PricingModel,
    pub innovation_score: f64,
    pub uniqueness_score: f64,
    pub user_rating: f64,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub has_domestic_alternative: bool,
    #[serde(default)]
    pub domestic_alternatives: Vec<Alternative>,
    #[serde(default)]
    pub is_accessible_domestic: bool,
    #[serde(default)]
    pub alternative_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Read-only reference data (`site_categories` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One day of the append-only activity time series (`activity_history` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub site_id: i64,
    pub activity_score: f64,
    pub daily_visits_estimate: i64,
    pub social_mentions: i64,
    #[serde(default)]
    pub github_stars: i64,
    pub record_date: NaiveDate,
    pub trend: Trend,
}

/// One ranking row: a site's position and score for a (rank type, region,
/// period) snapshot (`rankings` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    pub id: i64,
    pub site_id: i64,
    pub rank_type: RankType,
    pub region: Region,
    pub rank_position: i32,
    pub score: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Headline counts for the listing view's statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_sites: usize,
    pub global_sites: usize,
    pub domestic_sites: usize,
    pub categories: usize,
}

impl CatalogStats {
    #[must_use]
    pub fn collect(sites: &[Site], categories: &[Category]) -> Self {
        let global_sites = sites.iter().filter(|s| s.region == Region::Global).count();
        Self {
            total_sites: sites.len(),
            global_sites,
            domestic_sites: sites.len() - global_sites,
            categories: categories.len(),
        }
    }
}
