//! HTTP client for the hosted datastore's REST interface.
//!
//! Wraps `reqwest` with the store's auth headers, typed row deserialization,
//! and the ranking-snapshot fallback policy. Table reads go through
//! `rest/v1/{table}` with [`TableQuery`] parameters; the favorite toggle goes
//! through the hosted function endpoint under `functions/v1`.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use toolrank_core::{
    latest_period, ActivityRecord, Category, Ranking, RankingBook, Region, Site,
};

use crate::error::StoreError;
use crate::query::TableQuery;

const TABLE_SITES: &str = "ai_sites";
const TABLE_CATEGORIES: &str = "site_categories";
const TABLE_ACTIVITY: &str = "activity_history";
const TABLE_RANKINGS: &str = "rankings";

/// Direction of a favorite toggle sent to the hosted function endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Add,
    Remove,
}

impl std::fmt::Display for FavoriteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FavoriteAction::Add => write!(f, "add"),
            FavoriteAction::Remove => write!(f, "remove"),
        }
    }
}

#[derive(Debug, Serialize)]
struct FavoritePayload<'a> {
    action: FavoriteAction,
    site_id: i64,
    user_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

/// Client for the hosted datastore.
///
/// Holds the HTTP client, base URL, and the anon key sent with every request.
/// Point `base_url` at a mock server in tests.
pub struct StoreClient {
    client: Client,
    base_url: Url,
    anon_key: String,
}

impl StoreClient {
    /// Creates a client for the datastore at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn new(base_url: &str, anon_key: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("toolrank/0.1 (tool-directory)")
            .build()?;

        // Normalise: exactly one trailing slash so joins append path segments
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| StoreError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            anon_key: anon_key.to_owned(),
        })
    }

    /// Categories ordered by name.
    ///
    /// # Errors
    ///
    /// [`StoreError::Http`] on transport failure, [`StoreError::Api`] on a
    /// non-2xx response, [`StoreError::Deserialize`] on an unexpected body.
    pub async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.fetch_rows(
            TableQuery::new(TABLE_CATEGORIES).order_asc("name"),
            "list_categories",
        )
        .await
    }

    /// All active sites, newest first.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn list_active_sites(&self) -> Result<Vec<Site>, StoreError> {
        self.fetch_rows(
            TableQuery::new(TABLE_SITES)
                .eq("status", "active")
                .order_desc("created_at"),
            "list_active_sites",
        )
        .await
    }

    /// One site by id; `None` when no row matches.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn get_site(&self, id: i64) -> Result<Option<Site>, StoreError> {
        let rows: Vec<Site> = self
            .fetch_rows(
                TableQuery::new(TABLE_SITES).eq("id", id).limit(1),
                "get_site",
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// One category by id; `None` when no row matches.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let rows: Vec<Category> = self
            .fetch_rows(
                TableQuery::new(TABLE_CATEGORIES).eq("id", id).limit(1),
                "get_category",
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// A site's activity records on or after `cutoff`, oldest first.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn activity_since(
        &self,
        site_id: i64,
        cutoff: NaiveDate,
    ) -> Result<Vec<ActivityRecord>, StoreError> {
        self.fetch_rows(
            TableQuery::new(TABLE_ACTIVITY)
                .eq("site_id", site_id)
                .gte("record_date", cutoff)
                .order_asc("record_date"),
            "activity_since",
        )
        .await
    }

    /// Ranking rows for one (region, period) pair, ordered by stored position.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn rankings_for_period(
        &self,
        region: Region,
        period_end: NaiveDate,
    ) -> Result<Vec<Ranking>, StoreError> {
        self.fetch_rows(
            TableQuery::new(TABLE_RANKINGS)
                .eq("period_end", period_end)
                .eq("region", region)
                .order_asc("rank_position"),
            "rankings_for_period",
        )
        .await
    }

    /// The most recent ranking rows across both regions, newest period first.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn latest_rankings(&self, limit: u32) -> Result<Vec<Ranking>, StoreError> {
        self.fetch_rows(
            TableQuery::new(TABLE_RANKINGS)
                .in_list("region", &["global", "domestic"])
                .order_desc("period_end")
                .limit(limit),
            "latest_rankings",
        )
        .await
    }

    /// Loads the ranking snapshot for `period_end`, grouped per board.
    ///
    /// Fetches both regions' rows for the requested period; if neither region
    /// has any, falls back to the most recent period with rows anywhere
    /// (bounded by `fallback_limit`) and keeps both regions' rows for it.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn load_ranking_book(
        &self,
        period_end: NaiveDate,
        fallback_limit: u32,
    ) -> Result<RankingBook, StoreError> {
        let (global, domestic) = tokio::join!(
            self.rankings_for_period(Region::Global, period_end),
            self.rankings_for_period(Region::Domestic, period_end),
        );

        let mut rows = global?;
        rows.extend(domestic?);

        if rows.is_empty() {
            tracing::debug!(%period_end, "no ranking rows for period; falling back to latest");
            rows = latest_period(self.latest_rankings(fallback_limit).await?);
        }

        Ok(RankingBook::group(rows))
    }

    /// Id of the domestic site with exactly this name; `None` when absent.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn find_domestic_site_id(&self, name: &str) -> Result<Option<i64>, StoreError> {
        let rows: Vec<IdRow> = self
            .fetch_rows(
                TableQuery::new(TABLE_SITES)
                    .select("id")
                    .eq("name", name)
                    .eq("region", Region::Domestic)
                    .limit(1),
                "find_domestic_site_id",
            )
            .await?;
        Ok(rows.into_iter().next().map(|row| row.id))
    }

    /// Toggles a favorite through the hosted `manage-favorite` function.
    ///
    /// # Errors
    ///
    /// [`StoreError::Http`] on transport failure, [`StoreError::Api`] when
    /// the function returns a non-2xx response.
    pub async fn manage_favorite(
        &self,
        action: FavoriteAction,
        site_id: i64,
        user_id: Option<&str>,
    ) -> Result<(), StoreError> {
        let url = self
            .base_url
            .join("functions/v1/manage-favorite")
            .map_err(|e| StoreError::Api(format!("invalid function path: {e}")))?;

        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&FavoritePayload {
                action,
                site_id,
                user_id,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(error_message(status, &body)));
        }
        Ok(())
    }

    /// Cheapest possible reachability probe: one category id.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_categories`].
    pub async fn health_check(&self) -> Result<(), StoreError> {
        let _rows: Vec<IdRow> = self
            .fetch_rows(
                TableQuery::new(TABLE_CATEGORIES).select("id").limit(1),
                "health_check",
            )
            .await?;
        Ok(())
    }

    /// Builds the full table URL with percent-encoded query parameters.
    fn table_url(&self, query: &TableQuery) -> Result<Url, StoreError> {
        let mut url = self
            .base_url
            .join(&format!("rest/v1/{}", query.table()))
            .map_err(|e| StoreError::Api(format!("invalid table '{}': {e}", query.table())))?;
        url.query_pairs_mut().extend_pairs(query.params());
        Ok(url)
    }

    /// Runs a table query and deserializes the returned row array.
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        query: TableQuery,
        context: &str,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(&query)?;
        tracing::debug!(%url, context, "store fetch");

        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StoreError::Api(error_message(status, &body)));
        }

        serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Extracts the store's error message from a failure body, falling back to
/// the raw body text.
fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_string());
    format!("{status}: {detail}")
}
