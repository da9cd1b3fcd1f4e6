//! GET /site/{id} — the detail view — and its favorite toggle.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{Days, Utc};
use serde::{Deserialize, Serialize};

use toolrank_core::{ActivityRecord, Category, Site};
use toolrank_store::FavoriteAction;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(in crate::api) struct SiteDetailView {
    pub site: Site,
    pub category: Option<Category>,
    /// Activity series for the configured window, oldest first.
    pub history: Vec<ActivityRecord>,
    /// The newest record of `history`, the headline numbers on the page.
    pub latest_activity: Option<ActivityRecord>,
}

pub(in crate::api) async fn site_detail(
    State(app): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SiteDetailView>>, ApiError> {
    let site = match app.store.get_site(id).await {
        Ok(Some(site)) => site,
        Ok(None) => {
            return Err(ApiError::new(req_id.0, "not_found", "no site with this id"));
        }
        Err(e) => {
            // A failed fetch renders the same not-found state the missing row
            // does; the distinction is only in the logs.
            tracing::error!(site_id = id, error = %e, "site fetch failed");
            return Err(ApiError::new(req_id.0, "not_found", "no site with this id"));
        }
    };

    let cutoff = Utc::now().date_naive() - Days::new(u64::from(app.settings.history_window_days));
    let (category, history) = tokio::join!(
        app.store.get_category(site.category_id),
        app.store.activity_since(id, cutoff),
    );

    let category = category.unwrap_or_else(|e| {
        tracing::warn!(site_id = id, error = %e, "category fetch failed; omitting");
        None
    });
    let history = history.unwrap_or_else(|e| {
        tracing::warn!(site_id = id, error = %e, "activity fetch failed; rendering empty chart");
        Vec::new()
    });
    let latest_activity = history.last().cloned();

    Ok(Json(ApiResponse {
        data: SiteDetailView {
            site,
            category,
            history,
            latest_activity,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(in crate::api) struct FavoriteRequest {
    action: FavoriteAction,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct FavoriteView {
    pub site_id: i64,
    pub favorited: bool,
}

pub(in crate::api) async fn toggle_favorite(
    State(app): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<FavoriteRequest>,
) -> Result<Json<ApiResponse<FavoriteView>>, ApiError> {
    app.store
        .manage_favorite(body.action, id, body.user_id.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(site_id = id, action = %body.action, error = %e, "favorite toggle failed");
            ApiError::new(req_id.0.clone(), "internal_error", "favorite toggle failed")
        })?;

    Ok(Json(ApiResponse {
        data: FavoriteView {
            site_id: id,
            favorited: body.action == FavoriteAction::Add,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
