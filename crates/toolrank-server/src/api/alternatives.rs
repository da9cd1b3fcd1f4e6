//! GET /alternatives/resolve — map a domestic alternative's name to its
//! detail location.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct ResolveQuery {
    name: String,
}

/// Both fields are null when nothing matched — resolving is best-effort and
/// a miss is a no-op for the caller, not an error.
#[derive(Debug, Serialize)]
pub(in crate::api) struct AlternativeResolution {
    pub site_id: Option<i64>,
    pub location: Option<String>,
}

pub(in crate::api) async fn resolve_alternative(
    State(app): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ResolveQuery>,
) -> Json<ApiResponse<AlternativeResolution>> {
    let site_id = match app.store.find_domestic_site_id(&query.name).await {
        Ok(found) => {
            if found.is_none() {
                tracing::info!(name = %query.name, "no domestic site with this name");
            }
            found
        }
        Err(e) => {
            tracing::warn!(name = %query.name, error = %e, "alternative lookup failed; treating as no match");
            None
        }
    };

    Json(ApiResponse {
        data: AlternativeResolution {
            site_id,
            location: site_id.map(|id| format!("/site/{id}")),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
