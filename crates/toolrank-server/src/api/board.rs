//! GET / — the listing/ranking view.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{Days, Utc};
use serde::{Deserialize, Serialize};

use toolrank_core::{
    rank_board, BoardDef, BoardState, CatalogStats, Category, RankType, RankedEntry, Region,
    RankingBook,
};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct BoardQuery {
    board: Option<Region>,
    rank_type: Option<RankType>,
    category: Option<i64>,
    q: Option<String>,
}

/// Everything the listing page renders: the active state, the board
/// registry, the sidebar data, and the ranked entries.
#[derive(Debug, Serialize)]
pub(in crate::api) struct BoardView {
    pub board: Region,
    pub rank_type: RankType,
    pub category: Option<i64>,
    pub search: String,
    pub filtered: bool,
    pub boards: Vec<BoardDef>,
    pub categories: Vec<Category>,
    pub stats: CatalogStats,
    pub entries: Vec<RankedEntry>,
}

pub(in crate::api) async fn board_view(
    State(app): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BoardQuery>,
) -> Json<ApiResponse<BoardView>> {
    let state = BoardState::default()
        .with_board(query.board.unwrap_or_default())
        .with_rank_type(query.rank_type.unwrap_or_default())
        .with_category(query.category)
        .with_search(query.q.unwrap_or_default());

    // Rankings are keyed on yesterday's period; today's snapshot is still
    // being computed upstream.
    let period_end = Utc::now().date_naive() - Days::new(1);

    let (categories, sites, book) = tokio::join!(
        app.store.list_categories(),
        app.store.list_active_sites(),
        app.store
            .load_ranking_book(period_end, app.settings.rankings_fetch_limit),
    );

    // Every fetch degrades independently to empty data; the view renders
    // "no data" rather than an error page.
    let categories = categories.unwrap_or_else(|e| {
        tracing::error!(error = %e, "category fetch failed; rendering empty list");
        Vec::new()
    });
    let sites = sites.unwrap_or_else(|e| {
        tracing::error!(error = %e, "site fetch failed; rendering empty list");
        Vec::new()
    });
    let book = book.unwrap_or_else(|e| {
        tracing::error!(error = %e, "ranking fetch failed; rendering empty board");
        RankingBook::default()
    });

    let filter = state.filter();
    let entries = rank_board(&sites, book.rows(state.board, state.rank_type), &filter);
    let stats = CatalogStats::collect(&sites, &categories);

    Json(ApiResponse {
        data: BoardView {
            board: state.board,
            rank_type: state.rank_type,
            category: state.category,
            search: state.active_search().to_string(),
            filtered: filter.is_active(),
            boards: app.boards.as_ref().clone(),
            categories,
            stats,
            entries,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
