//! The ranking aggregator: joins ranking rows to site rows, applies the
//! active filters, re-sorts by score, and renumbers when a filter is active.
//!
//! Ranking rows referencing a site id that is not in the fetched catalog are
//! dropped silently — the row cannot render without its site. Equal scores
//! keep the incoming fetch order (stable sort); the remote store does not
//! guarantee that order, so equal-score ordering is unspecified.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{RankType, Ranking, Region, Site};

/// Active listing filters: a category equality predicate and a
/// case-insensitive substring search over name and description.
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    pub category: Option<i64>,
    pub search: Option<String>,
}

impl BoardFilter {
    /// True when either predicate would narrow the board.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.search_term().is_some()
    }

    /// The search term that actually applies. Empty and whitespace-only
    /// input counts as no search.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A site joined to its ranking row, ready to render.
///
/// `stored_rank` is the position the snapshot assigned; `rank` is the
/// position displayed, which differs only when a filter renumbered the board.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub rank: i32,
    pub stored_rank: i32,
    pub score: f64,
    pub site: Site,
}

/// Join, filter, sort, and number one board's ranking rows.
#[must_use]
pub fn rank_board(sites: &[Site], rows: &[Ranking], filter: &BoardFilter) -> Vec<RankedEntry> {
    let by_id: HashMap<i64, &Site> = sites.iter().map(|s| (s.id, s)).collect();
    let needle = filter.search_term().map(str::to_lowercase);

    let mut entries: Vec<RankedEntry> = rows
        .iter()
        .filter_map(|row| {
            by_id.get(&row.site_id).map(|site| RankedEntry {
                rank: row.rank_position,
                stored_rank: row.rank_position,
                score: row.score,
                site: (*site).clone(),
            })
        })
        .filter(|e| filter.category.is_none_or(|c| e.site.category_id == c))
        .filter(|e| {
            needle.as_deref().is_none_or(|term| {
                e.site.name.to_lowercase().contains(term)
                    || e.site.description.to_lowercase().contains(term)
            })
        })
        .collect();

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    if filter.is_active() {
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i32::try_from(i + 1).unwrap_or(i32::MAX);
        }
    }

    entries
}

/// Identifies one board: the (region, rank type) pair a snapshot is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardKey {
    pub region: Region,
    pub rank_type: RankType,
}

/// One period's ranking rows grouped per board.
#[derive(Debug, Default)]
pub struct RankingBook {
    boards: HashMap<BoardKey, Vec<Ranking>>,
}

impl RankingBook {
    /// Group a flat snapshot into per-board row lists, preserving row order
    /// within each board.
    #[must_use]
    pub fn group(rows: Vec<Ranking>) -> Self {
        let mut boards: HashMap<BoardKey, Vec<Ranking>> = HashMap::new();
        for row in rows {
            let key = BoardKey {
                region: row.region,
                rank_type: row.rank_type,
            };
            boards.entry(key).or_default().push(row);
        }
        Self { boards }
    }

    /// Rows for one board; an absent board yields an empty slice.
    #[must_use]
    pub fn rows(&self, region: Region, rank_type: RankType) -> &[Ranking] {
        self.boards
            .get(&BoardKey { region, rank_type })
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }
}

/// Reduce a mixed-period row set to the single most recent period present,
/// keeping every row (both regions) for that period.
#[must_use]
pub fn latest_period(rows: Vec<Ranking>) -> Vec<Ranking> {
    let Some(latest) = rows.iter().map(|r| r.period_end).max() else {
        return Vec::new();
    };
    rows.into_iter()
        .filter(|r| r.period_end == latest)
        .collect()
}
