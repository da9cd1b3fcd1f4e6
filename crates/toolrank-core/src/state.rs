//! View-layer listing state.
//!
//! Everything the listing view can vary — active board, active rank type,
//! selected category, and the per-board search terms — lives in one
//! immutable struct. Callers derive a new state via the `with_*`
//! transitions instead of mutating fields in place.

use crate::model::{RankType, Region};
use crate::rank::BoardFilter;

/// Immutable listing-view state.
///
/// Search terms are held per region: typing on the global board must not
/// clobber what the user typed on the domestic board, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    pub board: Region,
    pub rank_type: RankType,
    pub category: Option<i64>,
    pub global_search: String,
    pub domestic_search: String,
}

impl BoardState {
    #[must_use]
    pub fn with_board(mut self, board: Region) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_rank_type(mut self, rank_type: RankType) -> Self {
        self.rank_type = rank_type;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<i64>) -> Self {
        self.category = category;
        self
    }

    /// Set the search term for the active board, leaving the other board's
    /// term intact.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        match self.board {
            Region::Global => self.global_search = term.into(),
            Region::Domestic => self.domestic_search = term.into(),
        }
        self
    }

    /// Drop the category selection and both search terms at once.
    #[must_use]
    pub fn cleared(mut self) -> Self {
        self.category = None;
        self.global_search.clear();
        self.domestic_search.clear();
        self
    }

    /// The search term that applies to the active board.
    #[must_use]
    pub fn active_search(&self) -> &str {
        match self.board {
            Region::Global => &self.global_search,
            Region::Domestic => &self.domestic_search,
        }
    }

    /// The aggregator filter this state implies.
    #[must_use]
    pub fn filter(&self) -> BoardFilter {
        BoardFilter {
            category: self.category,
            search: Some(self.active_search().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_global_daily_unfiltered() {
        let state = BoardState::default();
        assert_eq!(state.board, Region::Global);
        assert_eq!(state.rank_type, RankType::DailyActivity);
        assert!(!state.filter().is_active());
    }

    #[test]
    fn search_terms_are_kept_per_board() {
        let state = BoardState::default()
            .with_search("midjourney")
            .with_board(Region::Domestic)
            .with_search("kimi");

        assert_eq!(state.global_search, "midjourney");
        assert_eq!(state.domestic_search, "kimi");
        assert_eq!(state.active_search(), "kimi");

        let back = state.with_board(Region::Global);
        assert_eq!(back.active_search(), "midjourney");
    }

    #[test]
    fn cleared_drops_category_and_both_terms() {
        let state = BoardState::default()
            .with_category(Some(3))
            .with_search("chat")
            .with_board(Region::Domestic)
            .with_search("助手")
            .cleared();

        assert_eq!(state.category, None);
        assert!(state.global_search.is_empty());
        assert!(state.domestic_search.is_empty());
        assert!(!state.filter().is_active());
    }

    #[test]
    fn filter_carries_active_term_and_category() {
        let state = BoardState::default()
            .with_category(Some(2))
            .with_search("code");
        let filter = state.filter();
        assert!(filter.is_active());
        assert_eq!(filter.category, Some(2));
        assert_eq!(filter.search_term(), Some("code"));
    }
}
