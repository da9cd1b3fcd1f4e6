use chrono::{Days, Utc};

use toolrank_core::{rank_board, BoardFilter, RankType, Region};
use toolrank_store::StoreClient;

/// Print one board's leaderboard as a fixed-width table.
///
/// Remote failures are logged and rendered as "no data", matching the
/// directory's best-effort policy.
///
/// # Errors
///
/// Currently infallible beyond argument parsing; kept fallible for parity
/// with the other subcommands.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_board(
    store: &StoreClient,
    fetch_limit: u32,
    region: Region,
    rank_type: RankType,
    category: Option<i64>,
    search: Option<String>,
    limit: usize,
    label: &str,
) -> anyhow::Result<()> {
    let period_end = Utc::now().date_naive() - Days::new(1);

    let (sites, book) = tokio::join!(
        store.list_active_sites(),
        store.load_ranking_book(period_end, fetch_limit),
    );

    let sites = match sites {
        Ok(sites) => sites,
        Err(e) => {
            tracing::error!(error = %e, "site fetch failed");
            println!("no ranking data available (store unreachable)");
            return Ok(());
        }
    };
    let book = match book {
        Ok(book) => book,
        Err(e) => {
            tracing::error!(error = %e, "ranking fetch failed");
            println!("no ranking data available (store unreachable)");
            return Ok(());
        }
    };

    let filter = BoardFilter { category, search };
    let entries = rank_board(&sites, book.rows(region, rank_type), &filter);

    if entries.is_empty() {
        if filter.is_active() {
            println!("no results match the current filters");
        } else {
            println!("no rows for this board; the upstream snapshot may be pending");
        }
        return Ok(());
    }

    println!("{label} \u{2014} {region}");
    let header = format!("{:<6}{:<8}{:<8}{:<24}DESCRIPTION", "RANK", "SCORE", "RATING", "NAME");
    println!("{header}");
    for entry in entries.iter().take(limit) {
        println!(
            "{:<6}{:<8.1}{:<8.1}{:<24}{}",
            entry.rank,
            entry.score,
            entry.site.user_rating,
            truncate(&entry.site.name, 22),
            truncate(&entry.site.description, 48),
        );
    }

    Ok(())
}

/// Cap a string at `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("Chatter", 22), "Chatter");
    }

    #[test]
    fn truncate_cuts_on_chars_not_bytes() {
        let name = "智谱清言多模态创作助手平台";
        let cut = truncate(name, 6);
        assert_eq!(cut, "智谱清言多模...");
    }
}
