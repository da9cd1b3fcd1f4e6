mod board;
mod catalog;

use clap::{Parser, Subcommand};

use toolrank_core::{RankType, Region};
use toolrank_store::StoreClient;

#[derive(Debug, Parser)]
#[command(name = "toolrank-cli")]
#[command(about = "toolrank command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a leaderboard for one (region, rank type) board.
    Board {
        #[arg(long, default_value = "global")]
        board: String,
        #[arg(long = "rank-type", default_value = "daily_activity")]
        rank_type: String,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List the active sites in the catalog.
    Sites {
        #[arg(long)]
        region: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// List the catalog's categories.
    Categories,
    /// Resolve a domestic alternative by name to its detail location.
    Resolve { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = toolrank_core::load_app_config_from_env()?;
    let store = StoreClient::new(
        &config.store_url,
        &config.store_anon_key,
        config.store_timeout_secs,
    )?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Board {
            board,
            rank_type,
            category,
            search,
            limit,
        } => {
            let region: Region = board.parse()?;
            let rank_type: RankType = rank_type.parse()?;
            let label = board_label(&config.boards_path, rank_type);
            board::run_board(
                &store,
                config.rankings_fetch_limit,
                region,
                rank_type,
                category,
                search,
                limit,
                &label,
            )
            .await?;
        }
        Commands::Sites { region, limit } => {
            let region = region.map(|r| r.parse::<Region>()).transpose()?;
            catalog::run_sites(&store, region, limit).await?;
        }
        Commands::Categories => catalog::run_categories(&store).await?,
        Commands::Resolve { name } => catalog::run_resolve(&store, &name).await?,
    }

    Ok(())
}

/// Display label for a rank type, from the boards registry when it loads,
/// otherwise the wire key itself.
fn board_label(boards_path: &std::path::Path, rank_type: RankType) -> String {
    toolrank_core::load_boards(boards_path)
        .ok()
        .and_then(|file| {
            file.boards
                .into_iter()
                .find(|b| b.key == rank_type)
                .map(|b| b.label)
        })
        .unwrap_or_else(|| rank_type.to_string())
}
