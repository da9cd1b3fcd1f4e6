use toolrank_core::Region;
use toolrank_store::StoreClient;

use crate::board::truncate;

/// List active sites, optionally narrowed to one region.
///
/// # Errors
///
/// Currently infallible; remote failures degrade to "no data" messaging.
pub(crate) async fn run_sites(
    store: &StoreClient,
    region: Option<Region>,
    limit: usize,
) -> anyhow::Result<()> {
    let sites = match store.list_active_sites().await {
        Ok(sites) => sites,
        Err(e) => {
            tracing::error!(error = %e, "site fetch failed");
            println!("no site data available (store unreachable)");
            return Ok(());
        }
    };

    let mut rows: Vec<_> = sites
        .iter()
        .filter(|s| region.is_none_or(|r| s.region == r))
        .collect();
    rows.truncate(limit);

    if rows.is_empty() {
        println!("no sites in the catalog");
        return Ok(());
    }

    let header = format!("{:<8}{:<24}{:<10}{:<8}URL", "ID", "NAME", "REGION", "RATING");
    println!("{header}");
    for site in rows {
        println!(
            "{:<8}{:<24}{:<10}{:<8.1}{}",
            site.id,
            truncate(&site.name, 22),
            site.region,
            site.user_rating,
            site.url,
        );
    }

    Ok(())
}

/// List the catalog's categories.
///
/// # Errors
///
/// Currently infallible; remote failures degrade to "no data" messaging.
pub(crate) async fn run_categories(store: &StoreClient) -> anyhow::Result<()> {
    let categories = match store.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "category fetch failed");
            println!("no category data available (store unreachable)");
            return Ok(());
        }
    };

    if categories.is_empty() {
        println!("no categories defined");
        return Ok(());
    }

    let header = format!("{:<8}{:<28}SLUG", "ID", "NAME");
    println!("{header}");
    for category in &categories {
        println!(
            "{:<8}{:<28}{}",
            category.id,
            truncate(&category.name, 26),
            category.slug
        );
    }

    Ok(())
}

/// Resolve a domestic alternative by exact name.
///
/// A miss or a failed lookup is a no-op: logged, reported as "no match",
/// never an error.
///
/// # Errors
///
/// Currently infallible.
pub(crate) async fn run_resolve(store: &StoreClient, name: &str) -> anyhow::Result<()> {
    match store.find_domestic_site_id(name).await {
        Ok(Some(id)) => println!("{name} \u{2192} /site/{id}"),
        Ok(None) => println!("no domestic site named '{name}'"),
        Err(e) => {
            tracing::warn!(name, error = %e, "alternative lookup failed; treating as no match");
            println!("no domestic site named '{name}'");
        }
    }

    Ok(())
}
