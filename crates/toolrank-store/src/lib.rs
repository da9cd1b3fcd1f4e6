//! Remote datastore access for toolrank.
//!
//! The hosted backend owns all four tables; this crate only reads them (and
//! invokes the favorite function). No retries: per the directory's
//! best-effort policy, callers log failures and render empty state.

mod client;
mod error;
mod query;

pub use client::{FavoriteAction, StoreClient};
pub use error::StoreError;
pub use query::TableQuery;
