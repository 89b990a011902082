//! Page views: fetch, denormalize, render.
//!
//! Each view loads its collections with one all-or-nothing parallel fetch
//! and turns them into a [`Table`](crate::ui::table::Table). Display names
//! are re-derived by linear lookup across the sibling collections.

pub mod benchmarks;
pub mod configurations;
pub mod dashboard;
pub mod forms;
pub mod hardware;
pub mod lookup;
pub mod results;

use crate::api::ApiError;

/// Unwrap a view load, logging the failure and falling back to an empty
/// view. The error is returned alongside so callers can surface it.
pub fn load_or_log<T: Default>(view: &str, result: Result<T, ApiError>) -> (T, Option<ApiError>) {
    match result {
        Ok(data) => (data, None),
        Err(e) => {
            tracing::error!(view, error = %e, "failed to load view");
            (T::default(), Some(e))
        }
    }
}
