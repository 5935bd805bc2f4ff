//! Paginated list helpers shared by the Octocrab gateway.

use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;

use crate::error::PingError;

use super::error_mapping::map_octocrab_error;

/// Fetches the first page at `path` and follows `Link` headers to the end.
pub(super) async fn fetch_all_pages<T>(
    client: &Octocrab,
    path: String,
    operation: &str,
) -> Result<Vec<T>, PingError>
where
    T: DeserializeOwned + Send,
{
    let page = client
        .get::<Page<T>, _, _>(path, Some(&[("per_page", "100")]))
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;

    client
        .all_pages(page)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))
}
