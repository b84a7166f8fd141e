use std::future::Future;
use std::time::Duration;

use futures_util::future::try_join;
use publisher_core::TaxonomyKind;
use publisher_logging::publisher_info;

use crate::{ApiError, CatalogLists, FailureKind, PublisherApi};

/// Runs `call`, turning an elapsed `limit` into a `Timeout` failure.
pub(crate) async fn with_timeout<T, F>(limit: Option<Duration>, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::new(
                FailureKind::Timeout,
                format!("timed out after {limit:?}"),
            )),
        },
        None => call.await,
    }
}

/// Fetches categories and tags for `profile` concurrently.
///
/// Both lists are returned together or not at all: if either request fails
/// the caller gets that error and must keep whatever catalog it had.
pub async fn refresh_catalog(
    api: &dyn PublisherApi,
    profile: &str,
    call_timeout: Option<Duration>,
) -> Result<CatalogLists, ApiError> {
    let categories = with_timeout(
        call_timeout,
        api.list_taxonomy(profile, TaxonomyKind::Categories),
    );
    let tags = with_timeout(call_timeout, api.list_taxonomy(profile, TaxonomyKind::Tags));
    let (categories, tags) = try_join(categories, tags).await?;
    publisher_info!(
        "catalog for {}: {} categories, {} tags",
        profile,
        categories.len(),
        tags.len()
    );
    Ok((categories, tags))
}
