use std::time::Duration;

use publisher_core::{resolve, ArticleRecord, BatchRequest, IdSet, PublishResult};
use publisher_logging::{publisher_info, publisher_warn};
use tokio_util::sync::CancellationToken;

use crate::catalog::with_timeout;
use crate::{BatchProgress, FailureKind, PublishRequest, PublisherApi};

#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Upper bound for each upload or publish call. `None` waits forever.
    pub call_timeout: Option<Duration>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            call_timeout: Some(Duration::from_secs(60)),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: BatchProgress);
}

/// Publishes `request.articles` one after another.
///
/// Returns exactly one result per article, in input order. A failing image
/// upload or publish call only affects its own article. Once `cancel` fires,
/// the remaining articles are recorded as cancelled without any call.
pub async fn publish_batch(
    api: &dyn PublisherApi,
    request: &BatchRequest,
    settings: &BatchSettings,
    cancel: &CancellationToken,
    sink: &dyn ProgressSink,
) -> Vec<PublishResult> {
    let total = request.articles.len();
    publisher_info!(
        "batch {} started: {} articles to {}",
        request.batch_id,
        total,
        request.profile
    );

    let mut results = Vec::with_capacity(total);
    for (index, article) in request.articles.iter().enumerate() {
        let result = if cancel.is_cancelled() {
            PublishResult::failed(&article.name, FailureKind::Cancelled.to_string())
        } else {
            publish_one(
                api,
                &request.profile,
                article,
                &request.global_categories,
                &request.global_tags,
                settings,
            )
            .await
        };

        if let Some(error) = result.error() {
            publisher_warn!("batch {} {}: {}", request.batch_id, article.name, error);
        }
        sink.emit(BatchProgress {
            batch_id: request.batch_id,
            index,
            total,
            result: result.clone(),
        });
        results.push(result);
    }

    let published = results.iter().filter(|r| r.is_success()).count();
    publisher_info!(
        "batch {} finished: {}/{} published",
        request.batch_id,
        published,
        total
    );
    results
}

async fn publish_one(
    api: &dyn PublisherApi,
    profile: &str,
    article: &ArticleRecord,
    global_categories: &IdSet,
    global_tags: &IdSet,
    settings: &BatchSettings,
) -> PublishResult {
    let featured_media = match &article.featured_image {
        Some(image) => {
            match with_timeout(
                settings.call_timeout,
                api.upload_featured_image(profile, image),
            )
            .await
            {
                Ok(media_id) => Some(media_id),
                Err(err) => return PublishResult::failed(&article.name, err.message),
            }
        }
        None => None,
    };

    let params = resolve(article, global_categories, global_tags);
    let request = PublishRequest {
        file_path: article.path.clone(),
        status: params.status.as_str().to_string(),
        categories: params.categories,
        tags: params.tags,
        featured_media,
    };

    match with_timeout(settings.call_timeout, api.publish_article(profile, &request)).await {
        Ok(published) => PublishResult::published(&article.name, published.url, params.status),
        Err(err) => PublishResult::failed(&article.name, err.message),
    }
}
