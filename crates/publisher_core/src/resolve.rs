use crate::{ArticleRecord, ArticleStatus, IdSet, TaxonomyId};

/// Parameters actually sent for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveParams {
    pub categories: Vec<TaxonomyId>,
    pub tags: Vec<TaxonomyId>,
    pub status: ArticleStatus,
}

/// Applies per-article overrides over the global selection.
///
/// A non-empty per-article list wins over the global one, independently for
/// categories and tags. Status never falls back: it is always the article's.
pub fn resolve(
    article: &ArticleRecord,
    global_categories: &IdSet,
    global_tags: &IdSet,
) -> EffectiveParams {
    EffectiveParams {
        categories: pick(&article.categories, global_categories),
        tags: pick(&article.tags, global_tags),
        status: article.status,
    }
}

fn pick(own: &IdSet, global: &IdSet) -> Vec<TaxonomyId> {
    if own.is_empty() {
        global.to_vec()
    } else {
        own.to_vec()
    }
}
