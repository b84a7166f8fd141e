use crate::{ArticleRecord, BatchId, IdSet, NewProfile, RequestId, TaxonomyKind};

/// IO requested by `update`. Each completion comes back as a `Msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadProfiles,
    LoadProfile { name: String },
    CreateProfile(NewProfile),
    DeleteProfile { name: String },
    TestConnection { name: String },
    RefreshCatalog {
        profile: String,
        request: RequestId,
    },
    CreateTaxonomy {
        profile: String,
        kind: TaxonomyKind,
        name: String,
    },
    LoadDirectory {
        request: RequestId,
    },
    SetDirectory {
        directory: String,
        request: RequestId,
    },
    LoadFiles {
        request: RequestId,
    },
    PublishBatch(BatchRequest),
    CancelBatch { batch_id: BatchId },
}

/// Snapshot handed to the orchestrator. Later store edits do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub batch_id: BatchId,
    pub profile: String,
    pub articles: Vec<ArticleRecord>,
    pub global_categories: IdSet,
    pub global_tags: IdSet,
}
