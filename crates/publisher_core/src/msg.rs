use crate::{
    ArticleStatus, BatchId, FeaturedImage, FileDescriptor, NewProfile, Profile, PublishResult,
    RequestId, SelectAllScope, TaxonomyEntity, TaxonomyId, TaxonomyKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application start: load profiles, directory and files.
    Started,
    /// User picked a profile. An empty name clears the current profile.
    ProfileChosen(String),
    ProfileCreateRequested(NewProfile),
    ProfileDeleteRequested(String),
    ConnectionTestRequested(String),
    /// User asked to re-read the article folder.
    RefreshFilesClicked,
    DirectoryChosen(String),
    ArticleToggled { path: String },
    AllArticlesSelected(bool),
    ArticleStatusChanged { path: String, status: ArticleStatus },
    ArticleImageChosen { path: String, image: FeaturedImage },
    ArticleImageCleared { path: String },
    GlobalTaxonomyOpened(TaxonomyKind),
    ArticleTaxonomyOpened { path: String, kind: TaxonomyKind },
    TaxonomySearchChanged(String),
    TaxonomyItemToggled(TaxonomyId),
    TaxonomySelectAll,
    TaxonomyDeselectAll,
    TaxonomyAccepted,
    TaxonomyCancelled,
    /// Create a new entity of the open dialog's kind.
    TaxonomyCreateRequested(String),
    SelectAllScopeChanged(SelectAllScope),
    PublishClicked,
    CancelPublishClicked,

    ProfilesLoaded(Result<Vec<Profile>, String>),
    ProfileLoaded {
        name: String,
        result: Result<Profile, String>,
    },
    ProfileCreated {
        name: String,
        result: Result<(), String>,
    },
    ProfileDeleted {
        name: String,
        result: Result<(), String>,
    },
    ConnectionTested {
        name: String,
        result: Result<(), String>,
    },
    CatalogLoaded {
        profile: String,
        request: RequestId,
        result: Result<(Vec<TaxonomyEntity>, Vec<TaxonomyEntity>), String>,
    },
    TaxonomyCreated {
        profile: String,
        kind: TaxonomyKind,
        result: Result<Option<TaxonomyEntity>, String>,
    },
    DirectoryLoaded {
        request: RequestId,
        result: Result<String, String>,
    },
    DirectoryChanged {
        request: RequestId,
        result: Result<String, String>,
    },
    FilesLoaded {
        request: RequestId,
        result: Result<Vec<FileDescriptor>, String>,
    },
    /// One article of a running batch has been attempted.
    PublishProgress {
        batch_id: BatchId,
        index: usize,
        total: usize,
        result: PublishResult,
    },
    PublishFinished {
        batch_id: BatchId,
        results: Vec<PublishResult>,
    },
    NoOp,
}
