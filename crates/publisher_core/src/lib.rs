//! Publisher core: pure article batch state machine and view-model helpers.
mod catalog;
mod effect;
mod modal;
mod model;
mod msg;
mod resolve;
mod state;
mod store;
mod update;
mod view_model;

pub use catalog::TaxonomyCatalog;
pub use effect::{BatchRequest, Effect};
pub use modal::{ModalTarget, SelectAllScope, TaxonomyModal};
pub use model::{
    ArticleRecord, ArticleStatus, FeaturedImage, FileDescriptor, GlobalSelection, IdSet,
    NewProfile, Profile, PublishOutcome, PublishResult, TaxonomyEntity, TaxonomyId, TaxonomyKind,
};
pub use msg::Msg;
pub use resolve::{resolve, EffectiveParams};
pub use state::{AppState, BatchId, BatchState, Notice, NoticeLevel, RequestId};
pub use store::ArticleStore;
pub use update::update;
pub use view_model::{
    format_file_size, AppViewModel, ArticleRowView, BatchProgressView, ModalItemView, ModalView,
    ResultsView,
};
