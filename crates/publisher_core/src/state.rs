use crate::view_model::{
    format_file_size, AppViewModel, ArticleRowView, BatchProgressView, ModalItemView, ModalView,
    ResultsView,
};
use crate::{
    ArticleStore, GlobalSelection, ModalTarget, Profile, PublishResult, SelectAllScope,
    TaxonomyCatalog, TaxonomyKind, TaxonomyModal,
};

pub type BatchId = u64;

/// Generation of a load request. Only the answer to the latest one is applied.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchState {
    #[default]
    Idle,
    Publishing {
        batch_id: BatchId,
        total: usize,
        completed: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notification (toast) produced by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// The whole client state. Owned by the update loop; never shared globally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) profiles: Vec<Profile>,
    pub(crate) current_profile: Option<Profile>,
    pub(crate) pending_profile: Option<String>,
    pub(crate) catalog: TaxonomyCatalog,
    pub(crate) directory: Option<String>,
    pub(crate) directory_request: RequestId,
    pub(crate) files_request: RequestId,
    pub(crate) catalog_request: RequestId,
    pub(crate) articles: ArticleStore,
    pub(crate) global: GlobalSelection,
    pub(crate) modal: Option<TaxonomyModal>,
    pub(crate) select_all_scope: SelectAllScope,
    pub(crate) batch: BatchState,
    pub(crate) next_batch_id: BatchId,
    pub(crate) last_results: Vec<PublishResult>,
    pub(crate) notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_select_all_scope(scope: SelectAllScope) -> Self {
        Self {
            select_all_scope: scope,
            ..Self::default()
        }
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.current_profile.as_ref()
    }

    pub fn catalog(&self) -> &TaxonomyCatalog {
        &self.catalog
    }

    pub fn articles(&self) -> &ArticleStore {
        &self.articles
    }

    pub fn global_selection(&self) -> &GlobalSelection {
        &self.global
    }

    pub fn modal(&self) -> Option<&TaxonomyModal> {
        self.modal.as_ref()
    }

    pub fn batch(&self) -> BatchState {
        self.batch
    }

    pub fn last_results(&self) -> &[PublishResult] {
        &self.last_results
    }

    pub fn select_all_scope(&self) -> SelectAllScope {
        self.select_all_scope
    }

    pub fn is_publishing(&self) -> bool {
        matches!(self.batch, BatchState::Publishing { .. })
    }

    /// Returns and clears the notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
        self.dirty = true;
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .articles
            .records()
            .iter()
            .enumerate()
            .map(|(position, record)| ArticleRowView {
                position,
                path: record.path.clone(),
                name: record.name.clone(),
                selected: record.selected,
                status: record.status,
                has_image: record.featured_image.is_some(),
                categories: self
                    .catalog
                    .resolve_names(TaxonomyKind::Categories, &record.categories),
                tags: self.catalog.resolve_names(TaxonomyKind::Tags, &record.tags),
                size_text: format_file_size(record.size),
                modified: record.modified.clone(),
            })
            .collect();

        let batch = match self.batch {
            BatchState::Idle => None,
            BatchState::Publishing {
                total, completed, ..
            } => Some(BatchProgressView { total, completed }),
        };

        let results = if self.last_results.is_empty() {
            None
        } else {
            let published = self.last_results.iter().filter(|r| r.is_success()).count();
            Some(ResultsView {
                published,
                failed: self.last_results.len() - published,
                rows: self.last_results.clone(),
            })
        };

        AppViewModel {
            profiles: self.profiles.clone(),
            current_profile: self.current_profile.clone(),
            directory: self.directory.clone(),
            articles: rows,
            selected_count: self.articles.selected_count(),
            global_categories: self
                .catalog
                .resolve_names(TaxonomyKind::Categories, &self.global.categories),
            global_tags: self
                .catalog
                .resolve_names(TaxonomyKind::Tags, &self.global.tags),
            modal: self.modal.as_ref().map(|modal| self.modal_view(modal)),
            batch,
            results,
            dirty: self.dirty,
        }
    }

    fn modal_view(&self, modal: &TaxonomyModal) -> ModalView {
        let entities = self.catalog.entities(modal.kind());
        let items: Vec<ModalItemView> = entities
            .iter()
            .filter(|entity| modal.is_visible(entity))
            .map(|entity| ModalItemView {
                id: entity.id,
                name: entity.name.clone(),
                checked: modal.is_checked(entity.id),
            })
            .collect();
        let title = match modal.target() {
            ModalTarget::Global => format!("Select {} (global)", modal.kind()),
            ModalTarget::Article { path } => {
                let name = self
                    .articles
                    .get(path)
                    .map(|record| record.name.as_str())
                    .unwrap_or(path.as_str());
                format!("Select {} for {}", modal.kind(), name)
            }
        };
        ModalView {
            kind: modal.kind(),
            title,
            search: modal.search().to_string(),
            hidden_count: entities.len() - items.len(),
            items,
        }
    }
}
