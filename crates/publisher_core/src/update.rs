use crate::{
    AppState, BatchRequest, BatchState, Effect, ModalTarget, Msg, NoticeLevel, Profile,
    TaxonomyCatalog, TaxonomyKind, TaxonomyModal,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![
            Effect::LoadProfiles,
            load_directory(&mut state),
            load_files(&mut state),
        ],

        Msg::ProfileChosen(name) => choose_profile(&mut state, name),
        Msg::ProfileCreateRequested(profile) => {
            if [&profile.name, &profile.url, &profile.username]
                .iter()
                .any(|field| field.trim().is_empty())
            {
                state.notify(
                    NoticeLevel::Warning,
                    "profile name, url and username are required",
                );
                Vec::new()
            } else {
                vec![Effect::CreateProfile(profile)]
            }
        }
        Msg::ProfileDeleteRequested(name) => {
            if name.trim().is_empty() {
                Vec::new()
            } else {
                vec![Effect::DeleteProfile { name }]
            }
        }
        Msg::ConnectionTestRequested(name) => {
            if name.trim().is_empty() {
                Vec::new()
            } else {
                vec![Effect::TestConnection { name }]
            }
        }
        Msg::RefreshFilesClicked => vec![load_files(&mut state)],
        Msg::DirectoryChosen(directory) => {
            let directory = directory.trim().to_string();
            if directory.is_empty() {
                state.notify(NoticeLevel::Warning, "directory path is required");
                Vec::new()
            } else {
                state.directory_request += 1;
                vec![Effect::SetDirectory {
                    directory,
                    request: state.directory_request,
                }]
            }
        }

        Msg::ArticleToggled { path } => {
            if state.articles.toggle_selected(&path) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AllArticlesSelected(selected) => {
            state.articles.set_all_selected(selected);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ArticleStatusChanged { path, status } => {
            if state.articles.set_status(&path, status) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ArticleImageChosen { path, image } => {
            if state.articles.set_featured_image(&path, image) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ArticleImageCleared { path } => {
            if state.articles.clear_featured_image(&path) {
                state.mark_dirty();
            }
            Vec::new()
        }

        Msg::GlobalTaxonomyOpened(kind) => {
            if require_profile(&mut state) {
                let seed = state.global.get(kind).clone();
                state.modal = Some(TaxonomyModal::open(kind, ModalTarget::Global, &seed));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ArticleTaxonomyOpened { path, kind } => {
            if require_profile(&mut state) {
                match state.articles.get(&path) {
                    Some(record) => {
                        let seed = record.taxonomy(kind).clone();
                        let target = ModalTarget::Article { path };
                        state.modal = Some(TaxonomyModal::open(kind, target, &seed));
                        state.mark_dirty();
                    }
                    None => state.notify(NoticeLevel::Warning, format!("unknown article {path}")),
                }
            }
            Vec::new()
        }
        Msg::TaxonomySearchChanged(text) => {
            if let Some(modal) = state.modal.as_mut() {
                modal.set_search(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TaxonomyItemToggled(id) => {
            if let Some(modal) = state.modal.as_mut() {
                modal.toggle(id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TaxonomySelectAll => {
            set_all_in_modal(&mut state, true);
            Vec::new()
        }
        Msg::TaxonomyDeselectAll => {
            set_all_in_modal(&mut state, false);
            Vec::new()
        }
        Msg::TaxonomyAccepted => {
            accept_modal(&mut state);
            Vec::new()
        }
        Msg::TaxonomyCancelled => {
            if state.modal.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TaxonomyCreateRequested(name) => request_taxonomy_create(&mut state, name),
        Msg::SelectAllScopeChanged(scope) => {
            state.select_all_scope = scope;
            Vec::new()
        }

        Msg::PublishClicked => start_batch(&mut state),
        Msg::CancelPublishClicked => match state.batch {
            BatchState::Publishing { batch_id, .. } => {
                state.notify(NoticeLevel::Info, "cancelling after the current article");
                vec![Effect::CancelBatch { batch_id }]
            }
            BatchState::Idle => Vec::new(),
        },

        Msg::ProfilesLoaded(result) => {
            match result {
                Ok(profiles) => {
                    state.profiles = profiles;
                    state.mark_dirty();
                }
                Err(err) => {
                    state.notify(NoticeLevel::Error, format!("failed to load profiles: {err}"))
                }
            }
            Vec::new()
        }
        Msg::ProfileLoaded { name, result } => profile_loaded(&mut state, name, result),
        Msg::ProfileCreated { name, result } => match result {
            Ok(()) => {
                state.notify(NoticeLevel::Success, format!("profile {name} saved"));
                vec![Effect::LoadProfiles]
            }
            Err(err) => {
                state.notify(NoticeLevel::Error, format!("failed to save profile: {err}"));
                Vec::new()
            }
        },
        Msg::ProfileDeleted { name, result } => match result {
            Ok(()) => {
                if is_current(&state, &name) {
                    clear_profile(&mut state);
                }
                state.notify(NoticeLevel::Success, format!("profile {name} deleted"));
                vec![Effect::LoadProfiles]
            }
            Err(err) => {
                state.notify(NoticeLevel::Error, format!("failed to delete profile: {err}"));
                Vec::new()
            }
        },
        Msg::ConnectionTested { name, result } => {
            match result {
                Ok(()) => state.notify(NoticeLevel::Success, format!("connection to {name} ok")),
                Err(err) => {
                    state.notify(NoticeLevel::Error, format!("connection to {name} failed: {err}"))
                }
            }
            Vec::new()
        }
        Msg::CatalogLoaded {
            profile,
            request,
            result,
        } => {
            // Only the latest refresh of the current profile is applied.
            if request == state.catalog_request
                && is_current(&state, &profile)
                && state.catalog.belongs_to(&profile)
            {
                match result {
                    Ok((categories, tags)) => {
                        state.catalog.replace(categories, tags);
                        state.mark_dirty();
                    }
                    Err(err) => state.notify(
                        NoticeLevel::Error,
                        format!("failed to load categories and tags: {err}"),
                    ),
                }
            }
            Vec::new()
        }
        Msg::TaxonomyCreated {
            profile,
            kind,
            result,
        } => {
            if !is_current(&state, &profile) {
                return (state, Vec::new());
            }
            match result {
                Ok(entity) => {
                    if let Some(entity) = entity {
                        state.catalog.append(kind, entity);
                    }
                    state.notify(NoticeLevel::Success, format!("added to {kind}"));
                    vec![refresh_catalog(&mut state, profile)]
                }
                Err(err) => {
                    state.notify(NoticeLevel::Error, format!("failed to add to {kind}: {err}"));
                    Vec::new()
                }
            }
        }
        Msg::DirectoryLoaded { request, result } => {
            if request != state.directory_request {
                return (state, Vec::new());
            }
            match result {
                Ok(directory) => {
                    state.directory = Some(directory);
                    state.mark_dirty();
                }
                Err(err) => {
                    state.notify(NoticeLevel::Error, format!("failed to read directory: {err}"))
                }
            }
            Vec::new()
        }
        Msg::DirectoryChanged { request, result } => {
            if request != state.directory_request {
                return (state, Vec::new());
            }
            match result {
                Ok(directory) => {
                    state.notify(NoticeLevel::Success, format!("directory changed to {directory}"));
                    state.directory = Some(directory);
                    vec![load_files(&mut state)]
                }
                Err(err) => {
                    state.notify(NoticeLevel::Error, format!("failed to change directory: {err}"));
                    Vec::new()
                }
            }
        }
        Msg::FilesLoaded { request, result } => {
            // An older listing may belong to a directory that is no longer set.
            if request != state.files_request {
                return (state, Vec::new());
            }
            match result {
                Ok(files) => {
                    state.articles.load(files);
                    state.mark_dirty();
                }
                Err(err) => {
                    state.notify(NoticeLevel::Error, format!("failed to load files: {err}"))
                }
            }
            Vec::new()
        }
        Msg::PublishProgress {
            batch_id, index, ..
        } => {
            if let BatchState::Publishing {
                batch_id: running,
                total,
                completed,
            } = state.batch
            {
                if running == batch_id {
                    state.batch = BatchState::Publishing {
                        batch_id,
                        total,
                        completed: completed.max(index + 1).min(total),
                    };
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::PublishFinished { batch_id, results } => {
            let running = match state.batch {
                BatchState::Publishing { batch_id, .. } => Some(batch_id),
                BatchState::Idle => None,
            };
            if running == Some(batch_id) {
                let published = results.iter().filter(|r| r.is_success()).count();
                let level = if published == results.len() {
                    NoticeLevel::Success
                } else {
                    NoticeLevel::Warning
                };
                state.notify(
                    level,
                    format!("published {published} of {} articles", results.len()),
                );
                state.batch = BatchState::Idle;
                state.last_results = results;
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_current(state: &AppState, profile: &str) -> bool {
    state.current_profile.as_ref().map(|p| p.name.as_str()) == Some(profile)
}

fn load_directory(state: &mut AppState) -> Effect {
    state.directory_request += 1;
    Effect::LoadDirectory {
        request: state.directory_request,
    }
}

fn load_files(state: &mut AppState) -> Effect {
    state.files_request += 1;
    Effect::LoadFiles {
        request: state.files_request,
    }
}

fn refresh_catalog(state: &mut AppState, profile: String) -> Effect {
    state.catalog_request += 1;
    Effect::RefreshCatalog {
        profile,
        request: state.catalog_request,
    }
}

fn require_profile(state: &mut AppState) -> bool {
    if state.current_profile.is_some() {
        true
    } else {
        state.notify(NoticeLevel::Warning, "select a profile first");
        false
    }
}

fn clear_profile(state: &mut AppState) {
    state.current_profile = None;
    state.pending_profile = None;
    state.catalog = TaxonomyCatalog::new();
    state.modal = None;
    state.mark_dirty();
}

fn choose_profile(state: &mut AppState, name: String) -> Vec<Effect> {
    let name = name.trim().to_string();
    if name.is_empty() {
        clear_profile(state);
        return Vec::new();
    }
    state.pending_profile = Some(name.clone());
    vec![Effect::LoadProfile { name }]
}

fn profile_loaded(
    state: &mut AppState,
    name: String,
    result: Result<Profile, String>,
) -> Vec<Effect> {
    if state.pending_profile.as_deref() != Some(name.as_str()) {
        return Vec::new();
    }
    state.pending_profile = None;
    match result {
        Ok(profile) => {
            state.notify(
                NoticeLevel::Info,
                format!("connected to {} (user {})", profile.url, profile.username),
            );
            state.current_profile = Some(profile);
            // The old catalog belongs to another target and must not be shown.
            state.catalog = TaxonomyCatalog::for_profile(name.clone());
            state.modal = None;
            vec![refresh_catalog(state, name)]
        }
        Err(err) => {
            state.notify(NoticeLevel::Error, format!("failed to load profile {name}: {err}"));
            Vec::new()
        }
    }
}

fn set_all_in_modal(state: &mut AppState, checked: bool) {
    if let Some(modal) = state.modal.as_mut() {
        let entities = state.catalog.entities(modal.kind());
        modal.set_all(entities, checked, state.select_all_scope);
        state.mark_dirty();
    }
}

fn accept_modal(state: &mut AppState) {
    let Some(modal) = state.modal.take() else {
        return;
    };
    let kind = modal.kind();
    let ids = modal.accepted_ids(state.catalog.entities(kind));
    match modal.target() {
        ModalTarget::Global => state.global.set(kind, ids),
        ModalTarget::Article { path } => {
            if !state.articles.set_taxonomy(path, kind, ids) {
                state.notify(
                    NoticeLevel::Warning,
                    format!("article {path} is no longer listed"),
                );
            }
        }
    }
    state.mark_dirty();
}

fn request_taxonomy_create(state: &mut AppState, name: String) -> Vec<Effect> {
    let Some(kind) = state.modal.as_ref().map(TaxonomyModal::kind) else {
        return Vec::new();
    };
    let Some(profile) = state.current_profile.as_ref().map(|p| p.name.clone()) else {
        return Vec::new();
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        state.notify(NoticeLevel::Warning, "enter a name for the new entry");
        return Vec::new();
    }
    vec![Effect::CreateTaxonomy {
        profile,
        kind,
        name,
    }]
}

fn start_batch(state: &mut AppState) -> Vec<Effect> {
    if state.is_publishing() {
        state.notify(NoticeLevel::Warning, "a publish batch is already running");
        return Vec::new();
    }
    let articles: Vec<_> = state.articles.selected().cloned().collect();
    if articles.is_empty() {
        state.notify(NoticeLevel::Warning, "select at least one article");
        return Vec::new();
    }
    let Some(profile) = state.current_profile.as_ref().map(|p| p.name.clone()) else {
        state.notify(NoticeLevel::Warning, "select a profile first");
        return Vec::new();
    };

    state.next_batch_id += 1;
    let batch_id = state.next_batch_id;
    state.batch = BatchState::Publishing {
        batch_id,
        total: articles.len(),
        completed: 0,
    };
    state.last_results.clear();
    state.mark_dirty();

    vec![Effect::PublishBatch(BatchRequest {
        batch_id,
        profile,
        articles,
        global_categories: state.global.get(TaxonomyKind::Categories).clone(),
        global_tags: state.global.get(TaxonomyKind::Tags).clone(),
    })]
}
