use std::time::Duration;

use publisher_core::{Effect, Msg};
use publisher_engine::{EngineEvent, EngineHandle};
use publisher_logging::{publisher_debug, publisher_info};

/// Hands `Effect`s to the engine and turns its events back into `Msg`s.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            publisher_debug!("effect {:?}", effect);
            match effect {
                Effect::LoadProfiles => self.engine.load_profiles(),
                Effect::LoadProfile { name } => self.engine.load_profile(name),
                Effect::CreateProfile(profile) => self.engine.create_profile(profile),
                Effect::DeleteProfile { name } => self.engine.delete_profile(name),
                Effect::TestConnection { name } => self.engine.test_connection(name),
                Effect::RefreshCatalog { profile, request } => {
                    self.engine.refresh_catalog(profile, request)
                }
                Effect::CreateTaxonomy {
                    profile,
                    kind,
                    name,
                } => self.engine.create_taxonomy(profile, kind, name),
                Effect::LoadDirectory { request } => self.engine.load_directory(request),
                Effect::SetDirectory { directory, request } => {
                    self.engine.set_directory(directory, request)
                }
                Effect::LoadFiles { request } => self.engine.load_files(request),
                Effect::PublishBatch(request) => {
                    publisher_info!(
                        "PublishBatch batch_id={} profile={} articles={}",
                        request.batch_id,
                        request.profile,
                        request.articles.len()
                    );
                    self.engine.publish_batch(request);
                }
                Effect::CancelBatch { batch_id } => self.engine.cancel_batch(batch_id),
            }
        }
    }

    pub fn try_next(&self) -> Option<Msg> {
        self.engine.try_recv().map(event_to_msg)
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProfilesLoaded(result) => {
            Msg::ProfilesLoaded(result.map_err(|e| e.to_string()))
        }
        EngineEvent::ProfileLoaded { name, result } => Msg::ProfileLoaded {
            name,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::ProfileCreated { name, result } => Msg::ProfileCreated {
            name,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::ProfileDeleted { name, result } => Msg::ProfileDeleted {
            name,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::ConnectionTested { name, result } => Msg::ConnectionTested {
            name,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::CatalogLoaded {
            profile,
            request,
            result,
        } => Msg::CatalogLoaded {
            profile,
            request,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::TaxonomyCreated {
            profile,
            kind,
            result,
        } => Msg::TaxonomyCreated {
            profile,
            kind,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::DirectoryLoaded { request, result } => Msg::DirectoryLoaded {
            request,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::DirectoryChanged {
            directory,
            request,
            result,
        } => Msg::DirectoryChanged {
            request,
            result: result.map(|()| directory).map_err(|e| e.to_string()),
        },
        EngineEvent::FilesLoaded { request, result } => Msg::FilesLoaded {
            request,
            result: result.map_err(|e| e.to_string()),
        },
        EngineEvent::BatchProgress(progress) => Msg::PublishProgress {
            batch_id: progress.batch_id,
            index: progress.index,
            total: progress.total,
            result: progress.result,
        },
        EngineEvent::BatchCompleted { batch_id, results } => {
            Msg::PublishFinished { batch_id, results }
        }
    }
}
