use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use publisher_core::{BatchId, BatchRequest, NewProfile, RequestId, TaxonomyKind};
use publisher_logging::{publisher_debug, publisher_info};
use tokio_util::sync::CancellationToken;

use crate::catalog::{refresh_catalog, with_timeout};
use crate::orchestrator::{publish_batch, BatchSettings, ProgressSink};
use crate::{BatchProgress, EngineEvent, PublisherApi};

enum EngineCommand {
    Call(ApiCall),
    PublishBatch(BatchRequest),
    CancelBatch { batch_id: BatchId },
}

/// Single backend round trips, each answered by exactly one event.
///
/// A `request` is echoed back unchanged in the answering event.
enum ApiCall {
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
}

type BatchTokens = Arc<Mutex<HashMap<BatchId, CancellationToken>>>;

/// Runs collaborator calls on a background tokio runtime.
///
/// Commands go in through the handle's methods; completions come back as
/// `EngineEvent`s to be turned into messages by the caller's update loop.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn PublisherApi>, settings: BatchSettings) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("publisher-engine".to_string())
            .spawn(move || {
                let tokens: BatchTokens = Arc::default();
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::CancelBatch { batch_id } => cancel(&tokens, batch_id),
                        EngineCommand::PublishBatch(request) => {
                            let token = CancellationToken::new();
                            if let Ok(mut guard) = tokens.lock() {
                                guard.insert(request.batch_id, token.clone());
                            }
                            let api = api.clone();
                            let settings = settings.clone();
                            let tokens = tokens.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let sink = ChannelProgressSink::new(event_tx.clone());
                                let results =
                                    publish_batch(api.as_ref(), &request, &settings, &token, &sink)
                                        .await;
                                if let Ok(mut guard) = tokens.lock() {
                                    guard.remove(&request.batch_id);
                                }
                                let _ = event_tx.send(EngineEvent::BatchCompleted {
                                    batch_id: request.batch_id,
                                    results,
                                });
                            });
                        }
                        EngineCommand::Call(call) => {
                            let api = api.clone();
                            let event_tx = event_tx.clone();
                            let call_timeout = settings.call_timeout;
                            runtime.spawn(async move {
                                let event = handle_call(api.as_ref(), call, call_timeout).await;
                                let _ = event_tx.send(event);
                            });
                        }
                    }
                }
                publisher_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_profiles(&self) {
        self.call(ApiCall::LoadProfiles);
    }

    pub fn load_profile(&self, name: impl Into<String>) {
        self.call(ApiCall::LoadProfile { name: name.into() });
    }

    pub fn create_profile(&self, profile: NewProfile) {
        self.call(ApiCall::CreateProfile(profile));
    }

    pub fn delete_profile(&self, name: impl Into<String>) {
        self.call(ApiCall::DeleteProfile { name: name.into() });
    }

    pub fn test_connection(&self, name: impl Into<String>) {
        self.call(ApiCall::TestConnection { name: name.into() });
    }

    pub fn refresh_catalog(&self, profile: impl Into<String>, request: RequestId) {
        self.call(ApiCall::RefreshCatalog {
            profile: profile.into(),
            request,
        });
    }

    pub fn create_taxonomy(
        &self,
        profile: impl Into<String>,
        kind: TaxonomyKind,
        name: impl Into<String>,
    ) {
        self.call(ApiCall::CreateTaxonomy {
            profile: profile.into(),
            kind,
            name: name.into(),
        });
    }

    pub fn load_directory(&self, request: RequestId) {
        self.call(ApiCall::LoadDirectory { request });
    }

    pub fn set_directory(&self, directory: impl Into<String>, request: RequestId) {
        self.call(ApiCall::SetDirectory {
            directory: directory.into(),
            request,
        });
    }

    pub fn load_files(&self, request: RequestId) {
        self.call(ApiCall::LoadFiles { request });
    }

    pub fn publish_batch(&self, request: BatchRequest) {
        publisher_info!(
            "queueing batch {} ({} articles)",
            request.batch_id,
            request.articles.len()
        );
        self.send(EngineCommand::PublishBatch(request));
    }

    /// Stops the batch before its next article. The running call completes.
    pub fn cancel_batch(&self, batch_id: BatchId) {
        self.send(EngineCommand::CancelBatch { batch_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn call(&self, call: ApiCall) {
        self.send(EngineCommand::Call(call));
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

fn cancel(tokens: &BatchTokens, batch_id: BatchId) {
    if let Ok(guard) = tokens.lock() {
        if let Some(token) = guard.get(&batch_id) {
            publisher_info!("cancelling batch {}", batch_id);
            token.cancel();
        }
    }
}

async fn handle_call(
    api: &dyn PublisherApi,
    call: ApiCall,
    call_timeout: Option<Duration>,
) -> EngineEvent {
    match call {
        ApiCall::LoadProfiles => {
            EngineEvent::ProfilesLoaded(with_timeout(call_timeout, api.list_profiles()).await)
        }
        ApiCall::LoadProfile { name } => {
            let result = with_timeout(call_timeout, api.get_profile(&name)).await;
            EngineEvent::ProfileLoaded { name, result }
        }
        ApiCall::CreateProfile(profile) => {
            let result = with_timeout(call_timeout, api.create_profile(&profile)).await;
            EngineEvent::ProfileCreated {
                name: profile.name,
                result,
            }
        }
        ApiCall::DeleteProfile { name } => {
            let result = with_timeout(call_timeout, api.delete_profile(&name)).await;
            EngineEvent::ProfileDeleted { name, result }
        }
        ApiCall::TestConnection { name } => {
            let result = with_timeout(call_timeout, api.test_connection(&name)).await;
            EngineEvent::ConnectionTested { name, result }
        }
        ApiCall::RefreshCatalog { profile, request } => {
            let result = refresh_catalog(api, &profile, call_timeout).await;
            EngineEvent::CatalogLoaded {
                profile,
                request,
                result,
            }
        }
        ApiCall::CreateTaxonomy {
            profile,
            kind,
            name,
        } => {
            let result =
                with_timeout(call_timeout, api.create_taxonomy(&profile, kind, &name)).await;
            EngineEvent::TaxonomyCreated {
                profile,
                kind,
                result,
            }
        }
        ApiCall::LoadDirectory { request } => EngineEvent::DirectoryLoaded {
            request,
            result: with_timeout(call_timeout, api.current_directory()).await,
        },
        ApiCall::SetDirectory { directory, request } => {
            let result = with_timeout(call_timeout, api.set_directory(&directory)).await;
            EngineEvent::DirectoryChanged {
                directory,
                request,
                result,
            }
        }
        ApiCall::LoadFiles { request } => EngineEvent::FilesLoaded {
            request,
            result: with_timeout(call_timeout, api.list_files()).await,
        },
    }
}

struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, progress: BatchProgress) {
        let _ = self.tx.send(EngineEvent::BatchProgress(progress));
    }
}
