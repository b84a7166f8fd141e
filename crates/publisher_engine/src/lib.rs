//! Publisher engine: backend client, catalog refresh and batch publishing.
mod catalog;
mod client;
mod engine;
mod orchestrator;
mod persist;
mod types;

pub use catalog::refresh_catalog;
pub use client::{ApiSettings, PublisherApi, ReqwestApi};
pub use engine::EngineHandle;
pub use orchestrator::{publish_batch, BatchSettings, ProgressSink};
pub use persist::{read_optional, write_atomic, PersistError};
pub use types::{
    ApiError, BatchProgress, CatalogLists, EngineEvent, FailureKind, MediaId, PublishRequest,
    PublishedArticle,
};
