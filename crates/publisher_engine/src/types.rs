use std::fmt;

use publisher_core::{
    BatchId, FileDescriptor, Profile, PublishResult, RequestId, TaxonomyEntity, TaxonomyKind,
};
use serde::Serialize;

pub type MediaId = u64;

/// Categories and tags fetched together for one profile.
pub type CatalogLists = (Vec<TaxonomyEntity>, Vec<TaxonomyEntity>);

/// Body of a single-article publish call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishRequest {
    pub file_path: String,
    pub status: String,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub featured_media: Option<MediaId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArticle {
    pub url: String,
}

/// Emitted after each article of a batch has been attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    pub batch_id: BatchId,
    pub index: usize,
    pub total: usize,
    pub result: PublishResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProfilesLoaded(Result<Vec<Profile>, ApiError>),
    ProfileLoaded {
        name: String,
        result: Result<Profile, ApiError>,
    },
    ProfileCreated {
        name: String,
        result: Result<(), ApiError>,
    },
    ProfileDeleted {
        name: String,
        result: Result<(), ApiError>,
    },
    ConnectionTested {
        name: String,
        result: Result<(), ApiError>,
    },
    CatalogLoaded {
        profile: String,
        request: RequestId,
        result: Result<CatalogLists, ApiError>,
    },
    TaxonomyCreated {
        profile: String,
        kind: TaxonomyKind,
        result: Result<Option<TaxonomyEntity>, ApiError>,
    },
    DirectoryLoaded {
        request: RequestId,
        result: Result<String, ApiError>,
    },
    DirectoryChanged {
        directory: String,
        request: RequestId,
        result: Result<(), ApiError>,
    },
    FilesLoaded {
        request: RequestId,
        result: Result<Vec<FileDescriptor>, ApiError>,
    },
    BatchProgress(BatchProgress),
    BatchCompleted {
        batch_id: BatchId,
        results: Vec<PublishResult>,
    },
}

/// A failed collaborator call. `message` is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
