#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use publisher_core::{
    ArticleRecord, ArticleStatus, FeaturedImage, FileDescriptor, IdSet, NewProfile, Profile,
    TaxonomyEntity, TaxonomyKind,
};
use publisher_engine::{
    ApiError, BatchProgress, FailureKind, MediaId, ProgressSink, PublishRequest, PublishedArticle,
    PublisherApi,
};

/// In-memory backend that records every call it receives.
#[derive(Default)]
pub struct ScriptedApi {
    pub calls: Mutex<Vec<String>>,
    pub published: Mutex<Vec<PublishRequest>>,
    pub upload_failures: HashMap<String, String>,
    pub publish_failures: HashMap<String, String>,
    pub publish_delay: Option<Duration>,
    pub taxonomy_failure: Option<TaxonomyKind>,
}

impl ScriptedApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn published(&self) -> Vec<PublishRequest> {
        self.published.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl PublisherApi for ScriptedApi {
    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        self.record("list_profiles".into());
        Ok(vec![Profile {
            name: "blog-A".into(),
            url: "https://a.example".into(),
            username: "ann".into(),
        }])
    }

    async fn get_profile(&self, name: &str) -> Result<Profile, ApiError> {
        self.record(format!("get_profile {name}"));
        Ok(Profile {
            name: name.into(),
            url: "https://a.example".into(),
            username: "ann".into(),
        })
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<(), ApiError> {
        self.record(format!("create_profile {}", profile.name));
        Ok(())
    }

    async fn delete_profile(&self, name: &str) -> Result<(), ApiError> {
        self.record(format!("delete_profile {name}"));
        Ok(())
    }

    async fn test_connection(&self, name: &str) -> Result<(), ApiError> {
        self.record(format!("test_connection {name}"));
        Err(ApiError::new(FailureKind::HttpStatus(401), "bad credentials"))
    }

    async fn list_taxonomy(
        &self,
        profile: &str,
        kind: TaxonomyKind,
    ) -> Result<Vec<TaxonomyEntity>, ApiError> {
        self.record(format!("list_taxonomy {profile} {kind}"));
        if self.taxonomy_failure == Some(kind) {
            return Err(ApiError::new(FailureKind::HttpStatus(502), "HTTP 502"));
        }
        Ok(match kind {
            TaxonomyKind::Categories => vec![
                TaxonomyEntity::new(1, "News"),
                TaxonomyEntity::new(2, "Tech"),
                TaxonomyEntity::new(3, "Life"),
            ],
            TaxonomyKind::Tags => vec![
                TaxonomyEntity::new(7, "rust"),
                TaxonomyEntity::new(9, "async"),
            ],
        })
    }

    async fn create_taxonomy(
        &self,
        profile: &str,
        kind: TaxonomyKind,
        name: &str,
    ) -> Result<Option<TaxonomyEntity>, ApiError> {
        self.record(format!("create_taxonomy {profile} {kind} {name}"));
        Ok(Some(TaxonomyEntity::new(100, name)))
    }

    async fn list_files(&self) -> Result<Vec<FileDescriptor>, ApiError> {
        self.record("list_files".into());
        Ok(Vec::new())
    }

    async fn current_directory(&self) -> Result<String, ApiError> {
        self.record("current_directory".into());
        Ok("/docs".into())
    }

    async fn set_directory(&self, directory: &str) -> Result<(), ApiError> {
        self.record(format!("set_directory {directory}"));
        Ok(())
    }

    async fn upload_featured_image(
        &self,
        _profile: &str,
        image: &FeaturedImage,
    ) -> Result<MediaId, ApiError> {
        self.record(format!("upload {}", image.filename));
        match self.upload_failures.get(&image.filename) {
            Some(message) => Err(ApiError::new(FailureKind::HttpStatus(413), message.clone())),
            None => Ok(500 + image.bytes.len() as MediaId),
        }
    }

    async fn publish_article(
        &self,
        _profile: &str,
        request: &PublishRequest,
    ) -> Result<PublishedArticle, ApiError> {
        self.record(format!("publish {}", request.file_path));
        if let Some(delay) = self.publish_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.publish_failures.get(&request.file_path) {
            return Err(ApiError::new(FailureKind::HttpStatus(500), message.clone()));
        }
        self.published.lock().unwrap().push(request.clone());
        Ok(PublishedArticle {
            url: format!("https://a.example{}", request.file_path),
        })
    }
}

#[derive(Default, Clone)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<BatchProgress>>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<BatchProgress> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, progress: BatchProgress) {
        self.events.lock().unwrap().push(progress);
    }
}

pub fn article(name: &str) -> ArticleRecord {
    let mut record = ArticleRecord::from_descriptor(FileDescriptor {
        path: format!("/docs/{name}"),
        name: name.into(),
        size: 10,
        modified: String::new(),
    });
    record.selected = true;
    record
}

pub fn with_image(mut record: ArticleRecord, filename: &str) -> ArticleRecord {
    record.featured_image = Some(FeaturedImage {
        filename: filename.into(),
        bytes: vec![0; 4],
    });
    record
}

pub fn with_status(mut record: ArticleRecord, status: ArticleStatus) -> ArticleRecord {
    record.status = status;
    record
}

pub fn ids(values: &[u64]) -> IdSet {
    values.iter().copied().collect()
}
