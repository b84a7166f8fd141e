use std::time::Duration;

use publisher_core::{
    FeaturedImage, FileDescriptor, NewProfile, Profile, TaxonomyEntity, TaxonomyKind,
};
use publisher_logging::{publisher_debug, publisher_warn};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ApiError, FailureKind, MediaId, PublishRequest, PublishedArticle};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// The publisher backend, as seen by the client.
///
/// Every call is a single attempt; failures come back as `ApiError` and are
/// never retried at this layer.
#[async_trait::async_trait]
pub trait PublisherApi: Send + Sync {
    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError>;

    async fn get_profile(&self, name: &str) -> Result<Profile, ApiError>;

    async fn create_profile(&self, profile: &NewProfile) -> Result<(), ApiError>;

    async fn delete_profile(&self, name: &str) -> Result<(), ApiError>;

    async fn test_connection(&self, name: &str) -> Result<(), ApiError>;

    async fn list_taxonomy(
        &self,
        profile: &str,
        kind: TaxonomyKind,
    ) -> Result<Vec<TaxonomyEntity>, ApiError>;

    /// Returns the created entity when the backend echoes it back.
    async fn create_taxonomy(
        &self,
        profile: &str,
        kind: TaxonomyKind,
        name: &str,
    ) -> Result<Option<TaxonomyEntity>, ApiError>;

    async fn list_files(&self) -> Result<Vec<FileDescriptor>, ApiError>;

    async fn current_directory(&self) -> Result<String, ApiError>;

    async fn set_directory(&self, directory: &str) -> Result<(), ApiError>;

    async fn upload_featured_image(
        &self,
        profile: &str,
        image: &FeaturedImage,
    ) -> Result<MediaId, ApiError>;

    async fn publish_article(
        &self,
        profile: &str,
        request: &PublishRequest,
    ) -> Result<PublishedArticle, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ProfileDto {
    name: String,
    url: String,
    username: String,
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        Profile {
            name: dto.name,
            url: dto.url,
            username: dto.username,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewProfileDto<'a> {
    name: &'a str,
    url: &'a str,
    username: &'a str,
    app_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TaxonomyDto {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct FileDto {
    name: String,
    path: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    modified: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryDto {
    directory: String,
}

#[derive(Debug, Deserialize)]
struct UploadDto {
    media_id: MediaId,
}

#[derive(Debug, Deserialize)]
struct PublishedDto {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorDto {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// `PublisherApi` over HTTP against the publisher backend's `/api` routes.
#[derive(Debug, Clone)]
pub struct ReqwestApi {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let err = error_from_body(status, &body);
            publisher_warn!("backend call failed: {} ({})", err.message, err.kind);
            return Err(err);
        }
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    async fn send_ignoring_body(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send_json::<serde_json::Value>(request).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl PublisherApi for ReqwestApi {
    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        let url = self.endpoint(&["profiles"]);
        let profiles: Vec<ProfileDto> = self.send_json(self.client.get(url)).await?;
        Ok(profiles.into_iter().map(Profile::from).collect())
    }

    async fn get_profile(&self, name: &str) -> Result<Profile, ApiError> {
        let url = self.endpoint(&["profiles", name]);
        let profile: ProfileDto = self.send_json(self.client.get(url)).await?;
        Ok(profile.into())
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<(), ApiError> {
        let url = self.endpoint(&["profiles"]);
        let body = NewProfileDto {
            name: &profile.name,
            url: &profile.url,
            username: &profile.username,
            app_password: &profile.app_password,
        };
        self.send_ignoring_body(self.client.post(url).json(&body)).await
    }

    async fn delete_profile(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["profiles", name]);
        self.send_ignoring_body(self.client.delete(url)).await
    }

    async fn test_connection(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["test-connection", name]);
        self.send_ignoring_body(self.client.get(url)).await
    }

    async fn list_taxonomy(
        &self,
        profile: &str,
        kind: TaxonomyKind,
    ) -> Result<Vec<TaxonomyEntity>, ApiError> {
        let url = self.endpoint(&[kind.label(), profile]);
        let entities: Vec<TaxonomyDto> = self.send_json(self.client.get(url)).await?;
        publisher_debug!("loaded {} {} for {}", entities.len(), kind, profile);
        Ok(entities
            .into_iter()
            .map(|dto| TaxonomyEntity::new(dto.id, dto.name))
            .collect())
    }

    async fn create_taxonomy(
        &self,
        profile: &str,
        kind: TaxonomyKind,
        name: &str,
    ) -> Result<Option<TaxonomyEntity>, ApiError> {
        let url = self.endpoint(&[kind.label(), profile]);
        let body = serde_json::json!({ "name": name });
        let created: serde_json::Value = self.send_json(self.client.post(url).json(&body)).await?;
        Ok(serde_json::from_value::<TaxonomyDto>(created)
            .ok()
            .map(|dto| TaxonomyEntity::new(dto.id, dto.name)))
    }

    async fn list_files(&self) -> Result<Vec<FileDescriptor>, ApiError> {
        let url = self.endpoint(&["files"]);
        let files: Vec<FileDto> = self.send_json(self.client.get(url)).await?;
        Ok(files
            .into_iter()
            .map(|dto| FileDescriptor {
                path: dto.path,
                name: dto.name,
                size: dto.size,
                modified: dto.modified,
            })
            .collect())
    }

    async fn current_directory(&self) -> Result<String, ApiError> {
        let url = self.endpoint(&["current-directory"]);
        let dto: DirectoryDto = self.send_json(self.client.get(url)).await?;
        Ok(dto.directory)
    }

    async fn set_directory(&self, directory: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["set-directory"]);
        let body = serde_json::json!({ "directory": directory });
        self.send_ignoring_body(self.client.post(url).json(&body)).await
    }

    async fn upload_featured_image(
        &self,
        profile: &str,
        image: &FeaturedImage,
    ) -> Result<MediaId, ApiError> {
        let url = self.endpoint(&["upload-image", profile]);
        let part = Part::bytes(image.bytes.clone()).file_name(image.filename.clone());
        let form = Form::new().part("file", part);
        let dto: UploadDto = self.send_json(self.client.post(url).multipart(form)).await?;
        Ok(dto.media_id)
    }

    async fn publish_article(
        &self,
        profile: &str,
        request: &PublishRequest,
    ) -> Result<PublishedArticle, ApiError> {
        let url = self.endpoint(&["publish", profile]);
        let dto: PublishedDto = self.send_json(self.client.post(url).json(request)).await?;
        Ok(PublishedArticle { url: dto.url })
    }
}

/// Uses the backend's `detail` when it has one, else `HTTP <code>`.
fn error_from_body(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = serde_json::from_slice::<ErrorDto>(body)
        .ok()
        .and_then(|dto| dto.detail)
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .filter(|text| !text.trim().is_empty());
    ApiError::new(
        FailureKind::HttpStatus(status.as_u16()),
        detail.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> ReqwestApi {
        ReqwestApi::new(&ApiSettings {
            base_url: base.to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_encodes_profile_names() {
        let api = api("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["categories", "my blog/A"]).as_str(),
            "http://localhost:8000/api/categories/my%20blog%2FA"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let api = api("http://localhost:8000/publisher/");
        assert_eq!(
            api.endpoint(&["files"]).as_str(),
            "http://localhost:8000/publisher/api/files"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ReqwestApi::new(&ApiSettings {
            base_url: "not a url".into(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn error_message_prefers_detail() {
        let err = error_from_body(StatusCode::BAD_REQUEST, br#"{"detail":"quota exceeded"}"#);
        assert_eq!(err.message, "quota exceeded");
        assert_eq!(err.kind, FailureKind::HttpStatus(400));

        let err = error_from_body(StatusCode::BAD_GATEWAY, b"<html>oops</html>");
        assert_eq!(err.message, "HTTP 502");
    }
}
