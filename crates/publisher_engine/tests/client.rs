use pretty_assertions::assert_eq;
use publisher_core::{FeaturedImage, NewProfile, Profile, TaxonomyEntity, TaxonomyKind};
use publisher_engine::{ApiSettings, FailureKind, PublishRequest, PublisherApi, ReqwestApi};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(&ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn lists_profiles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "blog-A", "url": "https://a.example", "username": "ann"},
            {"name": "blog-B", "url": "https://b.example", "username": "bob"}
        ])))
        .mount(&server)
        .await;

    let profiles = api_for(&server).list_profiles().await.unwrap();
    assert_eq!(
        profiles,
        vec![
            Profile {
                name: "blog-A".into(),
                url: "https://a.example".into(),
                username: "ann".into(),
            },
            Profile {
                name: "blog-B".into(),
                url: "https://b.example".into(),
                username: "bob".into(),
            },
        ]
    );
}

#[tokio::test]
async fn creates_profile_with_password_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/profiles"))
        .and(body_json(json!({
            "name": "blog-A",
            "url": "https://a.example",
            "username": "ann",
            "app_password": "xxxx yyyy"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let profile = NewProfile {
        name: "blog-A".into(),
        url: "https://a.example".into(),
        username: "ann".into(),
        app_password: "xxxx yyyy".into(),
    };
    api_for(&server).create_profile(&profile).await.unwrap();
}

#[tokio::test]
async fn lists_files_with_missing_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "a.md", "path": "/docs/a.md", "size": 1536, "modified": "2024-05-01 10:00"},
            {"name": "b.md", "path": "/docs/b.md"}
        ])))
        .mount(&server)
        .await;

    let files = api_for(&server).list_files().await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].size, 1536);
    assert_eq!(files[1].path, "/docs/b.md");
    assert_eq!(files[1].size, 0);
    assert_eq!(files[1].modified, "");
}

#[tokio::test]
async fn reads_and_sets_directory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/current-directory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"directory": "/docs"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/set-directory"))
        .and(body_json(json!({"directory": "/other"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"directory": "/other"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(api.current_directory().await.unwrap(), "/docs");
    api.set_directory("/other").await.unwrap();
}

#[tokio::test]
async fn taxonomy_routes_use_profile_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags/blog-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "name": "rust"},
            {"id": 9, "name": "async"}
        ])))
        .mount(&server)
        .await;

    let tags = api_for(&server)
        .list_taxonomy("blog-A", TaxonomyKind::Tags)
        .await
        .unwrap();
    assert_eq!(
        tags,
        vec![TaxonomyEntity::new(7, "rust"), TaxonomyEntity::new(9, "async")]
    );
}

#[tokio::test]
async fn create_taxonomy_returns_entity_when_echoed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/categories/blog-A"))
        .and(body_json(json!({"name": "News"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12, "name": "News"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tags/blog-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "created"})))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let created = api
        .create_taxonomy("blog-A", TaxonomyKind::Categories, "News")
        .await
        .unwrap();
    assert_eq!(created, Some(TaxonomyEntity::new(12, "News")));

    let created = api
        .create_taxonomy("blog-A", TaxonomyKind::Tags, "misc")
        .await
        .unwrap();
    assert_eq!(created, None);
}

#[tokio::test]
async fn uploads_image_as_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-image/blog-A"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"cover.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"media_id": 501})))
        .expect(1)
        .mount(&server)
        .await;

    let image = FeaturedImage {
        filename: "cover.png".into(),
        bytes: b"PNGDATA".to_vec(),
    };
    let media_id = api_for(&server)
        .upload_featured_image("blog-A", &image)
        .await
        .unwrap();
    assert_eq!(media_id, 501);
}

#[tokio::test]
async fn publish_sends_resolved_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/publish/blog-A"))
        .and(body_json(json!({
            "file_path": "/docs/a.md",
            "status": "publish",
            "categories": [3],
            "tags": [7, 9],
            "featured_media": 501
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://a.example/?p=42",
            "id": 42,
            "status": "publish"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PublishRequest {
        file_path: "/docs/a.md".into(),
        status: "publish".into(),
        categories: vec![3],
        tags: vec![7, 9],
        featured_media: Some(501),
    };
    let published = api_for(&server)
        .publish_article("blog-A", &request)
        .await
        .unwrap();
    assert_eq!(published.url, "https://a.example/?p=42");
}

#[tokio::test]
async fn backend_detail_becomes_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/publish/blog-A"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "quota exceeded"})))
        .mount(&server)
        .await;

    let request = PublishRequest {
        file_path: "/docs/b.md".into(),
        status: "draft".into(),
        categories: vec![],
        tags: vec![],
        featured_media: None,
    };
    let err = api_for(&server)
        .publish_article("blog-A", &request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.to_string(), "quota exceeded");
}

#[tokio::test]
async fn missing_profile_reports_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profiles/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api_for(&server).get_profile("ghost").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "HTTP 404");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_profiles().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}
