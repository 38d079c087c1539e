//! HTTP client behavior against a mock content server.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use odsgrid::api::{ApiClient, ApiError};
use odsgrid::model::{Credentials, NewSection};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn sections_accept_numeric_ids_and_null_images() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Hambre cero", "image": "FaLeaf", "odsId": 2 },
            { "id": "a1", "name": "Otra", "image": null }
        ])))
        .mount(&server)
        .await;

    let sections = client_for(&server).await.get_sections().await.unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].id, "3");
    assert_eq!(sections[0].ods_id, Some(2));
    assert_eq!(sections[1].image, "");
    assert_eq!(sections[1].ods_id, None);
}

#[tokio::test]
async fn login_posts_credentials_and_returns_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "admin@ods.org", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "user": { "id": 1, "email": "admin@ods.org", "role": "admin" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .await
        .login(&Credentials {
            email: "admin@ods.org".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(session.token, "abc");
    assert!(session.is_admin());
}

#[tokio::test]
async fn writes_send_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sections"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({ "name": "Vida submarina", "image": "FaFish", "odsId": 14 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let data = NewSection {
        name: "Vida submarina".into(),
        image: "FaFish".into(),
        ods_id: 14,
    };
    client_for(&server)
        .await
        .create_section(&data, Some("tok"))
        .await
        .unwrap();
}

#[tokio::test]
async fn error_status_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/projects/9"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "acceso denegado" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .delete_project("9", Some("tok"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), "acceso denegado");
    assert!(matches!(err, ApiError::Status { .. }));
}

#[tokio::test]
async fn impact_ids_may_be_strings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/7/impact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "4", "project_id": "7", "title": "Familias", "description": "120" }
        ])))
        .mount(&server)
        .await;

    let items = client_for(&server).await.get_impact(7).await.unwrap();
    assert_eq!(items[0].id, Some(4));
    assert_eq!(items[0].project_id, 7);
    assert_eq!(items[0].image_url, None);
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl { .. }));
}
