//! HTTP API tests
//!
//! Drive the full router with `tower::ServiceExt::oneshot`, backed by the
//! in-memory claim store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use core_kernel::ClaimId;
use domain_claims::{ClaimStatus, ClaimStore, ClaimWorkflowService, InMemoryClaimStore};
use interface_api::{config::ApiConfig, create_router};
use test_utils::{ClaimFixtures, FailingClaimStore};

const BOUNDARY: &str = "claims-test-boundary";

fn app_with_store(store: Arc<dyn ClaimStore>, config: ApiConfig) -> Router {
    let policy = config.document_policy().unwrap();
    let service = ClaimWorkflowService::with_policy(store, policy);
    create_router(service, config)
}

fn app() -> (Router, InMemoryClaimStore) {
    let store = InMemoryClaimStore::new();
    (app_with_store(Arc::new(store.clone()), ApiConfig::default()), store)
}

fn seeded_app(claims: Vec<domain_claims::Claim>) -> (Router, InMemoryClaimStore) {
    let store = InMemoryClaimStore::with_claims(claims);
    (app_with_store(Arc::new(store.clone()), ApiConfig::default()), store)
}

/// Builds a multipart body from text fields and an optional file part
fn multipart_body(fields: &[(&str, &str)], document: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((file_name, content)) = document {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"document\"; filename=\"{}\"\r\n",
                file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("lecturer_name", "John Doe"),
        ("notes", "Some notes"),
        ("hours_worked", "10"),
        ("hourly_rate", "20"),
    ]
}

fn submit_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/claims")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = app();
        let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_with_memory_store() {
        let (app, _) = app();
        let (status, body) = send(&app, empty_request(Method::GET, "/health/ready")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn test_readiness_fails_when_store_unhealthy() {
        let app = app_with_store(Arc::new(FailingClaimStore), ApiConfig::default());
        let (status, _) = send(&app, empty_request(Method::GET, "/health/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}

mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn test_form_describes_document_rules() {
        let (app, _) = app();
        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/claims/form")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document_field"], "document");
        assert_eq!(
            body["allowed_extensions"],
            serde_json::json!([".pdf", ".docx", ".xlsx"])
        );
        assert_eq!(body["max_document_bytes"], 5 * 1024 * 1024);
    }

    #[tokio::test]
    async fn test_valid_submission_is_created_pending() {
        let (app, store) = app();
        let body = multipart_body(&valid_fields(), Some(("sample.pdf", b"%PDF-1.4 content")));

        let (status, body) = send(&app, submit_request(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["status"], "Pending");
        assert_eq!(body["lecturer_name"], "John Doe");
        assert_eq!(body["supporting_document_path"], "/uploads/sample.pdf");
        assert_eq!(body["total_amount"], "200");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_extension_is_rejected_with_field_error() {
        let (app, store) = app();
        let body = multipart_body(&valid_fields(), Some(("invalid.txt", b"plain text")));

        let (status, body) = send(&app, submit_request(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert!(!body["details"]["document"].as_array().unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_oversized_document_is_rejected() {
        let store = InMemoryClaimStore::new();
        let config = ApiConfig {
            max_document_bytes: 8,
            ..ApiConfig::default()
        };
        let app = app_with_store(Arc::new(store.clone()), config);
        let body = multipart_body(&valid_fields(), Some(("big.pdf", b"0123456789")));

        let (status, body) = send(&app, submit_request(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let messages = body["details"]["document"].as_array().unwrap();
        assert!(messages[0].as_str().unwrap().contains("exceeds"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_body_over_request_limit_is_payload_too_large() {
        let store = InMemoryClaimStore::new();
        let config = ApiConfig {
            max_document_bytes: 8,
            ..ApiConfig::default()
        };
        let limit = config.request_body_limit();
        let app = app_with_store(Arc::new(store.clone()), config);
        let content = vec![b'x'; limit + 1];
        let body = multipart_body(&valid_fields(), Some(("huge.pdf", content.as_slice())));

        let (status, body) = send(&app, submit_request(body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "payload_too_large");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_document_and_fields_reported_together() {
        let (app, store) = app();
        let body = multipart_body(&[("hours_worked", "-3"), ("hourly_rate", "abc")], None);

        let (status, body) = send(&app, submit_request(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let details = &body["details"];
        assert!(details["document"].is_array());
        assert!(details["lecturer_name"].is_array());
        assert!(details["notes"].is_array());
        assert!(details["hours_worked"].is_array());
        assert!(details["hourly_rate"].is_array());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_bad_request() {
        let (app, _) = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/claims")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_list_excludes_decided_claims() {
        let (app, _) = seeded_app(vec![
            ClaimFixtures::pending(1),
            ClaimFixtures::stored(2, ClaimStatus::Approved),
            ClaimFixtures::pending(3),
        ]);

        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/claims/pending")).await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let (app, _) = seeded_app(vec![
            ClaimFixtures::pending(1),
            ClaimFixtures::stored(2, ClaimStatus::Rejected),
        ]);

        let (_, all) = send(&app, empty_request(Method::GET, "/api/v1/claims")).await;
        let (_, rejected) =
            send(&app, empty_request(Method::GET, "/api/v1/claims?status=rejected")).await;

        assert_eq!(all.as_array().unwrap().len(), 2);
        assert_eq!(rejected.as_array().unwrap().len(), 1);
        assert_eq!(rejected[0]["id"], 2);
    }

    #[tokio::test]
    async fn test_unknown_status_filter_is_bad_request() {
        let (app, _) = app();
        let (status, _) =
            send(&app, empty_request(Method::GET, "/api/v1/claims?status=archived")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_claim_is_not_found() {
        let (app, _) = app();
        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/claims/42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_store_failure_is_service_unavailable() {
        let app = app_with_store(Arc::new(FailingClaimStore), ApiConfig::default());
        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/claims/pending")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "unavailable");
    }
}

mod decision_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_pending_claim() {
        let (app, store) = seeded_app(vec![ClaimFixtures::pending(1)]);

        let (status, body) =
            send(&app, empty_request(Method::POST, "/api/v1/claims/1/approve")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Approved");
        let stored = store.find_by_id(ClaimId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.status, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_reject_pending_claim() {
        let (app, _) = seeded_app(vec![ClaimFixtures::pending(1)]);

        let (status, body) =
            send(&app, empty_request(Method::POST, "/api/v1/claims/1/reject")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Rejected");
    }

    #[tokio::test]
    async fn test_repeat_approval_is_accepted() {
        let (app, _) = seeded_app(vec![ClaimFixtures::stored(1, ClaimStatus::Approved)]);

        let (status, body) =
            send(&app, empty_request(Method::POST, "/api/v1/claims/1/approve")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Approved");
    }

    #[tokio::test]
    async fn test_rejecting_approved_claim_conflicts() {
        let (app, _) = seeded_app(vec![ClaimFixtures::stored(1, ClaimStatus::Approved)]);

        let (status, body) =
            send(&app, empty_request(Method::POST, "/api/v1/claims/1/reject")).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn test_approve_unknown_claim_is_not_found() {
        let (app, _) = app();
        let (status, _) =
            send(&app, empty_request(Method::POST, "/api/v1/claims/99/approve")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let (app, _) = app();
        let response = app
            .oneshot(empty_request(Method::POST, "/api/v1/claims/abc/approve"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_removes_claim_and_is_repeatable() {
        let (app, store) = seeded_app(vec![ClaimFixtures::pending(1), ClaimFixtures::pending(2)]);

        let (first, _) = send(&app, empty_request(Method::DELETE, "/api/v1/claims/1")).await;
        let (second, _) = send(&app, empty_request(Method::DELETE, "/api/v1/claims/1")).await;
        let (lookup, _) = send(&app, empty_request(Method::GET, "/api/v1/claims/1")).await;

        assert_eq!(first, StatusCode::NO_CONTENT);
        assert_eq!(second, StatusCode::NO_CONTENT);
        assert_eq!(lookup, StatusCode::NOT_FOUND);
        assert_eq!(store.len().await, 1);
    }
}

mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_review_and_delete() {
        let (app, _) = app();

        for name in ["first.pdf", "second.docx"] {
            let body = multipart_body(&valid_fields(), Some((name, b"content")));
            let (status, _) = send(&app, submit_request(body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, pending) = send(&app, empty_request(Method::GET, "/api/v1/claims/pending")).await;
        assert_eq!(pending.as_array().unwrap().len(), 2);

        let (status, _) = send(&app, empty_request(Method::POST, "/api/v1/claims/1/approve")).await;
        assert_eq!(status, StatusCode::OK);

        let (_, pending) = send(&app, empty_request(Method::GET, "/api/v1/claims/pending")).await;
        assert_eq!(pending.as_array().unwrap().len(), 1);
        assert_eq!(pending[0]["id"], 2);

        let (status, _) = send(&app, empty_request(Method::DELETE, "/api/v1/claims/2")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, all) = send(&app, empty_request(Method::GET, "/api/v1/claims")).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
        assert_eq!(all[0]["status"], "Approved");
    }
}

mod id_tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_id_after_max_supplied_id_conflicts() {
        let (app, store) = app();
        let max_id = i64::MAX.to_string();
        let mut fields = valid_fields();
        fields.push(("id", max_id.as_str()));

        let (first, body) = send(
            &app,
            submit_request(multipart_body(&fields, Some(("a.pdf", b"content")))),
        )
        .await;
        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(body["id"], i64::MAX);

        let (second, body) = send(
            &app,
            submit_request(multipart_body(&valid_fields(), Some(("b.pdf", b"content")))),
        )
        .await;

        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
        assert_eq!(store.len().await, 1);
    }
}
