use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use extract_client::{ExtractClient, ExtractError, ExtractionRequest, FieldPayload, SchemaPayload};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Seen {
    auth: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn invoice_request() -> ExtractionRequest {
    ExtractionRequest {
        file_content: "JVBERi0=".into(),
        extraction_schema: SchemaPayload {
            fields: vec![FieldPayload {
                name: "total".into(),
                field_type: "number".into(),
                description: "grand total".into(),
                children: vec![],
            }],
        },
        document_description: "invoice".into(),
        file_extension: ".pdf".into(),
    }
}

#[tokio::test]
async fn sends_bearer_token_and_schema() {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/api/v1/extract",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                *seen.auth.lock().unwrap() = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *seen.body.lock().unwrap() = Some(body);
                Json(json!({ "total": 42.5 }))
            }),
        )
        .with_state(seen.clone());
    let base = spawn(app).await;

    // Trailing slash must not produce a double slash in the path.
    let client = ExtractClient::new(format!("{}/", base), "s3cret");
    let result = client.extract(&invoice_request()).await.unwrap();

    assert_eq!(result, json!({ "total": 42.5 }));
    assert_eq!(seen.auth.lock().unwrap().as_deref(), Some("Bearer s3cret"));

    let body = seen.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["file_extension"], ".pdf");
    assert_eq!(body["document_description"], "invoice");
    assert_eq!(
        body["extraction_schema"]["fields"],
        json!([{ "name": "total", "type": "number", "description": "grand total", "children": [] }])
    );
}

#[tokio::test]
async fn surfaces_message_from_error_body() {
    let app = Router::new().route(
        "/api/v1/extract",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Unsupported file type" })),
            )
        }),
    );
    let base = spawn(app).await;

    let err = ExtractClient::new(base, "t")
        .extract(&invoice_request())
        .await
        .unwrap_err();

    match &err {
        ExtractError::Api { status, message } => {
            assert_eq!(*status, 422);
            assert_eq!(message, "Unsupported file type");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Unsupported file type");
}

#[tokio::test]
async fn falls_back_to_generic_message() {
    let app = Router::new().route(
        "/api/v1/extract",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn(app).await;

    let err = ExtractClient::new(base, "t")
        .extract(&invoice_request())
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Api { status: 500, .. }));
    assert_eq!(err.user_message(), "Failed to extract data");
}
