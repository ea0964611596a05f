//! End-to-end session tests against a local stand-in for the extraction API.
//!
//! Covers:
//! 1. Pick a saved template
//! 2. Upload documents
//! 3. Convert through the real HTTP client
//! 4. Export the result

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use extract_client::ExtractClient;
use extraction_studio::{
    ConvertTarget, ExtractionSchema, ExtractionSession, FieldNode, FieldType, MemoryStore,
    StudioError, TemplateSelector, TemplateStore, UploadedFile,
};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct FakeApi {
    requests: Arc<Mutex<Vec<Value>>>,
    fail_on: Option<usize>,
}

async fn extract(State(api): State<FakeApi>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut requests = api.requests.lock().unwrap();
    requests.push(body.clone());
    let n = requests.len();

    if api.fail_on == Some(n) {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "message": "upstream model unavailable" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "call": n, "extension": body["file_extension"] })),
    )
}

/// Spawn the fake API and return its base URL.
async fn spawn_api(api: FakeApi) -> String {
    let app = Router::new()
        .route("/api/v1/extract", post(extract))
        .with_state(api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn invoice_schema() -> ExtractionSchema {
    ExtractionSchema::new(vec![FieldNode::new("total", FieldType::Number, "grand total")])
}

#[tokio::test]
async fn test_template_to_csv() {
    let api = FakeApi::default();
    let base = spawn_api(api.clone()).await;

    let store = MemoryStore::new();
    let template = store.insert_template("invoice", &invoice_schema()).await.unwrap();

    let mut selector = TemplateSelector::new();
    selector.refresh(&store).await.unwrap();
    let selected = selector.select(template.template_id).unwrap();

    let mut session = ExtractionSession::new(ExtractClient::new(base, "token"));
    session.apply_template(&selected);
    session.upload([UploadedFile::new("report.pdf", b"%PDF-1.7".to_vec())]);

    let result = session.convert(ConvertTarget::Selected).await.unwrap().clone();
    assert_eq!(result, json!({ "call": 1, "extension": ".pdf" }));

    let requests = api.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["document_description"], "invoice");
    assert_eq!(
        requests[0]["extraction_schema"]["fields"],
        json!([{ "name": "total", "type": "number", "description": "grand total", "children": [] }])
    );

    let csv = session.to_csv().unwrap();
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["call,extension", r#""1",".pdf""#]);
}

#[tokio::test]
async fn test_convert_all_is_sequential_and_last_wins() {
    let api = FakeApi::default();
    let base = spawn_api(api.clone()).await;

    let mut session = ExtractionSession::new(ExtractClient::new(base, "token"));
    session.editor_mut().load(invoice_schema());
    session.upload([
        UploadedFile::new("a.pdf", vec![1]),
        UploadedFile::new("b.PNG", vec![2]),
        UploadedFile::new("c.jpg", vec![3]),
    ]);

    session.convert(ConvertTarget::All).await.unwrap();

    assert_eq!(session.result(), Some(&json!({ "call": 3, "extension": ".jpg" })));
    let extensions: Vec<Value> = api
        .requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| r["file_extension"].clone())
        .collect();
    assert_eq!(extensions, vec![json!(".pdf"), json!(".png"), json!(".jpg")]);
}

#[tokio::test]
async fn test_api_failure_surfaces_message_and_stops() {
    let api = FakeApi {
        fail_on: Some(2),
        ..Default::default()
    };
    let base = spawn_api(api.clone()).await;

    let mut session = ExtractionSession::new(ExtractClient::new(base, "token"));
    session.editor_mut().load(invoice_schema());
    session.upload(["a.pdf", "b.pdf", "c.pdf"].map(|n| UploadedFile::new(n, vec![0])));

    let err = session.convert(ConvertTarget::All).await.unwrap_err();

    match err {
        StudioError::Extract(e) => assert_eq!(e.user_message(), "upstream model unavailable"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(api.requests.lock().unwrap().len(), 2);
    assert_eq!(session.result(), Some(&json!({ "call": 1, "extension": ".pdf" })));
}
