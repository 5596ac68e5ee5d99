use super::*;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::PaperNumber,
    protocol::{PaperEntry, QuestionMetadata, SearchResult},
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct BackendState {
    searches: Arc<Mutex<Vec<SearchRequest>>>,
}

async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn handle_search(
    State(state): State<BackendState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    state
        .searches
        .lock()
        .expect("searches lock")
        .push(request.clone());
    if request.query == "explode" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "index unavailable" })),
        )
            .into_response();
    }
    Json(SearchResponse {
        query: request.query,
        total_found: 1,
        results: vec![SearchResult {
            similarity_score: 0.73,
            semantic_score: Some(0.7),
            keyword_score: Some(0.8),
            metadata: QuestionMetadata {
                year: Year::from("2019"),
                paper: PaperNumber::from("1"),
                question_number: 2,
                page_number: Some(4),
                filename: None,
            },
            question: "Prove by induction".to_string(),
        }],
    })
    .into_response()
}

async fn handle_lookup(Path((year, question)): Path<(String, u32)>) -> impl IntoResponse {
    if year == "1999" {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Marking scheme not found" })),
        )
            .into_response();
    }
    if question == 3 {
        return Json(serde_json::json!({
            "found": true,
            "page": 11,
            "year": year,
            "question_number": question,
            "matched_text": "Q3",
            "content_type": "solution"
        }))
        .into_response();
    }
    Json(serde_json::json!({
        "found": false,
        "page": 1,
        "message": format!("Question {question} not found, showing first page")
    }))
    .into_response()
}

async fn handle_pdf(Path((year, paper, page)): Path<(String, String, u32)>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        format!("%PDF-{year}-{paper}-{page}").into_bytes(),
    )
}

async fn backend() -> (String, BackendState) {
    let state = BackendState::default();
    let app = Router::new()
        .route(
            "/api/status",
            get(|| async { Json(serde_json::json!({ "is_processing": false, "status": "Ready", "ready": true })) }),
        )
        .route("/api/search", post(handle_search))
        .route(
            "/api/papers",
            get(|| async {
                Json(serde_json::json!([
                    { "year": "2020", "papers": [{ "paper": "1", "filename": "2020-paper1.pdf" }], "has_marking_scheme": true },
                    { "year": 2019, "papers": [{ "paper": 2 }], "has_marking_scheme": false }
                ]))
            }),
        )
        .route("/api/markingscheme/:year/question/:question", get(handle_lookup))
        .route("/api/pdf/:year/:paper/:page", get(handle_pdf))
        .route(
            "/api/pdf/:year/:paper",
            get(|| async { (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "PDF not found" }))) }),
        )
        .route("/api/broken", get(|| async { "not json" }))
        .with_state(state.clone());
    (spawn_backend(app).await, state)
}

#[tokio::test]
async fn status_reports_readiness() {
    let (url, _) = backend().await;
    let api = HttpPaperApi::new(&url).expect("api");
    let status = api.status().await.expect("status");
    assert!(status.ready);
    assert_eq!(status.status, "Ready");
}

#[tokio::test]
async fn search_posts_query_and_result_count() {
    let (url, state) = backend().await;
    let api = HttpPaperApi::new(&url).expect("api");

    let response = api
        .search(&SearchRequest {
            query: "induction".to_string(),
            num_results: 10,
        })
        .await
        .expect("search");
    assert_eq!(response.total_found, 1);
    assert_eq!(response.results[0].metadata.page_number, Some(4));

    let searches = state.searches.lock().expect("searches lock");
    assert_eq!(
        searches.as_slice(),
        &[SearchRequest {
            query: "induction".to_string(),
            num_results: 10,
        }]
    );
}

#[tokio::test]
async fn search_error_body_is_surfaced() {
    let (url, _) = backend().await;
    let api = HttpPaperApi::new(&url).expect("api");
    let err = api
        .search(&SearchRequest {
            query: "explode".to_string(),
            num_results: 5,
        })
        .await
        .expect_err("server error");
    assert!(err.is_status());
    assert_eq!(err.backend_message(), Some("index unavailable"));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn papers_accept_mixed_label_types() {
    let (url, _) = backend().await;
    let api = HttpPaperApi::new(&url).expect("api");
    let groups = api.papers().await.expect("papers");
    assert_eq!(groups.len(), 2);
    assert!(groups[0].has_marking_scheme);
    assert_eq!(groups[1].year, Year::from("2019"));
    assert_eq!(
        groups[1].papers,
        vec![PaperEntry {
            paper: PaperNumber::from("2"),
            filename: None,
        }]
    );
}

#[tokio::test]
async fn marking_scheme_lookup_found_and_not_found() {
    let (url, _) = backend().await;
    let api = HttpPaperApi::new(&url).expect("api");

    let found = api
        .lookup_marking_scheme_page(&Year::from("2019"), 3)
        .await
        .expect("lookup");
    assert!(found.found);
    assert_eq!(found.page, Some(11));

    let missing = api
        .lookup_marking_scheme_page(&Year::from("2019"), 9)
        .await
        .expect("lookup");
    assert!(!missing.found);
    assert_eq!(
        missing.message.as_deref(),
        Some("Question 9 not found, showing first page")
    );

    let err = api
        .lookup_marking_scheme_page(&Year::from("1999"), 1)
        .await
        .expect_err("no scheme for year");
    assert_eq!(err.backend_message(), Some("Marking scheme not found"));
}

#[tokio::test]
async fn fetch_pdf_returns_document_bytes() {
    let (url, _) = backend().await;
    let api = HttpPaperApi::new(&url).expect("api");
    let bytes = api
        .fetch_pdf(&PdfTarget::paper(
            Year::from("2018"),
            PaperNumber::from("2"),
            Some(6),
        ))
        .await
        .expect("pdf");
    assert_eq!(bytes, b"%PDF-2018-2-6".to_vec());

    let err = api
        .fetch_pdf(&PdfTarget::paper(Year::from("2018"), PaperNumber::from("2"), None))
        .await
        .expect_err("missing pdf");
    assert_eq!(err.backend_message(), Some("PDF not found"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (url, _) = backend().await;
    let api = HttpPaperApi::new(&url).expect("api");
    let err = api
        .get_json::<StatusResponse>("/api/broken")
        .await
        .expect_err("decode failure");
    assert!(matches!(err, ApiClientError::Decode { .. }));
    assert!(!err.is_status());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpPaperApi::new(&format!("http://{addr}")).expect("api");
    let err = api.status().await.expect_err("connection refused");
    assert!(err.is_transport());
}

#[test]
fn server_url_is_validated_and_normalized() {
    assert!(matches!(
        HttpPaperApi::new("not a url"),
        Err(ApiClientError::InvalidUrl { .. })
    ));

    let api = HttpPaperApi::new(" http://papers.local:5000/ ").expect("api");
    assert_eq!(api.server_url(), "http://papers.local:5000");
    assert_eq!(
        api.viewer_url(&PdfTarget::marking_scheme(Year::from("2022"), Some(3))),
        "http://papers.local:5000/api/markingscheme/2022/3#page=3"
    );
}
