//! A local stand-in for the Telegram Bot API. Records every request it receives and
//! answers all of them with the same canned status and body.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) content_type: Option<String>,
    pub(crate) body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub(crate) struct ProviderStub {
    pub(crate) url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ProviderStub {
    pub(crate) async fn spawn(status: u16, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            requests: requests.clone(),
        };

        let app = axum::Router::new().fallback(record).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    /// An address nothing listens on.
    pub(crate) async fn unreachable_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}
