//! In-process stand-ins for the ListenBrainz API.
#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use lbcli::{
    listenbrainz::{Client, ClientConfig},
    types::Listen,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// A request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

impl Recorded {
    /// Track names of a `submit-listens` payload, in order.
    pub fn track_names(&self) -> Vec<String> {
        self.body["payload"]
            .as_array()
            .map(|listens| {
                listens
                    .iter()
                    .map(|l| l["track_metadata"]["track_name"].as_str().unwrap().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Clone, Default)]
pub struct MockServer {
    pub addr: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    script: Arc<Mutex<VecDeque<(u16, Value)>>>,
}

impl MockServer {
    /// Starts a server that answers every request with the next scripted
    /// response, or `200 {"status": "ok"}` once the script is used up.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = MockServer {
            addr: format!("http://{}", listener.local_addr().unwrap()),
            ..Default::default()
        };

        let app = Router::new().fallback(handle).with_state(server.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        server
    }

    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.script.lock().unwrap().push_back((status, body));
        self
    }

    pub fn respond_times(&self, status: u16, times: usize) -> &Self {
        for _ in 0..times {
            self.respond(status, json!({ "code": status, "error": "scripted" }));
        }
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn client(&self) -> Client {
        client_for(&self.addr)
    }
}

async fn handle(
    State(server): State<MockServer>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    server.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let next = server.script.lock().unwrap().pop_front();
    match next {
        Some((204, _)) => StatusCode::NO_CONTENT.into_response(),
        Some((status, body)) => (StatusCode::from_u16(status).unwrap(), Json(body)).into_response(),
        None => Json(json!({ "status": "ok" })).into_response(),
    }
}

/// Starts a listener that accepts and immediately drops every connection.
/// Returns its address and the number of connections seen so far.
pub async fn start_dropping_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    let connections = Arc::new(AtomicUsize::new(0));

    let seen = Arc::clone(&connections);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            seen.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });

    (addr, connections)
}

/// A client with a short retry delay so retry tests stay fast.
pub fn client_for(addr: &str) -> Client {
    Client::with_config(
        ClientConfig::default()
            .with_api_root(addr)
            .with_retry_delay(Duration::from_millis(10)),
    )
}

pub fn listens(count: usize) -> Vec<Listen> {
    (0..count)
        .map(|i| {
            Listen::new("Boards of Canada", format!("Track {i:03}"))
                .with_release("Music Has the Right to Children")
                .with_listened_at(1_700_000_000 + i as i64)
        })
        .collect()
}
