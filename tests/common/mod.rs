//! Common test utilities

use hostel_rooms::api::{RoomServer, ServerConfig};
use hostel_rooms::storage::create_sqlite_repository;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// JSON body for a room, in wire format
pub fn room_json(room_no: &str, capacity: u32, has_ac: bool, has_washroom: bool) -> Value {
    json!({
        "roomNo": room_no,
        "capacity": capacity,
        "hasAC": has_ac,
        "hasAttachedWashroom": has_washroom
    })
}

/// A room API server on an ephemeral port with its own SQLite file
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = create_sqlite_repository(dir.path().join("rooms.db")).unwrap();
        let config = ServerConfig::builder()
            .enable_request_logging(false)
            .build()
            .unwrap();
        let server = RoomServer::new(config, repo).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            shutdown_tx: Some(shutdown_tx),
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn add_room(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/rooms"))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        let body = resp.json().await.unwrap();
        (status, body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
