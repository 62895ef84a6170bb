//! TCP transport: whole-object JSON framing over a stream socket.
//!
//! Each connection gets a reader task that accumulates bytes and tries to
//! parse the entire buffer as one JSON value after every read; an
//! incomplete object just keeps accumulating. Parsed requests are handed
//! to a single executor task that owns the scene and dispatcher, so scene
//! access is serialized no matter how many clients are connected.

use std::io;

use rigbridge_core::{Request, Response, SceneGraph, ServerConfig};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::dispatch::Dispatcher;

/// Queue depth between connection readers and the executor.
const EXECUTOR_QUEUE: usize = 32;

struct Job {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// The bridge server: accept loop plus the single-writer executor.
#[derive(Debug)]
pub struct Server {
    bind_addr: String,
    dispatcher: Dispatcher,
}

impl Server {
    /// Creates a server from the given configuration.
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            bind_addr: config.bind_addr(),
            dispatcher: Dispatcher::new(config.capabilities.clone()),
        }
    }

    /// Binds the configured address and serves until an accept error.
    pub async fn run<S>(self, scene: S) -> io::Result<()>
    where
        S: SceneGraph + Send + 'static,
    {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        self.serve(listener, scene).await
    }

    /// Serves on an already-bound listener.
    pub async fn serve<S>(self, listener: TcpListener, mut scene: S) -> io::Result<()>
    where
        S: SceneGraph + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "listening");
        }

        let (job_tx, mut job_rx) = mpsc::channel::<Job>(EXECUTOR_QUEUE);
        let dispatcher = self.dispatcher;

        // Single-writer discipline: the executor is the only task that
        // ever touches the scene.
        tokio::spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let response = dispatcher.dispatch(&mut scene, &job.request);
                if job.reply.send(response).is_err() {
                    debug!("client went away before its response was ready");
                }
            }
        });

        loop {
            let (stream, peer) = listener.accept().await?;
            info!(%peer, "client connected");
            let job_tx = job_tx.clone();
            tokio::spawn(async move {
                match handle_connection(stream, job_tx).await {
                    Ok(()) => info!(%peer, "client disconnected"),
                    Err(err) => warn!(%peer, error = %err, "connection error"),
                }
            });
        }
    }
}

async fn handle_connection(mut stream: TcpStream, job_tx: mpsc::Sender<Job>) -> io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 8192];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..n]);

        // Whole-buffer framing: anything that parses as a JSON value is a
        // complete message; anything that does not is assumed incomplete.
        let Ok(value) = serde_json::from_slice::<Value>(&buffer) else {
            continue;
        };
        buffer.clear();

        let response = match serde_json::from_value::<Request>(value) {
            Ok(request) => execute(&job_tx, request).await,
            Err(err) => Response::error(format!("Invalid request: {err}")),
        };
        let bytes = serde_json::to_vec(&response).map_err(io::Error::other)?;
        stream.write_all(&bytes).await?;
    }
}

async fn execute(job_tx: &mpsc::Sender<Job>, request: Request) -> Response {
    let (reply_tx, reply_rx) = oneshot::channel();
    let job = Job {
        request,
        reply: reply_tx,
    };
    if job_tx.send(job).await.is_err() {
        return Response::error("Server is shutting down");
    }
    match reply_rx.await {
        Ok(response) => response,
        Err(_) => Response::error("Server is shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rigbridge_core::Aabb;
    use rigbridge_scene::MemoryScene;
    use serde_json::json;
    use std::time::Duration;

    fn test_scene() -> MemoryScene {
        let mut scene = MemoryScene::new("Scene");
        scene.add_mesh(
            "Body",
            1000,
            Aabb {
                min: Vec3::new(-0.5, -0.5, 0.0),
                max: Vec3::new(0.5, 0.5, 2.0),
            },
        );
        scene
    }

    async fn spawn_server() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Server::new(&ServerConfig::default());
        tokio::spawn(async move {
            let _ = server.serve(listener, test_scene()).await;
        });
        addr
    }

    async fn read_response(stream: &mut TcpStream) -> Response {
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "server closed before responding");
            buffer.extend_from_slice(&chunk[..n]);
            if let Ok(response) = serde_json::from_slice::<Response>(&buffer) {
                return response;
            }
        }
    }

    #[tokio::test]
    async fn serves_a_request_end_to_end() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        let request = json!({"type": "get_scene_info"}).to_string();
        stream.write_all(request.as_bytes()).await.unwrap();

        let response = read_response(&mut stream).await;
        assert!(response.is_success());
        assert_eq!(response.result.unwrap()["name"], "Scene");
    }

    #[tokio::test]
    async fn reassembles_a_split_request() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        let request = json!({"type": "inspect_humanoid_rig", "params": {}}).to_string();
        let (first, second) = request.split_at(request.len() / 2);
        stream.write_all(first.as_bytes()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        stream.write_all(second.as_bytes()).await.unwrap();

        let response = read_response(&mut stream).await;
        assert!(response.is_success());
        assert_eq!(response.result.unwrap()["rig_type"], "mesh_only");
    }

    #[tokio::test]
    async fn scene_mutations_are_visible_across_requests() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        let rig = json!({
            "type": "auto_rig_character",
            "params": {"use_external_tool": false}
        })
        .to_string();
        stream.write_all(rig.as_bytes()).await.unwrap();
        let response = read_response(&mut stream).await;
        assert!(response.is_success());

        let inspect = json!({"type": "inspect_humanoid_rig"}).to_string();
        stream.write_all(inspect.as_bytes()).await.unwrap();
        let response = read_response(&mut stream).await;
        assert_eq!(response.result.unwrap()["armature_name"], "Body_Rig");
    }

    #[tokio::test]
    async fn two_connections_share_one_scene() {
        let addr = spawn_server().await;

        let mut first = TcpStream::connect(addr).await.unwrap();
        let rig = json!({
            "type": "auto_rig_character",
            "params": {"use_external_tool": false}
        })
        .to_string();
        first.write_all(rig.as_bytes()).await.unwrap();
        assert!(read_response(&mut first).await.is_success());

        let mut second = TcpStream::connect(addr).await.unwrap();
        let info = json!({"type": "get_scene_info"}).to_string();
        second.write_all(info.as_bytes()).await.unwrap();
        let response = read_response(&mut second).await;
        assert_eq!(response.result.unwrap()["object_count"], 2);
    }

    #[tokio::test]
    async fn complete_but_invalid_envelope_gets_an_error() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        stream
            .write_all(json!({"not_type": 1}).to_string().as_bytes())
            .await
            .unwrap();
        let response = read_response(&mut stream).await;
        assert!(!response.is_success());
        assert!(response.message.unwrap().starts_with("Invalid request"));
    }
}
