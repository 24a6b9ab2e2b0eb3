// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::{watch, Notify};

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Poll interval while waiting for connections to drain
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Run the accept loop until `shutdown` is notified.
///
/// On shutdown the listener is closed first, live connections are told to
/// finish their current request, and the call returns once they are gone or
/// the grace period has elapsed.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    let (drain_tx, drain_rx) = watch::channel(false);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, drain_rx.clone());
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    logger::log_shutdown_started(state.active_connections.load(Ordering::SeqCst));
    // Receivers may all be gone already; nothing to notify then
    let _ = drain_tx.send(true);

    wait_for_drain(&state, state.config.performance.shutdown_grace()).await;
    Ok(())
}

/// Wait until no connection is active or `grace` has elapsed
async fn wait_for_drain(state: &AppState, grace: Duration) {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let active = state.active_connections.load(Ordering::SeqCst);
        if active == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period of {}s elapsed with {active} connection(s) still open",
                grace.as_secs()
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use crate::test_util::temp_file_path;
    use http_body_util::{BodyExt, Empty};
    use hyper::body::Bytes;
    use hyper::{Method, Request, StatusCode};
    use hyper_util::rt::TokioIo;
    use tokio::net::TcpStream;

    type ServerHandle = tokio::task::JoinHandle<std::io::Result<()>>;

    fn start_server(
        target: &std::path::Path,
    ) -> (std::net::SocketAddr, Arc<Notify>, ServerHandle) {
        start_server_with(target, |_| {})
    }

    fn start_server_with(
        target: &std::path::Path,
        tweak: impl FnOnce(&mut Config),
    ) -> (std::net::SocketAddr, Arc<Notify>, ServerHandle) {
        let mut config = Config::load_from("hello-missing-config").unwrap();
        config.route.target = format!("resource:file:{}", target.display());
        config.logging.access_log = false;
        config.performance.shutdown_grace = 1;
        tweak(&mut config);
        let state = Arc::new(AppState::new(config).unwrap());

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(serve(listener, state, Arc::clone(&shutdown)));
        (addr, shutdown, handle)
    }

    type Client = hyper::client::conn::http1::SendRequest<Empty<Bytes>>;
    type ClientConn = tokio::task::JoinHandle<hyper::Result<()>>;

    async fn connect(addr: std::net::SocketAddr) -> (Client, ClientConn) {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        (sender, tokio::spawn(conn))
    }

    async fn send(
        sender: &mut Client,
        addr: std::net::SocketAddr,
        method: Method,
        path: &str,
    ) -> (StatusCode, Bytes) {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("host", addr.to_string())
            .body(Empty::<Bytes>::new())
            .unwrap();
        let resp = sender.send_request(req).await.unwrap();
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    async fn request(
        addr: std::net::SocketAddr,
        method: Method,
        path: &str,
    ) -> (StatusCode, Bytes) {
        let (mut sender, _conn) = connect(addr).await;
        send(&mut sender, addr, method, path).await
    }

    #[tokio::test]
    async fn test_serves_file_over_tcp() {
        let path = temp_file_path("loop");
        std::fs::write(&path, b"hello world").unwrap();
        let (addr, shutdown, handle) = start_server(&path);

        let (status, body) = request(addr, Method::GET, "/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello world");

        let (status, _) = request(addr, Method::POST, "/hello").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        std::fs::remove_file(&path).unwrap();
        let (status, _) = request(addr, Method::GET, "/hello").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        shutdown.notify_one();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_without_connections() {
        let path = temp_file_path("loop_shutdown");
        let (_addr, shutdown, handle) = start_server(&path);

        shutdown.notify_one();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_connections_over_limit_are_closed() {
        use tokio::io::AsyncReadExt;

        let path = temp_file_path("loop_limit");
        let (addr, shutdown, handle) = start_server_with(&path, |cfg| {
            cfg.performance.max_connections = Some(0);
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let mut buf = [0u8; 16];
        let read = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
            .await
            .unwrap();
        // Closed without a response: EOF or reset
        assert!(matches!(read, Ok(0) | Err(_)));

        shutdown.notify_one();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_drains_keep_alive_connection() {
        let path = temp_file_path("loop_drain");
        std::fs::write(&path, b"hello world").unwrap();
        let (addr, shutdown, handle) = start_server_with(&path, |cfg| {
            cfg.performance.shutdown_grace = 5;
        });

        let (mut sender, client_conn) = connect(addr).await;
        let (status, body) = send(&mut sender, addr, Method::GET, "/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello world");

        // Connection is idle but still open when shutdown starts
        shutdown.notify_one();
        let started = tokio::time::Instant::now();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));

        // Server side closed the connection, so the client task ends
        let _ = tokio::time::timeout(Duration::from_secs(1), client_conn)
            .await
            .unwrap()
            .unwrap();
        drop(sender);

        std::fs::remove_file(&path).unwrap();
    }
}
