//! End-to-end tests against a local HTTP server recording every request

use anyhow::Result;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use heaven_client::{ClientError, HeavenClient};
use heaven_core::MemoryDocument;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Server {
    paths: Arc<Mutex<Vec<String>>>,
    status: StatusCode,
    body: &'static str,
}

impl Server {
    fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

async fn record(State(server): State<Server>, uri: Uri) -> (StatusCode, &'static str) {
    server.paths.lock().unwrap().push(uri.path().to_string());
    (server.status, server.body)
}

/// Starts a server answering every request with `status` and `body`
async fn start_server(status: StatusCode, body: &'static str) -> Result<(String, Server)> {
    let server = Server {
        paths: Arc::new(Mutex::new(Vec::new())),
        status,
        body,
    };
    let app = Router::new().fallback(record).with_state(server.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((format!("http://{}", addr), server))
}

/// Address nothing listens on
async fn closed_address() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn test_abort_job_sends_single_request() -> Result<()> {
    let (url, server) = start_server(StatusCode::OK, "DONE").await?;
    let client = HeavenClient::new(url);

    let receipt = client.abort_job(42).await?;

    assert_eq!(server.paths(), vec!["/port/42/abort"]);
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body, "DONE");
    assert!(receipt.is_success());
    Ok(())
}

#[tokio::test]
async fn test_abort_job_server_error_is_not_an_error() -> Result<()> {
    let (url, server) = start_server(StatusCode::INTERNAL_SERVER_ERROR, "Error").await?;
    let client = HeavenClient::new(url);

    let receipt = client.abort_job(42).await?;

    assert_eq!(server.paths(), vec!["/port/42/abort"]);
    assert_eq!(receipt.status, 500);
    assert!(!receipt.is_success());
    Ok(())
}

#[tokio::test]
async fn test_detached_abort_fires_once() -> Result<()> {
    let (url, server) = start_server(StatusCode::INTERNAL_SERVER_ERROR, "Error").await?;
    let client = HeavenClient::new(url);

    client.abort_job_detached("rack1-p07").await?;

    assert_eq!(server.paths(), vec!["/port/rack1-p07/abort"]);
    Ok(())
}

#[tokio::test]
async fn test_abort_transport_failure() -> Result<()> {
    let client = HeavenClient::new(closed_address().await?);

    let err = client.abort_job(42).await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, ClientError::RequestFailed(_)));

    // The detached form swallows the same failure
    client.abort_job_detached(42).await?;
    Ok(())
}

/// Server that promises a longer body than it sends, then hangs up
async fn truncating_server() -> Result<String> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nDONE")
                .await;
            let _ = socket.shutdown().await;
        }
    });

    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn test_abort_truncated_body_is_an_error() -> Result<()> {
    let client = HeavenClient::new(truncating_server().await?);

    let err = client.abort_job(42).await.unwrap_err();

    assert!(err.is_transport());
    Ok(())
}

#[tokio::test]
async fn test_fetch_page_returns_body_whatever_the_status() -> Result<()> {
    let (url, server) = start_server(StatusCode::NOT_FOUND, "<h1>missing</h1>\n").await?;
    let client = HeavenClient::new(url);

    let text = client.fetch_page("portstatus.html").await?;

    assert_eq!(text, "<h1>missing</h1>\n");
    assert_eq!(server.paths(), vec!["/portstatus.html"]);
    Ok(())
}

#[tokio::test]
async fn test_paths_under_base_sub_path() -> Result<()> {
    let (url, server) = start_server(StatusCode::OK, "ok").await?;
    let client = HeavenClient::new(format!("{}/ui/", url));

    client.fetch_page("portstatus.html").await?;
    client.abort_job(3).await?;

    assert_eq!(server.paths(), vec!["/ui/portstatus.html", "/port/3/abort"]);
    Ok(())
}

#[tokio::test]
async fn test_reloader_fills_container() -> Result<()> {
    let (url, server) = start_server(StatusCode::OK, "<p>OK</p>").await?;
    let client = HeavenClient::new(url);
    let document = Arc::new(MemoryDocument::with_element("portstatus"));

    let handle = client.create_reloader("portstatus", "portstatus.html", document.clone())?;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    let stats = handle.shutdown().await;

    assert_eq!(document.inner("portstatus").as_deref(), Some("<p>OK</p>"));
    assert_eq!(stats.updates_applied, 1);
    assert_eq!(server.paths(), vec!["/portstatus.html"]);
    Ok(())
}

#[tokio::test]
async fn test_reloader_survives_unreachable_server() -> Result<()> {
    let client = HeavenClient::new(closed_address().await?);
    let document = Arc::new(MemoryDocument::new());
    document.insert_element("portstatus", "<p>prior</p>");

    let handle = client.create_reloader("portstatus", "portstatus.html", document.clone())?;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    let stats = handle.shutdown().await;

    assert_eq!(document.inner("portstatus").as_deref(), Some("<p>prior</p>"));
    assert_eq!(stats.updates_applied, 0);
    assert!(stats.ticks_fired >= 1);
    assert!(stats.fetch_failures >= 1);
    Ok(())
}
