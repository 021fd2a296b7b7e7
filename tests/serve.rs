use hello_mvc::config::ServerConfig;
use hello_mvc::server;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn get(addr: SocketAddr, path: &str) -> (String, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();
    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    (head.to_string(), body.to_string())
}

#[tokio::test]
async fn serves_all_endpoints_over_tcp() {
    let (app, router) = server::bootstrap(&ServerConfig::default()).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::serve(listener, router, app, async move {
        let _ = stop_rx.await;
    }));

    for path in [
        "/response-body-string-v1",
        "/response-body-string-v2",
        "/response-body-string-v3",
    ] {
        let (head, body) = get(addr, path).await;
        assert!(head.starts_with("HTTP/1.1 200 OK"), "{}: {}", path, head);
        assert!(head.to_ascii_lowercase().contains("content-type: text/plain"));
        assert_eq!(body, "ok", "{}", path);
    }

    for path in ["/response-body-json-v1", "/response-body-json-v2"] {
        let (head, body) = get(addr, path).await;
        assert!(head.starts_with("HTTP/1.1 200 OK"), "{}: {}", path, head);
        assert!(head.to_ascii_lowercase().contains("content-type: application/json"));
        assert_eq!(body, r#"{"username":"userA","age":20}"#, "{}", path);
    }

    let (head, _) = get(addr, "/response-body-json-v3").await;
    assert!(head.starts_with("HTTP/1.1 404"), "{}", head);

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
