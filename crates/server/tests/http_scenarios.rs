//! End-to-end HTTP tests over a real listener
//!
//! Each test spins up the full stack (store, resolver, gate, router) on an
//! ephemeral port and talks to it with a plain HTTP client, the way a user
//! with curl would.

use redeemd_gate::{AuthorizationGate, FsResolver, SharedSecretVerifier};
use redeemd_server::{router, AppState};
use redeemd_store::{CredentialStore, FileStore};
use std::sync::Arc;
use tempfile::TempDir;

const SECRET: &str = "s3cret";

struct TestServer {
    url: String,
    store: Arc<FileStore>,
    root: TempDir,
    _store_dir: TempDir,
}

async fn spawn(files: &[(&str, &[u8])]) -> TestServer {
    let root = TempDir::new().unwrap();
    for (name, content) in files {
        std::fs::write(root.path().join(name), content).unwrap();
    }

    let store_dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::open(store_dir.path().join("codes.json")).unwrap());

    let gate = AuthorizationGate::new(
        store.clone(),
        Arc::new(FsResolver::new(root.path()).unwrap()),
        Arc::new(SharedSecretVerifier::new(SECRET)),
    );
    let app = router(AppState::new(gate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        url: format!("http://{addr}"),
        store,
        root,
        _store_dir: store_dir,
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn provision(server: &TestServer, path: &str, code: &str) -> reqwest::Response {
    client()
        .post(format!("{}{path}", server.url))
        .header("X-Admin", SECRET)
        .form(&[("redeemcode", code)])
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn unprovisioned_file_is_bad_request() {
    let server = spawn(&[("a.txt", b"hello")]).await;

    let res = client()
        .get(format!("{}/a.txt?redeemcode=X", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("400 Bad Request\n"), "body: {body}");
    assert!(body.contains("/a.txt"), "body: {body}");
}

#[tokio::test]
async fn provision_then_download() {
    let server = spawn(&[("a.txt", b"hello world")]).await;

    let res = provision(&server, "/a.txt", "ABC").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "200 OK\n");
    assert_eq!(server.store.codes_for("/a.txt").unwrap(), vec!["ABC"]);

    let res = client()
        .get(format!("{}/a.txt?redeemcode=ABC", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "text/plain"
    );
    assert_eq!(res.headers().get("content-length").unwrap(), "11");
    assert_eq!(
        res.headers().get("content-disposition").unwrap(),
        "attachment;filename=\"a.txt\""
    );
    assert_eq!(res.bytes().await.unwrap().as_ref(), b"hello world");
}

#[tokio::test]
async fn duplicate_provision_conflicts_and_leaves_store_unchanged() {
    let server = spawn(&[("a.txt", b"hello")]).await;

    assert_eq!(provision(&server, "/a.txt", "ABC").await.status(), 200);

    let res = provision(&server, "/a.txt", "ABC").await;
    assert_eq!(res.status(), 409);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("409 Conflict\n"), "body: {body}");
    assert!(body.contains("ABC"), "body: {body}");

    assert_eq!(server.store.codes_for("/a.txt").unwrap(), vec!["ABC"]);
}

#[tokio::test]
async fn wrong_code_is_unauthorized() {
    let server = spawn(&[("a.txt", b"hello")]).await;
    provision(&server, "/a.txt", "ABC").await;

    let res = client()
        .get(format!("{}/a.txt?redeemcode=WRONG", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("401 Unauthorized\n"), "body: {body}");
    assert!(body.contains("WRONG"), "body: {body}");
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let server = spawn(&[]).await;

    let res = client()
        .get(format!("{}/missing.txt?redeemcode=ABC", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert!(res.text().await.unwrap().starts_with("404 Not Found\n"));
}

#[tokio::test]
async fn missing_parameter_is_bad_request() {
    let server = spawn(&[("a.txt", b"hello")]).await;

    let res = client()
        .get(format!("{}/a.txt", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = res.text().await.unwrap();
    assert!(body.contains("redeemcode"), "body: {body}");
}

#[tokio::test]
async fn wrong_admin_secret_is_unauthorized_and_does_not_mutate() {
    let server = spawn(&[("a.txt", b"hello")]).await;

    for bad in ["S3CRET", "wrong", ""] {
        let res = client()
            .post(format!("{}/a.txt", server.url))
            .header("X-Admin", bad)
            .form(&[("redeemcode", "ABC")])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 401);
    }

    // No header at all.
    let res = client()
        .post(format!("{}/a.txt", server.url))
        .form(&[("redeemcode", "ABC")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    assert!(server.store.codes_for("/a.txt").is_none());
}

#[tokio::test]
async fn empty_code_is_bad_request() {
    let server = spawn(&[("a.txt", b"hello")]).await;

    let res = client()
        .post(format!("{}/a.txt", server.url))
        .header("X-Admin", SECRET)
        .form(&[("redeemcode", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = res.text().await.unwrap();
    assert!(body.contains("empty"), "body: {body}");
    assert!(server.store.codes_for("/a.txt").is_none());
}

#[tokio::test]
async fn head_returns_headers_without_body() {
    let server = spawn(&[("a.txt", b"hello")]).await;
    provision(&server, "/a.txt", "ABC").await;

    let res = client()
        .head(format!("{}/a.txt?redeemcode=ABC", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers().get("content-length").unwrap(), "5");
    assert!(res.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_method_is_405_with_allow() {
    let server = spawn(&[("a.txt", b"hello")]).await;

    let res = client()
        .put(format!("{}/a.txt", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 405);
    assert_eq!(res.headers().get("allow").unwrap(), "GET, HEAD, POST");
}

#[tokio::test]
async fn path_traversal_reads_nothing_outside_root() {
    let server = spawn(&[]).await;

    // Plant a file next to (outside) the serving root and provision a code
    // for the traversal path so only the resolver stands in the way. The
    // filename is derived from the unique temp root so parallel tests
    // cannot collide.
    let root_name = server
        .root
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    let secret_name = format!("{root_name}-secret.txt");
    let outside = server.root.path().parent().unwrap().join(&secret_name);
    std::fs::write(&outside, b"top secret").unwrap();
    let traversal_path = format!("/../{secret_name}");
    server.store.add_code(&traversal_path, "ABC").unwrap();

    // Sent raw so no client-side path normalization hides the attempt.
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    let addr = server.url.strip_prefix("http://").unwrap();
    let mut conn = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request =
        format!("GET {traversal_path}?redeemcode=ABC HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n");
    conn.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    conn.read_to_string(&mut response).await.unwrap();
    let _ = std::fs::remove_file(&outside);

    assert!(
        response.starts_with("HTTP/1.1 404"),
        "response: {response}"
    );
    assert!(!response.contains("top secret"), "response: {response}");
}

#[tokio::test]
async fn percent_encoded_path_serves_space_named_file() {
    let server = spawn(&[("a b.txt", b"spaced out")]).await;

    // The client encodes the space; provision and lookup must land on the
    // same decoded store key.
    provision(&server, "/a%20b.txt", "ABC").await;
    assert_eq!(server.store.codes_for("/a b.txt").unwrap(), vec!["ABC"]);

    let res = client()
        .get(format!("{}/a%20b.txt?redeemcode=ABC", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-disposition").unwrap(),
        "attachment;filename=\"a b.txt\""
    );
    assert_eq!(res.bytes().await.unwrap().as_ref(), b"spaced out");
}

#[tokio::test]
async fn encoded_traversal_is_still_not_found() {
    let server = spawn(&[("a.txt", b"hello")]).await;

    // %2e%2e decodes to ".." after dispatch; the resolver must refuse it
    // the same way it refuses a literal traversal. Sent raw because HTTP
    // clients normalize encoded dot segments away before sending.
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    let addr = server.url.strip_prefix("http://").unwrap();
    let mut conn = tokio::net::TcpStream::connect(addr).await.unwrap();
    conn.write_all(
        b"GET /%2e%2e/etc/passwd?redeemcode=ABC HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n",
    )
    .await
    .unwrap();

    let mut response = String::new();
    conn.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 404"), "response: {response}");
}

#[tokio::test]
async fn streams_large_files_completely() {
    let payload = vec![0xabu8; 3 * 64 * 1024 + 5];
    let server = spawn(&[("big.bin", payload.as_slice())]).await;
    provision(&server, "/big.bin", "BIG").await;

    let res = client()
        .get(format!("{}/big.bin?redeemcode=BIG", server.url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/octet-stream"
    );
    assert_eq!(res.bytes().await.unwrap().as_ref(), payload.as_slice());
}
